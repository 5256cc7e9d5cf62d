// src/http_client.rs
//! HTTP capability consumed by the probes: a blocking-until-done GET that
//! reports status, body and measured latency. The trait seam exists so
//! tests can script responses without a network.

use crate::config::Config;
use crate::error::ScanError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a probe gets back from one request
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

impl ProbeResponse {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Capability interface for issuing a GET against a test URL
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str) -> Result<ProbeResponse, ScanError>;
}

/// Production client over reqwest, configured once from [`Config`]
pub struct HttpClient {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl HttpClient {
    pub fn new(config: Arc<Config>) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.settings.timeout))
            .user_agent(&config.settings.user_agent)
            .redirect(reqwest::redirect::Policy::limited(
                config.settings.max_redirects,
            ))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl HttpGet for HttpClient {
    async fn get(&self, url: &str) -> Result<ProbeResponse, ScanError> {
        let mut request = self.client.get(url);

        for (key, value) in &self.config.settings.headers {
            request = request.header(key, value);
        }

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let elapsed = start.elapsed();

        Ok(ProbeResponse {
            status,
            body,
            elapsed,
        })
    }
}
