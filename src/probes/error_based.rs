// src/probes/error_based.rs
//! Error-based detection: append each configured payload to the baseline
//! value and look for leaked database error text in the response.

use crate::classifier;
use crate::config::Config;
use crate::error::ScanError;
use crate::http_client::HttpGet;
use crate::probes::Probe;
use crate::types::{ProbeResult, TargetParameter, Technique};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ErrorBasedProbe {
    client: Arc<dyn HttpGet>,
    payloads: Vec<String>,
    patterns: Vec<Regex>,
}

impl ErrorBasedProbe {
    pub fn new(config: &Config, client: Arc<dyn HttpGet>) -> Self {
        Self {
            client,
            payloads: config.settings.test_payloads.clone(),
            patterns: config.compiled_error_patterns(),
        }
    }
}

#[async_trait]
impl Probe for ErrorBasedProbe {
    fn technique(&self) -> Technique {
        Technique::ErrorBased
    }

    /// First (payload, pattern) pair to match wins and stops all further
    /// payload iteration. A transport failure skips to the next payload.
    async fn probe(&self, target: &TargetParameter) -> Result<ProbeResult, ScanError> {
        for payload in &self.payloads {
            let url = target.test_url(payload);

            let response = match self.client.get(&url).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Error testing payload '{}': {}", payload, e);
                    continue;
                }
            };

            if let Some(pattern) = classifier::first_error_match(&response.body, &self.patterns) {
                info!(
                    "Database error leaked for parameter '{}' with payload '{}'",
                    target.name, payload
                );
                return Ok(ProbeResult::vulnerable(
                    Technique::ErrorBased,
                    payload,
                    format!("matched error signature: {}", pattern),
                ));
            }

            debug!("No error signature for payload '{}'", payload);
        }

        Ok(ProbeResult::clean(Technique::ErrorBased))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::testing::{response, Reply, ScriptedClient};

    const MYSQL_ERROR: &str =
        "You have an error in your SQL syntax; check the manual for your MySQL server";

    fn probe_with(client: ScriptedClient) -> (ErrorBasedProbe, Arc<ScriptedClient>) {
        let client = Arc::new(client);
        let config = Config::default();
        (
            ErrorBasedProbe::new(&config, client.clone()),
            client,
        )
    }

    #[tokio::test]
    async fn test_first_payload_match_stops_iteration() {
        // Error text appears only once a quote is appended
        let client = ScriptedClient::new(response(200, "<html>profile page</html>"))
            .on("id=1'", Reply::Respond(response(200, MYSQL_ERROR)));
        let (probe, client) = probe_with(client);
        let target = TargetParameter::new("http://t/p.php", "id", "1");

        let result = probe.probe(&target).await.unwrap();

        assert!(result.vulnerable);
        assert_eq!(result.payload.as_deref(), Some("'"));
        assert!(result.evidence.unwrap().contains("SQL syntax"));
        // First payload matched, nothing after it was sent
        assert_eq!(client.request_log().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_continues_with_next_payload() {
        // Every quote-prefixed payload fails at transport; "--" is the
        // first one that gets a response back
        let client = ScriptedClient::new(response(200, MYSQL_ERROR))
            .on("id=1'", Reply::Fail("connection refused".to_string()));
        let (probe, _) = probe_with(client);
        let target = TargetParameter::new("http://t/p.php", "id", "1");

        let result = probe.probe(&target).await.unwrap();

        assert!(result.vulnerable);
        assert_eq!(result.payload.as_deref(), Some("--"));
    }

    #[tokio::test]
    async fn test_clean_target_tries_every_payload() {
        let client = ScriptedClient::new(response(200, "<html>profile page</html>"));
        let (probe, client) = probe_with(client);
        let target = TargetParameter::new("http://t/p.php", "id", "1");

        let result = probe.probe(&target).await.unwrap();

        assert!(!result.vulnerable);
        assert!(result.payload.is_none());
        assert_eq!(
            client.request_log().len(),
            Config::default().settings.test_payloads.len()
        );
    }
}
