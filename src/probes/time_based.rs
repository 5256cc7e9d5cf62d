// src/probes/time_based.rs
//! Time-based blind detection: inject sleep expressions for several SQL
//! dialects and watch for the induced delay in the measured latency.

use crate::classifier;
use crate::error::ScanError;
use crate::http_client::HttpGet;
use crate::probes::Probe;
use crate::types::{ProbeResult, TargetParameter, Technique};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Delay payloads tried blind, in order, without dialect fingerprinting.
/// All ask for a 5 second delay; see [`classifier::DELAY_THRESHOLD_SECS`].
const TIME_PAYLOADS: &[&str] = &[
    "'; WAITFOR DELAY '00:00:05'--",
    "'; SELECT SLEEP(5);--",
    "' AND (SELECT * FROM (SELECT(SLEEP(5)))a);--",
    "' AND IF(1=1,SLEEP(5),0);--",
];

pub struct TimeBasedProbe {
    client: Arc<dyn HttpGet>,
}

impl TimeBasedProbe {
    pub fn new(client: Arc<dyn HttpGet>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Probe for TimeBasedProbe {
    fn technique(&self) -> Technique {
        Technique::TimeBased
    }

    /// First payload whose latency clears the threshold wins. A request
    /// that exceeds the client timeout is a transport failure for that
    /// payload, never a positive signal.
    async fn probe(&self, target: &TargetParameter) -> Result<ProbeResult, ScanError> {
        for payload in TIME_PAYLOADS {
            let url = target.test_url(payload);

            let response = match self.client.get(&url).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Error testing delay payload '{}': {}", payload, e);
                    continue;
                }
            };

            let elapsed = response.elapsed_secs();
            if classifier::exceeds_delay_threshold(elapsed) {
                info!(
                    "Induced delay on parameter '{}': {:.2}s with payload '{}'",
                    target.name, elapsed, payload
                );
                return Ok(ProbeResult::vulnerable(
                    Technique::TimeBased,
                    payload,
                    format!("response delayed {:.2}s", elapsed),
                ));
            }

            debug!("Payload '{}' answered in {:.2}s", payload, elapsed);
        }

        Ok(ProbeResult::clean(Technique::TimeBased))
    }
}
