// src/probes/boolean.rs
//! Boolean-based blind detection: compare the responses to an injected
//! always-true and always-false condition on the same parameter.

use crate::classifier;
use crate::error::ScanError;
use crate::http_client::HttpGet;
use crate::probes::Probe;
use crate::types::{ProbeResult, TargetParameter, Technique};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const TRUE_CONDITION: &str = " AND 1=1";
const FALSE_CONDITION: &str = " AND 1=2";

pub struct BooleanBasedProbe {
    client: Arc<dyn HttpGet>,
}

impl BooleanBasedProbe {
    pub fn new(client: Arc<dyn HttpGet>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Probe for BooleanBasedProbe {
    fn technique(&self) -> Technique {
        Technique::BooleanBased
    }

    /// Status-code difference wins over body-length difference. A transport
    /// failure on either request yields no verdict at all.
    async fn probe(&self, target: &TargetParameter) -> Result<ProbeResult, ScanError> {
        let true_url = target.test_url(TRUE_CONDITION);
        let false_url = target.test_url(FALSE_CONDITION);

        let true_response = match self.client.get(&true_url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error testing true condition on '{}': {}", target.name, e);
                return Ok(ProbeResult::clean(Technique::BooleanBased));
            }
        };

        let false_response = match self.client.get(&false_url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error testing false condition on '{}': {}", target.name, e);
                return Ok(ProbeResult::clean(Technique::BooleanBased));
            }
        };

        match classifier::boolean_evidence(&true_response, &false_response) {
            Some(evidence) => Ok(ProbeResult::vulnerable(
                Technique::BooleanBased,
                "AND 1=1/1=2",
                evidence.to_string(),
            )),
            None => {
                debug!("No differential behavior on '{}'", target.name);
                Ok(ProbeResult::clean(Technique::BooleanBased))
            }
        }
    }
}
