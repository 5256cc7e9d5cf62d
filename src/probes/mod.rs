// src/probes/mod.rs
//! The four technique probes. Each one composes the HTTP capability and
//! the response classifier to test a single parameter for one
//! vulnerability class, with strict first-match iteration order.

pub mod boolean;
pub mod error_based;
pub mod time_based;
pub mod union;

use crate::config::Config;
use crate::error::ScanError;
use crate::http_client::HttpGet;
use crate::types::{ProbeResult, TargetParameter, Technique};
use async_trait::async_trait;
use std::sync::Arc;

pub use boolean::BooleanBasedProbe;
pub use error_based::ErrorBasedProbe;
pub use time_based::TimeBasedProbe;
pub use union::UnionBasedProbe;

/// Capability interface every technique implements. A probe invocation
/// produces exactly one [`ProbeResult`]; failures of individual requests
/// are handled inside and never escalate.
#[async_trait]
pub trait Probe: Send + Sync {
    fn technique(&self) -> Technique;

    async fn probe(&self, target: &TargetParameter) -> Result<ProbeResult, ScanError>;
}

/// The full probe set in the order the orchestrator runs it:
/// error, boolean, time, union. Ordering is part of observed behavior.
pub fn probe_set(config: &Config, client: Arc<dyn HttpGet>) -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(ErrorBasedProbe::new(config, client.clone())),
        Box::new(BooleanBasedProbe::new(client.clone())),
        Box::new(TimeBasedProbe::new(client.clone())),
        Box::new(UnionBasedProbe::new(client)),
    ]
}
