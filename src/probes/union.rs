// src/probes/union.rs
//! Union-based detection in two phases: ORDER BY escalation to find the
//! victim query's column count, then a single-position string sweep to
//! find a column that accepts string output.

use crate::classifier::{self, MAX_ORDER_BY_COLUMNS};
use crate::error::ScanError;
use crate::http_client::HttpGet;
use crate::probes::Probe;
use crate::types::{ProbeResult, TargetParameter, Technique};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct UnionBasedProbe {
    client: Arc<dyn HttpGet>,
}

impl UnionBasedProbe {
    pub fn new(client: Arc<dyn HttpGet>) -> Self {
        Self { client }
    }

    /// Phase 2: walk the column vector, substituting `'a'` at one position
    /// at a time. The first combination the server accepts wins. The sweep
    /// is deliberately single-position; no numeric or date variants.
    async fn sweep_string_column(
        &self,
        target: &TargetParameter,
        column_count: usize,
    ) -> Result<ProbeResult, ScanError> {
        let mut columns: Vec<String> = vec!["NULL".to_string(); column_count];

        for position in 0..column_count {
            columns[position] = "'a'".to_string();
            let payload = format!("' UNION SELECT {}--", columns.join(","));
            let url = target.test_url(&payload);

            match self.client.get(&url).await {
                Ok(response) if !classifier::signals_query_error(&response) => {
                    info!(
                        "Union injection on '{}': {} columns, string output at position {}",
                        target.name,
                        column_count,
                        position + 1
                    );
                    return Ok(ProbeResult::vulnerable(
                        Technique::UnionBased,
                        &payload,
                        format!(
                            "{} columns, string column at position {}",
                            column_count,
                            position + 1
                        ),
                    ));
                }
                Ok(_) => {
                    debug!("Position {} rejected", position + 1);
                }
                Err(e) => {
                    warn!("Error probing union position {}: {}", position + 1, e);
                }
            }

            columns[position] = "NULL".to_string();
        }

        Ok(ProbeResult::clean(Technique::UnionBased))
    }
}

#[async_trait]
impl Probe for UnionBasedProbe {
    fn technique(&self) -> Technique {
        Technique::UnionBased
    }

    /// Phase 1: the first N in 1..=19 whose ORDER BY errors establishes
    /// column_count = N-1. No error through 19 means discovery failed and
    /// the string sweep never runs.
    async fn probe(&self, target: &TargetParameter) -> Result<ProbeResult, ScanError> {
        for n in 1..=MAX_ORDER_BY_COLUMNS {
            let payload = format!("' ORDER BY {}--", n);
            let url = target.test_url(&payload);

            let response = match self.client.get(&url).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Error during column-count discovery at {}: {}", n, e);
                    continue;
                }
            };

            if classifier::signals_query_error(&response) {
                let column_count = n - 1;
                info!(
                    "Estimated column count for '{}': {}",
                    target.name, column_count
                );
                return self.sweep_string_column(target, column_count).await;
            }
        }

        debug!("No ORDER BY error up to {}", MAX_ORDER_BY_COLUMNS);
        Ok(ProbeResult::clean(Technique::UnionBased))
    }
}
