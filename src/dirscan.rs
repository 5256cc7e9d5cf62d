// src/dirscan.rs
//! Directory-listing scan: one request per configured candidate path,
//! flagged when the body carries an index-page marker.

use crate::classifier;
use crate::config::Config;
use crate::http_client::HttpGet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

pub struct DirectoryScanner {
    client: Arc<dyn HttpGet>,
    candidates: Vec<String>,
}

impl DirectoryScanner {
    pub fn new(config: &Config, client: Arc<dyn HttpGet>) -> Self {
        Self {
            client,
            candidates: config.settings.common_directories.clone(),
        }
    }

    /// Check every candidate directory under the target's base URL and
    /// return those that expose a listing. Failures per candidate are
    /// logged and skipped.
    pub async fn scan(&self, base_url: &str) -> Vec<String> {
        let base = match Url::parse(base_url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot parse base URL '{}': {}", base_url, e);
                return Vec::new();
            }
        };

        let mut open = Vec::new();

        for candidate in &self.candidates {
            let dir_url = match base.join(candidate) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    warn!("Cannot resolve directory '{}': {}", candidate, e);
                    continue;
                }
            };

            match self.client.get(&dir_url).await {
                Ok(response) if classifier::is_directory_listing(&response) => {
                    info!("Directory listing found: {}", dir_url);
                    open.push(dir_url);
                }
                Ok(_) => {
                    debug!("No listing at {}", dir_url);
                }
                Err(e) => {
                    warn!("Error accessing {}: {}", dir_url, e);
                }
            }
        }

        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::testing::{response, Reply, ScriptedClient};

    #[tokio::test]
    async fn test_listing_markers_detected() {
        let client = Arc::new(
            ScriptedClient::new(response(404, "not found"))
                .on("/backup/", Reply::Respond(response(200, "<title>Index of /backup</title>")))
                .on("/logs/", Reply::Respond(response(200, "<a>Parent Directory</a>"))),
        );
        let scanner = DirectoryScanner::new(&Config::default(), client);

        let open = scanner.scan("http://t/p.php").await;

        assert_eq!(
            open,
            vec![
                "http://t/backup/".to_string(),
                "http://t/logs/".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_plain_pages_not_flagged() {
        let client = Arc::new(ScriptedClient::new(response(200, "<html>welcome</html>")));
        let scanner = DirectoryScanner::new(&Config::default(), client.clone());

        let open = scanner.scan("http://t/p.php").await;

        assert!(open.is_empty());
        assert_eq!(
            client.request_log().len(),
            Config::default().settings.common_directories.len()
        );
    }
}
