// src/config.rs
//! Scanner configuration: a JSON file mapped onto [`Config`], with an
//! embedded default used whenever the file is missing or unreadable.
//! Loaded once at startup and shared by reference; never mutated afterwards.

use crate::error::ScanError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Top-level configuration object, mirroring the `config.json` layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Per-request timeout in seconds
    pub timeout: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    /// Static headers sent with every request
    pub headers: HashMap<String, String>,
    /// Ordered error-probing payloads for the error-based technique
    pub test_payloads: Vec<String>,
    /// Ordered database error signatures, matched case-insensitively
    pub error_patterns: Vec<String>,
    /// Candidate paths for the directory-listing scan
    pub common_directories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "Accept".to_string(),
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
        );
        headers.insert("Accept-Language".to_string(), "en-US,en;q=0.5".to_string());
        headers.insert("Accept-Encoding".to_string(), "gzip, deflate".to_string());
        headers.insert("Connection".to_string(), "keep-alive".to_string());

        Self {
            settings: Settings {
                timeout: 10,
                max_redirects: 5,
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                             (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                    .to_string(),
                headers,
                test_payloads: vec![
                    "'".to_string(),
                    "';".to_string(),
                    "''".to_string(),
                    "--".to_string(),
                    "#".to_string(),
                    "' OR '1'='1".to_string(),
                    "' OR '1'='1' --".to_string(),
                    "' UNION SELECT NULL --".to_string(),
                    "' AND 1=1 --".to_string(),
                    "' AND 1=2 --".to_string(),
                ],
                error_patterns: vec![
                    r"SQL syntax.*MySQL".to_string(),
                    r"Warning.*mysql_".to_string(),
                    r"valid MySQL result".to_string(),
                    r"MySqlClient\.".to_string(),
                    r"PostgreSQL.*ERROR".to_string(),
                    r"Warning.*pg_".to_string(),
                    r"valid PostgreSQL result".to_string(),
                    r"Npgsql\.".to_string(),
                    r"Driver.*SQL SERVER".to_string(),
                    r"OLE DB.*SQL SERVER".to_string(),
                    r"SQL Server.*Driver".to_string(),
                    r"Warning.*mssql_".to_string(),
                    r"Microsoft OLE DB Provider for ODBC Drivers".to_string(),
                    r"Microsoft OLE DB Provider for SQL Server".to_string(),
                    r"Unclosed quotation mark after the character string".to_string(),
                    r"ODBC SQL Server Driver".to_string(),
                    r"ODBC Driver.*for SQL Server".to_string(),
                    r"Oracle.*Driver".to_string(),
                    r"Oracle error".to_string(),
                    r"quoted string not properly terminated".to_string(),
                    r"JET Database Engine".to_string(),
                    r"Access Database Engine".to_string(),
                    r"ODBC Microsoft Access Driver".to_string(),
                ],
                common_directories: vec![
                    "admin/", "backup/", "database/", "config/", "includes/", "temp/", "logs/",
                    "cache/", "uploads/", "files/", "old/", "new/", "test/", "dev/", "staging/",
                    "sql/", "data/", "scripts/", "lib/", "src/",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, falling back to the embedded
    /// defaults when the file is missing or does not parse. The fallback is
    /// logged but never surfaced as a failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Configuration file {} is invalid ({}), using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Configuration file {} not found ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Compile the configured error signatures, preserving list order.
    /// Patterns that fail to compile are skipped with a warning so one bad
    /// entry cannot disable the whole error-based technique.
    pub fn compiled_error_patterns(&self) -> Vec<Regex> {
        self.settings
            .error_patterns
            .iter()
            .filter_map(|pattern| {
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!("Skipping invalid error pattern '{}': {}", pattern, e);
                        None
                    }
                }
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.settings.timeout == 0 {
            return Err(ScanError::Config("timeout must be greater than zero".to_string()));
        }

        if self.settings.test_payloads.is_empty() {
            return Err(ScanError::Config("no test payloads configured".to_string()));
        }

        if self.compiled_error_patterns().is_empty() {
            return Err(ScanError::Config("no usable error patterns configured".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_shape() {
        let config = Config::default();
        assert_eq!(config.settings.timeout, 10);
        assert_eq!(config.settings.max_redirects, 5);
        assert_eq!(config.settings.test_payloads.len(), 10);
        assert_eq!(config.settings.test_payloads[0], "'");
        assert_eq!(config.settings.error_patterns.len(), 23);
        assert_eq!(config.settings.common_directories.len(), 20);
        assert!(config.settings.headers.contains_key("Accept"));
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_all_default_patterns_compile() {
        let config = Config::default();
        assert_eq!(
            config.compiled_error_patterns().len(),
            config.settings.error_patterns.len()
        );
    }

    #[test]
    fn test_patterns_match_case_insensitively() {
        let config = Config::default();
        let patterns = config.compiled_error_patterns();
        assert!(patterns[0].is_match("sql syntax error near mysql"));
        assert!(patterns[0].is_match("SQL syntax ... MySQL"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(Some(Path::new("/nonexistent/config.json")));
        assert_eq!(config.settings.timeout, Config::default().settings.timeout);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.settings.test_payloads, config.settings.test_payloads);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.settings.timeout = 0;
        assert!(config.validate().is_err());
    }
}
