// src/error.rs
//! Error types for the scanner.
//!
//! Transport failures are recovered inside the probe/enumerator loop that
//! issued the request; only configuration and target-level problems are
//! allowed to fail a scan.

use std::fmt;

/// Main error type for scanner operations
#[derive(Debug)]
pub enum ScanError {
    /// HTTP request/response error (connection refused, timeout, DNS failure)
    Http(String),

    /// URL or data parsing error
    Parse(String),

    /// Configuration validation error
    Config(String),

    /// Malformed or unreachable target; fails the scan before any probing
    Target(String),

    /// I/O error (file operations)
    Io(std::io::Error),
}

impl std::error::Error for ScanError {}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanError::Http(s) => write!(f, "HTTP error: {}", s),
            ScanError::Parse(s) => write!(f, "Parse error: {}", s),
            ScanError::Config(s) => write!(f, "Configuration error: {}", s),
            ScanError::Target(s) => write!(f, "Target error: {}", s),
            ScanError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl From<std::io::Error> for ScanError {
    fn from(e: std::io::Error) -> Self {
        ScanError::Io(e)
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        ScanError::Http(e.to_string())
    }
}

impl From<url::ParseError> for ScanError {
    fn from(e: url::ParseError) -> Self {
        ScanError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error() {
        let error = ScanError::Http("Connection timeout".to_string());
        assert_eq!(error.to_string(), "HTTP error: Connection timeout");
    }

    #[test]
    fn test_target_error() {
        let error = ScanError::Target("not accessible".to_string());
        assert_eq!(error.to_string(), "Target error: not accessible");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let scan_error: ScanError = io_error.into();
        assert!(matches!(scan_error, ScanError::Io(_)));
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let parse_error = url::Url::parse("not a valid url").unwrap_err();
        let scan_error: ScanError = parse_error.into();
        assert!(matches!(scan_error, ScanError::Parse(_)));
    }

    #[test]
    fn test_error_trait_implemented() {
        let error = ScanError::Config("Test".to_string());
        let _: &dyn std::error::Error = &error;
    }
}
