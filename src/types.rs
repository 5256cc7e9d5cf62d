// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Injection technique a probe tests for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Technique {
    ErrorBased,
    BooleanBased,
    TimeBased,
    UnionBased,
}

impl Technique {
    pub fn label(&self) -> &'static str {
        match self {
            Technique::ErrorBased => "error-based",
            Technique::BooleanBased => "boolean-based blind",
            Technique::TimeBased => "time-based blind",
            Technique::UnionBased => "union-based",
        }
    }
}

/// One query-string parameter under test. Immutable for the duration of
/// its probing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetParameter {
    pub base_url: String,
    pub name: String,
    pub baseline_value: String,
}

impl TargetParameter {
    pub fn new(base_url: &str, name: &str, baseline_value: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            name: name.to_string(),
            baseline_value: baseline_value.to_string(),
        }
    }

    /// Build a test URL by appending the payload directly to the baseline
    /// value. Deliberately unencoded: the payload must reach the server
    /// exactly as written, quirks included.
    pub fn test_url(&self, payload: &str) -> String {
        format!(
            "{}?{}={}{}",
            self.base_url, self.name, self.baseline_value, payload
        )
    }

    /// URL with the untouched baseline value
    pub fn baseline_url(&self) -> String {
        self.test_url("")
    }
}

/// Verdict of a single probe invocation. Never merged across techniques.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub technique: Technique,
    pub vulnerable: bool,
    pub payload: Option<String>,
    pub evidence: Option<String>,
}

impl ProbeResult {
    pub fn clean(technique: Technique) -> Self {
        Self {
            technique,
            vulnerable: false,
            payload: None,
            evidence: None,
        }
    }

    pub fn vulnerable(technique: Technique, payload: &str, evidence: String) -> Self {
        Self {
            technique,
            vulnerable: true,
            payload: Some(payload.to_string()),
            evidence: Some(evidence),
        }
    }
}

/// Per-parameter findings, built incrementally by the orchestrator and
/// finalized once per parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub parameter: String,
    pub probes: Vec<ProbeResult>,
    pub extracted_info: BTreeMap<String, String>,
    pub found_tables: Vec<String>,
    pub found_columns: BTreeMap<String, Vec<String>>,
}

impl ScanReport {
    pub fn new(parameter: &str) -> Self {
        Self {
            parameter: parameter.to_string(),
            probes: Vec::new(),
            extracted_info: BTreeMap::new(),
            found_tables: Vec::new(),
            found_columns: BTreeMap::new(),
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        self.probes.iter().any(|p| p.vulnerable)
    }
}

/// Whole-run result handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub target: String,
    pub scan_start: String,
    pub scan_end: String,
    pub reports: Vec<ScanReport>,
    /// Explanatory note for non-error conditions (e.g. no query parameters)
    pub note: Option<String>,
    pub open_directories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_url_is_raw_concatenation() {
        let param = TargetParameter::new("http://t/p.php", "id", "1");
        assert_eq!(param.test_url("'"), "http://t/p.php?id=1'");
        assert_eq!(
            param.test_url(" AND 1=1"),
            "http://t/p.php?id=1 AND 1=1"
        );
        assert_eq!(param.baseline_url(), "http://t/p.php?id=1");
    }

    #[test]
    fn test_report_vulnerability_aggregation() {
        let mut report = ScanReport::new("id");
        report.probes.push(ProbeResult::clean(Technique::ErrorBased));
        assert!(!report.is_vulnerable());

        report.probes.push(ProbeResult::vulnerable(
            Technique::BooleanBased,
            "AND 1=1/1=2",
            "status differs".to_string(),
        ));
        assert!(report.is_vulnerable());
    }
}
