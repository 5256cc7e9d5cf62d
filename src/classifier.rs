// src/classifier.rs
//! Stateless response classification. Each helper answers one question
//! about a single response (or a pair of them) for one technique; all the
//! iteration and stop logic lives in the probes.

use crate::http_client::ProbeResponse;
use regex::Regex;

/// Delay the time-based payloads ask the database to inject
pub const INJECTED_DELAY_SECS: f64 = 5.0;

/// Allowance for ordinary network latency on top of the induced delay
pub const DETECTION_BUFFER_SECS: f64 = 1.0;

/// A response slower than this is treated as a triggered delay
pub const DELAY_THRESHOLD_SECS: f64 = INJECTED_DELAY_SECS - DETECTION_BUFFER_SECS;

/// Upper bound of the ORDER BY column-count escalation
pub const MAX_ORDER_BY_COLUMNS: usize = 19;

/// Test a body against the configured error signatures in list order,
/// returning the first matching pattern
pub fn first_error_match(body: &str, patterns: &[Regex]) -> Option<String> {
    patterns
        .iter()
        .find(|re| re.is_match(body))
        .map(|re| re.as_str().to_string())
}

/// Union-probe error oracle: HTTP 500, or the literal substring "error"
/// anywhere in the body (case-insensitive)
pub fn signals_query_error(response: &ProbeResponse) -> bool {
    response.status == 500 || response.body.to_lowercase().contains("error")
}

/// Boolean-probe differential verdict. Status difference wins over length
/// difference; equal status and equal length means no signal.
pub fn boolean_evidence(
    true_response: &ProbeResponse,
    false_response: &ProbeResponse,
) -> Option<&'static str> {
    if true_response.status != false_response.status {
        Some("status differs")
    } else if true_response.body.len() != false_response.body.len() {
        Some("length differs")
    } else {
        None
    }
}

/// Time-probe verdict on one measured latency
pub fn exceeds_delay_threshold(elapsed_secs: f64) -> bool {
    elapsed_secs > DELAY_THRESHOLD_SECS
}

/// Weak existence oracle used by the schema enumerator: any 200 with a
/// non-empty body counts as a hit. Known false-positive source, kept
/// faithful to observed behavior.
pub fn weak_existence_hit(response: &ProbeResponse) -> bool {
    response.status == 200 && !response.body.is_empty()
}

/// Markers indicating an exposed directory index
pub fn is_directory_listing(response: &ProbeResponse) -> bool {
    response.status == 200
        && (response.body.contains("Index of /")
            || response.body.contains("Directory Listing For")
            || response.body.contains("Parent Directory"))
}
