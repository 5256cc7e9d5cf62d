// src/lib.rs
// glitchscan: SQL injection vulnerability scanner
// SAFETY: Designed for AUTHORIZED testing only

pub mod classifier;
pub mod config;
pub mod dirscan;
pub mod enumerator;
pub mod error;
pub mod http_client;
pub mod probes;
pub mod scanner;
pub mod types;

pub use config::Config;
pub use error::ScanError;
pub use scanner::{print_results, scan_target};
pub use types::{ProbeResult, ScanOutcome, ScanReport, TargetParameter, Technique};
