// src/scanner.rs
//! Scan orchestration: per parameter, run the four technique probes in
//! fixed order, aggregate their verdicts, and trigger schema enumeration
//! when any of them fired. One [`ScanReport`] per parameter.

use crate::config::Config;
use crate::dirscan::DirectoryScanner;
use crate::enumerator::SchemaEnumerator;
use crate::error::ScanError;
use crate::http_client::{HttpClient, HttpGet};
use crate::probes::probe_set;
use crate::types::{ProbeResult, ScanOutcome, ScanReport, TargetParameter};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Run a full scan against a target URL using the production HTTP client
pub async fn scan_target(config: Arc<Config>, target: &str) -> Result<ScanOutcome, ScanError> {
    let client: Arc<dyn HttpGet> = Arc::new(HttpClient::new(config.clone())?);
    scan_target_with(config, client, target).await
}

/// Scan with an explicit HTTP capability. The seam the tests use to
/// substitute a scripted client.
pub async fn scan_target_with(
    config: Arc<Config>,
    client: Arc<dyn HttpGet>,
    target: &str,
) -> Result<ScanOutcome, ScanError> {
    let scan_start = chrono::Utc::now();

    let parsed = Url::parse(target)
        .map_err(|e| ScanError::Target(format!("invalid target URL: {}", e)))?;

    info!("🔍 Starting scan of {}", target);

    // Initial accessibility check: anything but a plain 200 fails the
    // scan before any probing happens
    match client.get(target).await {
        Ok(response) if response.status == 200 => {}
        Ok(response) => {
            return Err(ScanError::Target(format!(
                "target is not accessible (status {})",
                response.status
            )));
        }
        Err(e) => {
            return Err(ScanError::Target(format!("target is not accessible: {}", e)));
        }
    }

    let base_url = {
        let mut base = parsed.clone();
        base.set_query(None);
        base.set_fragment(None);
        base.to_string()
    };

    // Raw key=value pairs, split on the first '='; pairs without '=' are skipped
    let parameters: Vec<TargetParameter> = parsed
        .query()
        .unwrap_or("")
        .split('&')
        .filter_map(|pair| {
            pair.split_once('=')
                .map(|(name, value)| TargetParameter::new(&base_url, name, value))
        })
        .collect();

    let note = if parameters.is_empty() {
        info!("No query parameters found in target URL");
        Some(
            "no query parameters found; injection testing requires parameters \
             (example: http://example.com/page.php?id=1)"
                .to_string(),
        )
    } else {
        None
    };

    let probes = probe_set(&config, client.clone());
    let enumerator = SchemaEnumerator::new(client.clone());
    let mut reports = Vec::new();

    for parameter in &parameters {
        info!("Testing parameter '{}'", parameter.name);
        let mut report = ScanReport::new(&parameter.name);

        // Fixed technique order: error, boolean, time, union. A failing
        // probe is recorded as clean and never aborts the remaining ones.
        for probe in &probes {
            match probe.probe(parameter).await {
                Ok(result) => report.probes.push(result),
                Err(e) => {
                    warn!(
                        "{} probe failed on '{}': {}",
                        probe.technique().label(),
                        parameter.name,
                        e
                    );
                    report.probes.push(ProbeResult::clean(probe.technique()));
                }
            }
        }

        if report.is_vulnerable() {
            info!("⚠️ Parameter '{}' is vulnerable, enumerating schema", parameter.name);

            report.extracted_info = enumerator.extract_database_info(parameter).await;
            report.found_tables = enumerator.enumerate_tables(parameter).await;

            for table in report.found_tables.clone() {
                let columns = enumerator.enumerate_columns(parameter, &table).await;
                if !columns.is_empty() {
                    report.found_columns.insert(table, columns);
                }
            }
        }

        reports.push(report);
    }

    let open_directories = DirectoryScanner::new(&config, client).scan(&base_url).await;

    let scan_end = chrono::Utc::now();
    info!("✅ Scan complete ({} parameters tested)", reports.len());

    Ok(ScanOutcome {
        target: target.to_string(),
        scan_start: scan_start.to_rfc3339(),
        scan_end: scan_end.to_rfc3339(),
        reports,
        note,
        open_directories,
    })
}

/// Print scan results in human-readable format
pub fn print_results(outcome: &ScanOutcome, short: bool) {
    println!("\n{}", "═".repeat(70));
    println!("  SQL INJECTION SCAN RESULTS");
    println!("{}", "═".repeat(70));
    println!("Target: {}", outcome.target);
    println!("Scan duration: {} to {}", outcome.scan_start, outcome.scan_end);
    println!();

    if let Some(note) = &outcome.note {
        println!("ℹ️  {}", note);
        println!();
    }

    let vulnerable = outcome.reports.iter().filter(|r| r.is_vulnerable()).count();
    println!("📊 Summary:");
    println!("   Parameters tested: {}", outcome.reports.len());
    println!("   Vulnerable parameters: {}", vulnerable);
    println!("   Open directories: {}", outcome.open_directories.len());
    println!();

    for report in &outcome.reports {
        println!("🎯 Parameter: {}", report.parameter);

        for probe in &report.probes {
            if probe.vulnerable {
                println!(
                    "   ✅ {} | payload: {}",
                    probe.technique.label(),
                    probe.payload.as_deref().unwrap_or("-")
                );
                if let Some(evidence) = &probe.evidence {
                    println!("      evidence: {}", evidence);
                }
            } else if !short {
                println!("   ❌ {}", probe.technique.label());
            }
        }

        if !report.extracted_info.is_empty() {
            println!("   📋 Extracted info:");
            for (name, value) in &report.extracted_info {
                println!("      {}: {}", name, value);
            }
        }

        if !report.found_tables.is_empty() {
            println!("   📋 Tables: {}", report.found_tables.join(", "));
            for (table, columns) in &report.found_columns {
                println!("      {}: {}", table, columns.join(", "));
            }
        }

        println!();
    }

    if !outcome.open_directories.is_empty() {
        println!("📂 Directory listings:");
        for dir in &outcome.open_directories {
            println!("   - {}", dir);
        }
        println!();
    }

    println!("{}", "═".repeat(70));
}
