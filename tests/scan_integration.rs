//! End-to-end scan tests against a local mock HTTP server.
//!
//! These exercise the full orchestrator through the production reqwest
//! client: accessibility check, the four technique probes in order,
//! conditional schema enumeration and the directory-listing pass.

use glitchscan::config::Config;
use glitchscan::error::ScanError;
use glitchscan::scanner::scan_target;
use glitchscan::types::Technique;
use mockito::Server;
use std::sync::Arc;

fn test_config() -> Arc<Config> {
    Arc::new(Config::default())
}

#[tokio::test]
async fn test_error_leaking_target_detected_and_enumerated() {
    let mut server = Server::new_async().await;

    // Every request leaks a MySQL error with a 200: the error-based probe
    // fires on its first payload and the weak existence oracle accepts
    // every schema candidate
    let _mock = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(200)
        .with_body("You have an error in your SQL syntax near '' at line 1 (MySQL)")
        .create_async()
        .await;

    let target = format!("{}/product.php?id=1", server.url());
    let outcome = scan_target(test_config(), &target).await.unwrap();

    assert_eq!(outcome.reports.len(), 1);
    let report = &outcome.reports[0];
    assert_eq!(report.parameter, "id");

    // Fixed technique order, error-based first
    assert_eq!(report.probes[0].technique, Technique::ErrorBased);
    assert!(report.probes[0].vulnerable);
    assert_eq!(report.probes[0].payload.as_deref(), Some("'"));

    // Identical responses for both boolean variants: no differential
    assert_eq!(report.probes[1].technique, Technique::BooleanBased);
    assert!(!report.probes[1].vulnerable);

    // Instant responses: no induced delay
    assert_eq!(report.probes[2].technique, Technique::TimeBased);
    assert!(!report.probes[2].vulnerable);

    // Body admits an error at ORDER BY 1, so column count is zero and
    // the string sweep has nothing to try
    assert_eq!(report.probes[3].technique, Technique::UnionBased);
    assert!(!report.probes[3].vulnerable);

    // Enumeration ran and the weak oracle accepted every candidate
    assert!(report.found_tables.contains(&"users".to_string()));
    assert!(report.found_columns["users"].contains(&"password".to_string()));
    // The delay oracle never fired, so no metadata was extracted
    assert!(report.extracted_info.is_empty());
}

#[tokio::test]
async fn test_benign_target_reports_nothing() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(200)
        .with_body("<html><body>Welcome to the catalog</body></html>")
        .create_async()
        .await;

    let target = format!("{}/product.php?id=1&page=2", server.url());
    let outcome = scan_target(test_config(), &target).await.unwrap();

    assert_eq!(outcome.reports.len(), 2);
    for report in &outcome.reports {
        assert!(!report.is_vulnerable());
        assert_eq!(report.probes.len(), 4);
        assert!(report.found_tables.is_empty());
        assert!(report.found_columns.is_empty());
        assert!(report.extracted_info.is_empty());
    }
    assert!(outcome.note.is_none());
    assert!(outcome.open_directories.is_empty());
}

#[tokio::test]
async fn test_parameterless_target_yields_note() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(200)
        .with_body("<html>home</html>")
        .create_async()
        .await;

    let target = format!("{}/index.php", server.url());
    let outcome = scan_target(test_config(), &target).await.unwrap();

    assert!(outcome.reports.is_empty());
    assert!(outcome.note.unwrap().contains("no query parameters"));
}

#[tokio::test]
async fn test_inaccessible_target_fails_the_scan() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let target = format!("{}/product.php?id=1", server.url());
    let result = scan_target(test_config(), &target).await;

    assert!(matches!(result, Err(ScanError::Target(_))));
}

#[tokio::test]
async fn test_unparseable_target_fails_the_scan() {
    let result = scan_target(test_config(), "not a url at all").await;

    assert!(matches!(result, Err(ScanError::Target(_))));
}

#[tokio::test]
async fn test_exposed_directory_reported() {
    let mut server = Server::new_async().await;

    // Catch-all first; mockito gives the later, more specific mock
    // precedence
    let _all = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(200)
        .with_body("<html>nothing to see</html>")
        .create_async()
        .await;

    let _backup = server
        .mock("GET", "/backup/")
        .with_status(200)
        .with_body("<title>Index of /backup</title>")
        .create_async()
        .await;

    let target = format!("{}/product.php?id=1", server.url());
    let outcome = scan_target(test_config(), &target).await.unwrap();

    assert_eq!(outcome.open_directories.len(), 1);
    assert!(outcome.open_directories[0].ends_with("/backup/"));
}
