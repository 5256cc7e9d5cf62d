use clap::{Parser, Subcommand};
use glitchscan::config::Config;
use glitchscan::scanner;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "glitchscan")]
#[command(version = "1.0.0")]
#[command(about = "SQL injection vulnerability scanner with blind schema enumeration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a target URL for SQL injection vulnerabilities (AUTHORIZED USE ONLY)
    Scan {
        /// Target URL with query parameters (e.g. http://example.com/page.php?id=1)
        #[arg(short, long)]
        target: String,

        /// Confirm you are authorized to test this target
        #[arg(long)]
        confirm_authorized: bool,

        /// Configuration file (JSON); embedded defaults are used when absent
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Request timeout in seconds (overrides configuration)
        #[arg(long)]
        timeout: Option<u64>,

        /// Custom User-Agent string (overrides configuration)
        #[arg(long)]
        user_agent: Option<String>,

        /// Additional headers in key:value format
        #[arg(long)]
        headers: Vec<String>,

        /// Output format: json or text
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Output file path (if not specified, writes to stdout)
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// Short/concise output mode
        #[arg(long)]
        short: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Setup graceful shutdown
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                eprintln!("\nReceived shutdown signal, cleaning up...");
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                eprintln!("Error setting up signal handler: {}", e);
            }
        }
    });

    let cli = Cli::parse();

    tokio::select! {
        _ = run_command(cli) => {},
        _ = &mut shutdown_rx => {
            eprintln!("Shutting down gracefully");
        }
    }
}

async fn run_command(cli: Cli) {
    match cli.command {
        Commands::Scan {
            target,
            confirm_authorized,
            config,
            timeout,
            user_agent,
            headers,
            output,
            output_file,
            short,
        } => {
            handle_scan(
                target,
                confirm_authorized,
                config,
                timeout,
                user_agent,
                headers,
                output,
                output_file,
                short,
            )
            .await;
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_scan(
    target: String,
    confirm_authorized: bool,
    config_path: Option<PathBuf>,
    timeout: Option<u64>,
    user_agent: Option<String>,
    headers: Vec<String>,
    output_format: String,
    output_file: Option<PathBuf>,
    short: bool,
) {
    // CRITICAL SAFETY CHECK: Require explicit authorization
    if !confirm_authorized {
        eprintln!("\n{}", "═".repeat(70));
        eprintln!("  ⛔ AUTHORIZATION REQUIRED");
        eprintln!("{}", "═".repeat(70));
        eprintln!("This SQL injection scanner is for AUTHORIZED security testing ONLY.");
        eprintln!("\nRe-run with --confirm-authorized to acknowledge you have permission.");
        eprintln!("\n⚖️  LEGAL WARNING:");
        eprintln!("   Using this tool without authorization is ILLEGAL and may result");
        eprintln!("   in criminal prosecution under computer fraud and abuse laws.");
        eprintln!("\n   Only test systems you own or have explicit written permission");
        eprintln!("   to assess.");
        eprintln!("{}\n", "═".repeat(70));
        std::process::exit(1);
    }

    print_banner();

    // Load configuration (embedded defaults when no file is given or the
    // file is unusable), then apply command-line overrides
    let mut config = Config::load_or_default(config_path.as_deref());

    if let Some(timeout) = timeout {
        config.settings.timeout = timeout;
    }
    if let Some(user_agent) = user_agent {
        config.settings.user_agent = user_agent;
    }
    for header in headers {
        if let Some((k, v)) = header.split_once(':') {
            config
                .settings
                .headers
                .insert(k.trim().to_string(), v.trim().to_string());
        }
    }

    if let Err(e) = config.validate() {
        eprintln!("⛔ Configuration error: {}", e);
        eprintln!("   Please check your settings and try again.");
        std::process::exit(1);
    }

    println!("\n🚀 Starting SQL injection vulnerability scan");
    println!("   Target: {}", target);
    println!(
        "   Scan initiated at: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    match scanner::scan_target(Arc::new(config), &target).await {
        Ok(outcome) => match output_format.as_str() {
            "json" => {
                let json = match serde_json::to_string_pretty(&outcome) {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("⛔ Failed to serialize results: {}", e);
                        std::process::exit(1);
                    }
                };

                if let Some(path) = output_file {
                    match std::fs::write(&path, json) {
                        Ok(()) => println!("✓ Results saved to: {}", path.display()),
                        Err(e) => eprintln!("⛔ Failed to write output file: {}", e),
                    }
                } else {
                    println!("{}", json);
                }
            }
            _ => {
                scanner::print_results(&outcome, short);

                if let Some(path) = output_file {
                    let mut text = String::new();
                    text.push_str("SQL INJECTION SCAN RESULTS\n");
                    text.push_str(&format!("Target: {}\n", outcome.target));
                    let vulnerable =
                        outcome.reports.iter().filter(|r| r.is_vulnerable()).count();
                    text.push_str(&format!("Vulnerable parameters: {}\n", vulnerable));

                    match std::fs::write(&path, text) {
                        Ok(()) => println!("\n✓ Results also saved to: {}", path.display()),
                        Err(e) => eprintln!("\n⛔ Failed to write output file: {}", e),
                    }
                }
            }
        },
        Err(e) => {
            eprintln!("\n⛔ Scan failed: {}", e);
            eprintln!("   Please check your configuration and network connectivity.");
            std::process::exit(1);
        }
    }
}

fn print_banner() {
    println!("\n{}", "═".repeat(70));
    println!("  GLITCHSCAN - SQL INJECTION SCANNER - AUTHORIZED USE ONLY");
    println!("{}", "═".repeat(70));
    println!("📋 Test methodology:");
    println!("   • Error-based detection (database error signatures)");
    println!("   • Boolean-based blind detection (differential responses)");
    println!("   • Time-based blind detection (induced delays)");
    println!("   • Union-based detection (column-count discovery)");
    println!("   • Blind schema enumeration (candidate dictionaries)");

    println!("\n⚖️  LEGAL REMINDER:");
    println!("   Test ONLY systems you own or have explicit written");
    println!("   authorization to assess. Unauthorized testing is illegal.");
    println!("{}\n", "═".repeat(70));
}
