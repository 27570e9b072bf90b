//! E2E test harness entry point
//!
//! Runs the browser login specs against the hosted frontend.
//! Run with: cargo test --package sensecheck-e2e --test e2e
//!
//! Requires SENSECHECK_LIVE=1 plus SENSECHECK_FRONTEND_URL; without the
//! opt-in the harness skips so a plain `cargo test` stays hermetic.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sensecheck_common::ArtifactStore;
use sensecheck_e2e::playwright::{Browser, PlaywrightConfig};
use sensecheck_e2e::runner::RunnerConfig;
use sensecheck_e2e::target::TargetConfig;
use sensecheck_e2e::{E2eResult, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "sensecheck-e2e")]
#[command(about = "Browser login checks for the StockSense frontend")]
struct Args {
    /// Path to test specs directory
    #[arg(short, long, default_value = "crates/e2e/specs")]
    specs: PathBuf,

    /// Run only tests matching this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only a specific test by name
    #[arg(short, long)]
    name: Option<String>,

    /// Base URL of the hosted frontend
    #[arg(long, env = "SENSECHECK_FRONTEND_URL")]
    base_url: String,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Run in headless mode
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    viewport_height: u32,

    /// Seconds to wait for the target to become reachable
    #[arg(long, default_value = "60")]
    target_timeout: u64,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results/e2e")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if std::env::var("SENSECHECK_LIVE").as_deref() != Ok("1") {
        eprintln!("skipping browser harness (set SENSECHECK_LIVE=1 to run)");
        return;
    }

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(run(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn run(args: Args) -> E2eResult<bool> {
    let browser = match args.browser.as_str() {
        "firefox" => Browser::Firefox,
        "webkit" => Browser::Webkit,
        _ => Browser::Chromium,
    };

    let artifacts = ArtifactStore::new(&args.output)?;
    artifacts.write_environment(&[
        ("Frontend URL", args.base_url.clone()),
        ("Browser", args.browser.clone()),
        ("Run Date", chrono::Utc::now().to_rfc3339()),
        ("Suite Version", sensecheck_common::VERSION.to_string()),
    ])?;

    let config = RunnerConfig {
        target: TargetConfig {
            base_url: args.base_url.clone(),
            ready_timeout: Duration::from_secs(args.target_timeout),
            ..Default::default()
        },
        playwright: PlaywrightConfig {
            browser,
            headless: args.headless,
            viewport_width: args.viewport_width,
            viewport_height: args.viewport_height,
            screenshot_dir: args.output.join("screenshots"),
            ..Default::default()
        },
        specs_dir: args.specs,
        output_dir: args.output,
    };

    let mut runner = TestRunner::with_config(config);

    let suite = if let Some(name) = &args.name {
        let result = runner.run_test(name).await?;
        sensecheck_e2e::runner::TestSuiteResult {
            total: 1,
            passed: result.success as usize,
            failed: !result.success as usize,
            duration_ms: result.duration_ms,
            results: vec![result],
        }
    } else if let Some(tag) = &args.tag {
        runner.run_tagged(tag).await?
    } else {
        runner.run_all().await?
    };

    runner.write_results(&suite)?;
    Ok(suite.failed == 0)
}
