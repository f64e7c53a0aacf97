//! Cloud Directory demo
//!
//! Connects to AWS Cloud Directory, creates a three-level object hierarchy
//! in the first ENABLED directory and times repeated reads of its leaf.
//! Assumes the schema is already published and applied to the directory.
//!
//! Usage:
//!   clouddir-demo --profile my-profile --iterations 10

use anyhow::{Context, Result};
use clap::Parser;
use clouddir_client::{AwsDirectoryClient, ClientConfig};
use clouddir_demo::{DEFAULT_ITERATIONS, DemoSettings, DirectoryDemoRunner, hierarchy};
use clouddir_types::ObjectPath;
use std::io::Write;
use tracing::{Level, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "clouddir-demo")]
#[command(about = "AWS Cloud Directory demo: hierarchy creation and read latency")]
struct Args {
    /// Credentials profile (overrides AWS_PROFILE)
    #[arg(long)]
    profile: Option<String>,

    /// Service region (overrides AWS_REGION)
    #[arg(long)]
    region: Option<String>,

    /// Endpoint override (overrides CLOUDDIR_ENDPOINT_URL)
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Number of timed read iterations
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Object read on every iteration
    #[arg(long, default_value = hierarchy::DEFAULT_LEAF_PATH)]
    leaf_path: String,

    /// Print the run report as JSON on stdout; latency lines move to stderr
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(log_level).into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = ClientConfig::load(ClientConfig {
        profile: args.profile,
        region: args.region,
        endpoint_url: args.endpoint_url,
    })
    .context("reading client configuration")?;

    info!("Connecting to Cloud Directory...");
    let client = AwsDirectoryClient::connect(&config)
        .await
        .context("connecting to Cloud Directory")?;

    let settings = DemoSettings {
        iterations: args.iterations,
        leaf_path: ObjectPath::new(args.leaf_path),
        ..Default::default()
    };
    let runner = DirectoryDemoRunner::new(client, settings);
    info!(
        "Sampling {} {} times",
        runner.settings().leaf_path,
        runner.settings().iterations
    );

    // With --json, stdout carries only the report.
    let mut latency_out: Box<dyn Write> = if args.json {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };
    let report = runner
        .run(&mut latency_out)
        .await
        .context("demo workflow failed")?;

    if args.json {
        report
            .write_json(&mut std::io::stdout().lock())
            .context("writing JSON report")?;
    }
    info!(
        "Demo finished: {} objects created, {} samples",
        report.created.len(),
        report.samples.len()
    );
    Ok(())
}
