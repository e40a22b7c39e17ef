//! SIA transmitter binary
//!
//! Usage: sia_transmitter --config config/encrypted_config.json [--cases config/test_cases.json]
//!
//! Without `--cases` the transmitter fuzzes indefinitely until Ctrl-C; the
//! message in flight always completes first.

use anyhow::{Context, Result};
use clap::Parser;
use network::{TcpClientConfig, TcpTransport};
use sia_transmitter::{LoopController, RngSource, TestCaseSelector, TracingSink};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use transmitter_config::{load_test_cases, TransmitterConfig};

#[derive(Parser, Debug)]
#[clap(name = "sia_transmitter", about = "Send SIA DC-09 test messages to a receiver")]
struct Args {
    /// Transmitter configuration file (JSON or TOML)
    #[clap(long, default_value = "config/encrypted_config.json")]
    config: PathBuf,

    /// JSON list of scripted test cases; fuzz randomly when omitted
    #[clap(long)]
    cases: Option<PathBuf>,

    /// Override the delay between messages
    #[clap(long)]
    delay_ms: Option<u64>,

    /// Seed for reproducible fuzzing
    #[clap(long)]
    seed: Option<u64>,

    /// Emit logs as JSON
    #[clap(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs);

    let mut config = TransmitterConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    if let Some(delay_ms) = args.delay_ms {
        config = config.with_delay(Duration::from_millis(delay_ms));
    }

    let cases = args
        .cases
        .as_deref()
        .map(load_test_cases)
        .transpose()
        .context("Failed to load test cases")?;

    let random = match args.seed {
        Some(seed) => {
            info!("Using fixed random seed {}", seed);
            RngSource::seeded(seed)
        }
        None => RngSource::from_entropy(),
    };

    let transport = TcpTransport::from_config(TcpClientConfig {
        connect_timeout: config.connect_timeout,
        response_limit: config.response_limit,
        ..TcpClientConfig::new(config.address())
    })?;
    let selector = TestCaseSelector::from_cases(cases, config.account_id.clone(), random);
    let controller = LoopController::new(
        transport,
        selector,
        TracingSink,
        config.key.clone(),
        config.delay,
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Ctrl-C received, stopping after the current message");
    };

    let summary = controller.run_until(shutdown).await?;
    info!(
        "Sent {} messages ({} bytes), received {} bytes",
        summary.messages_sent, summary.bytes_sent, summary.bytes_received
    );
    Ok(())
}
