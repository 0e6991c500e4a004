//! Revenue Lens — decomposes a mobile-app revenue change between two
//! timeframes into per-KPI impacts and serves the result as an
//! interactive report.

use clap::{Parser, Subcommand};
use revlens_api::ApiServer;
use revlens_core::config::{AppConfig, ReportConfig};
use revlens_core::error::RevlensResult;
use revlens_core::types::SnapshotPair;
use revlens_engine::compute;
use revlens_reporting::{ExportFormat, ImpactReportBuilder};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "revenue-lens")]
#[command(about = "Per-KPI revenue impact reports for mobile apps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API server and interactive dashboard
    Serve {
        /// Bind host (overrides config)
        #[arg(long, env = "REVENUE_LENS__API__HOST")]
        host: Option<String>,

        /// HTTP port (overrides config)
        #[arg(long, env = "REVENUE_LENS__API__HTTP_PORT")]
        http_port: Option<u16>,

        /// Metrics port (overrides config)
        #[arg(long, env = "REVENUE_LENS__METRICS__PORT")]
        metrics_port: Option<u16>,
    },
    /// Compute a one-shot report and print it to stdout
    Compute {
        /// Path to a JSON snapshot pair ({"old": {...}, "new": {...}}).
        /// The built-in demo pair is used when omitted.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output format: text, json, csv, or html
        #[arg(long, default_value = "text")]
        format: ExportFormat,

        /// Currency prefix for rendered amounts
        #[arg(long, default_value = "$")]
        currency: String,
    },
}

fn run_compute(
    input: Option<PathBuf>,
    format: ExportFormat,
    currency: String,
) -> RevlensResult<String> {
    let pair = match input {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let pair: SnapshotPair = serde_json::from_str(&raw)?;
            pair.validate()?;
            pair
        }
        None => SnapshotPair::demo(),
    };

    let result = compute(&pair.old, &pair.new);
    let report = ImpactReportBuilder::from_config(&ReportConfig {
        currency_symbol: currency,
        ..ReportConfig::default()
    })
    .build(&result);
    report.render(format)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; reports go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revenue_lens=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            http_port,
            metrics_port,
        } => {
            info!("Revenue Lens starting up");

            // Load configuration
            let mut config = AppConfig::load().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                AppConfig::default()
            });

            // Apply CLI overrides
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = http_port {
                config.api.http_port = port;
            }
            if let Some(port) = metrics_port {
                config.metrics.port = port;
            }

            info!(
                host = %config.api.host,
                http_port = config.api.http_port,
                metrics_port = config.metrics.port,
                "Configuration loaded"
            );

            let server = ApiServer::new(config);

            // Start metrics exporter
            if let Err(e) = server.start_metrics().await {
                error!(error = %e, "Failed to start metrics exporter");
            }

            info!("Revenue Lens is ready to serve traffic");

            // Start HTTP server (blocks until shutdown)
            server.start_http().await?;
        }
        Command::Compute {
            input,
            format,
            currency,
        } => {
            let report = run_compute(input, format, currency)?;
            println!("{report}");
        }
    }

    Ok(())
}
