//! VarLens API server binary.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use varlens_api::{server::run_server, AppState, ServerConfig};

/// VarLens Value at Risk REST API Server
#[derive(Parser, Debug)]
#[command(name = "varlens-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "VARLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to (overrides the configuration file)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on (overrides the configuration file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Estimation timeout in milliseconds (overrides the configuration file)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Default Monte Carlo seed (overrides the configuration file)
    #[arg(long, env = "VARLENS_SEED")]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("VarLens API server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            ServerConfig::from_file(path)?
        }
        None => {
            tracing::info!("Using default configuration");
            ServerConfig::default()
        }
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(seed) = args.seed {
        config.engine.seed = Some(seed);
    }

    let state = AppState::from_config(&config)?;
    run_server(state, &config.bind_address()).await
}
