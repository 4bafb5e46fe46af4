use std::path::PathBuf;
use std::sync::Arc;

use agency_core::config::Config;
use agency_core::Store;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "agency-server",
    about = "HTTP API for the agency workflow manager — clients, projects, leads, tasks, analytics",
    version
)]
struct Cli {
    /// Path to agency.yaml (optional)
    #[arg(long, env = "AGENCY_CONFIG")]
    config: Option<PathBuf>,

    /// Database file path (overrides the config file)
    #[arg(long, env = "AGENCY_DB")]
    db: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(long, env = "AGENCY_PORT")]
    port: Option<u16>,
}

const SETUP_INSTRUCTIONS: &str = "\
No database configured.

Set the database path one of these ways:

  1. Environment variable:   AGENCY_DB=/var/lib/agency/agency.db agency-server
  2. Command line:           agency-server --db /var/lib/agency/agency.db
  3. Config file:            echo 'db_path: /var/lib/agency/agency.db' > agency.yaml
                             agency-server --config agency.yaml

The file is created on first start.";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let Some(db_path) = config.db_path else {
        eprintln!("{SETUP_INSTRUCTIONS}");
        std::process::exit(2);
    };

    let store = Arc::new(Store::open(&db_path)?);
    agency_server::serve(store, &config.service_name, config.port).await
}
