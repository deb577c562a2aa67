use std::path::PathBuf;

use clap::Parser;
use roster_config::{get_config_path, Config, LogConfig, PORT_ENV};
use roster_store::UserStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod handlers;
mod server;

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "Serve the roster user directory over HTTP")]
#[command(version)]
struct Args {
    #[arg(long, help = "Path to config.toml (defaults to $ROSTER_CONFIG or ~/.config/roster/config.toml)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Address to bind")]
    host: Option<String>,
    #[arg(short, long, help = "Port to listen on")]
    port: Option<u16>,
    #[arg(long, help = "Default log filter, overridden by RUST_LOG")]
    log_level: Option<String>,
    #[arg(long, help = "Start with an empty user store")]
    no_seed: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if self.no_seed {
            config.store.seed = false;
        }
    }
}

fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log.level))?;

    match &log.file {
        Some(path) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(get_config_path);
    let mut config = Config::load_from(&config_path)?;
    config.apply_env(std::env::var(PORT_ENV).ok().as_deref())?;
    args.apply(&mut config);

    init_logging(&config.log)?;
    info!("Loaded config from {}", config_path.display());

    let store = if config.store.seed {
        UserStore::seeded()
    } else {
        UserStore::new()
    };

    let server = server::RosterServer::new(config.server, store);

    info!("Starting roster server");
    server.run().await?;

    Ok(())
}
