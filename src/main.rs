//! # StudyDesk — task list and study-time log over HTTP
//!
//! Usage:
//!   studydesk                          # Serve on 0.0.0.0:3000, files in the working directory
//!   studydesk --port 8080              # Custom port
//!   studydesk --data-dir ~/.studydesk  # Keep tasks.json / study_time.json elsewhere
//!   studydesk --config studydesk.toml  # Load settings from a TOML file

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use studydesk_core::StudyDeskConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "studydesk",
    version,
    about = "📚 StudyDesk — tasks and study-time tracking API"
)]
struct Cli {
    /// Config file (defaults to ./studydesk.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the collection files
    #[arg(long)]
    data_dir: Option<String>,

    /// Serialize load-modify-save cycles per collection
    #[arg(long)]
    serialize_writes: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

impl Cli {
    /// Resolve the config file, then let flags override it.
    fn into_config(self) -> Result<StudyDeskConfig> {
        let mut config = match &self.config {
            Some(path) => StudyDeskConfig::load_from(path)?,
            None => StudyDeskConfig::load()?,
        };
        if let Some(host) = self.host {
            config.gateway.host = host;
        }
        if let Some(port) = self.port {
            config.gateway.port = port;
        }
        if let Some(dir) = self.data_dir {
            config.storage.data_dir = expand_path(&dir);
        }
        if self.serialize_writes {
            config.storage.serialize_writes = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "studydesk=debug,studydesk_gateway=debug,studydesk_tracker=debug,tower_http=debug"
    } else {
        "studydesk=info,studydesk_gateway=info,studydesk_tracker=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let config = cli.into_config()?;
    tracing::info!("📚 StudyDesk v{}", env!("CARGO_PKG_VERSION"));

    studydesk_gateway::start(config).await?;
    Ok(())
}
