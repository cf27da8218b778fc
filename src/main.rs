mod app;
mod cache;
mod clock;
mod commands;
mod config;
mod event;
mod filter;
mod membership;
mod schedule;
mod store;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bhakti")]
#[command(about = "A terminal devotional companion: prayers, rituals, and the daily puja schedule")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/bhakti/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Base URL of the remote store (overrides config and BHAKTI_STORE_URL)
  #[arg(short, long)]
  store_url: Option<String>,
}

/// Log to a file in the data directory; the terminal belongs to the TUI.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
  let log_dir = dirs::data_dir()
    .map(|d| d.join("bhakti"))
    .unwrap_or_else(|| PathBuf::from("."));
  std::fs::create_dir_all(&log_dir)?;

  let appender = tracing_appender::rolling::never(log_dir, "bhakti.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _log_guard = init_logging()?;

  // A store URL from the CLI or environment can stand in for a missing
  // config file; an explicit --config that fails to load is still fatal.
  let cli_url = args
    .store_url
    .clone()
    .or_else(config::Config::store_url_from_env);

  let config = match config::Config::load(args.config.as_deref()) {
    Ok(mut config) => {
      if let Some(url) = cli_url {
        config.store.url = url;
      }
      config
    }
    Err(e) => match cli_url {
      Some(url) if args.config.is_none() => config::Config::with_store_url(url),
      _ => return Err(e),
    },
  };

  // Initialize and run the app
  let mut app = app::App::new(config).await?;
  app.run().await?;

  Ok(())
}
