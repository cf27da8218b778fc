//! YAML configuration.
//!
//! Search order: explicit `--config` path, then `./bhakti.yaml`, then
//! `$XDG_CONFIG_HOME/bhakti/config.yaml`. A store URL from the CLI or the
//! `BHAKTI_STORE_URL` variable can stand in for a missing file entirely.

use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub store: StoreConfig,
  /// Header title override; the binary name is used when unset.
  pub title: Option<String>,
  /// Category tabs shown on the prayers page. The "All" sentinel is always
  /// available even if omitted here.
  #[serde(default = "default_categories")]
  pub categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  /// Base URL of the remote devotional store
  pub url: String,
}

fn default_categories() -> Vec<String> {
  ["All", "Morning", "Evening", "Aarti"]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Config {
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    if let Some(path) = explicit_path {
      if !path.exists() {
        return Err(eyre!("config file not found: {}", path.display()));
      }
      return Self::read(path);
    }

    match Self::search() {
      Some(path) => Self::read(&path),
      None => Err(eyre!(
        "no config file found; create ~/.config/bhakti/config.yaml or pass --store-url"
      )),
    }
  }

  /// Build a config from just a store URL, for when no file exists.
  pub fn with_store_url(url: impl Into<String>) -> Self {
    Self {
      store: StoreConfig { url: url.into() },
      title: None,
      categories: default_categories(),
    }
  }

  pub fn store_url_from_env() -> Option<String> {
    std::env::var("BHAKTI_STORE_URL").ok()
  }

  fn search() -> Option<PathBuf> {
    let local = PathBuf::from("bhakti.yaml");
    if local.exists() {
      return Some(local);
    }
    dirs::config_dir()
      .map(|dir| dir.join("bhakti").join("config.yaml"))
      .filter(|path| path.exists())
  }

  fn read(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .map_err(|e| eyre!("cannot read config {}: {}", path.display(), e))?;
    serde_yaml::from_str(&raw).map_err(|e| eyre!("invalid config {}: {}", path.display(), e))
  }
}
