//! Configuration file and environment handling.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use trailog_core::{activity::Location, persist::DEFAULT_KEY};

/// Settings read from `trailog.toml` and `TRAILOG_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite database holding the stored activities.
  #[serde(default = "default_store_path")]
  pub store_path:       PathBuf,
  /// Key the activity list is stored under.
  #[serde(default = "default_storage_key")]
  pub storage_key:      String,
  /// Position used when `add` is not given one, as `[latitude, longitude]`.
  #[serde(default)]
  pub default_location: Option<Location>,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.trailog.db") }

fn default_storage_key() -> String { DEFAULT_KEY.to_owned() }

impl Settings {
  /// Layer the optional config file under the `TRAILOG_*` environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::load_with_env(path, config::Environment::with_prefix("TRAILOG"))
  }

  fn load_with_env(path: &Path, env: config::Environment) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
