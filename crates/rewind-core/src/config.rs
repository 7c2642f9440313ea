use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the store directory's parent.
pub const CONFIG_FILE: &str = "rewind.toml";

/// Environment override for the store directory.
pub const DIR_ENV: &str = "REWIND_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the per-document log files and session state.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedConfig {
    /// Content of the single starter task a brand-new document is seeded
    /// with.
    #[serde(default = "default_seed_content")]
    pub content: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            content: default_seed_content(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".rewind")
}

fn default_seed_content() -> String {
    "feed the cat".to_string()
}

impl Config {
    /// Load config from `path`, falling back to defaults when the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config at {}", path.display()))
    }

    /// The store directory, honoring the `REWIND_DIR` environment override.
    #[must_use]
    pub fn store_dir(&self) -> PathBuf {
        env::var_os(DIR_ENV)
            .map_or_else(|| self.store.dir.clone(), PathBuf::from)
    }
}
