//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config`, else `<platform config dir>/vscache/config.toml`)
//! 3. `VSCACHE_*` environment variables
//! 4. Command-line flags
//!
//! Configuration is only ever read; nothing is written back between runs.
//!
//! ```toml
//! base_dir = "/home/user/.config"
//! variants = ["Code", "Code - Insiders"]
//! dry_run = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::inventory::resolver::SIDECAR_FILE;
use crate::inventory::{RootConfig, DEFAULT_VARIANTS, WORKSPACE_STORAGE_SUFFIX};

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "VSCACHE_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the editor variant folders. Defaults to the
    /// platform configuration directory (`~/.config` on Linux).
    pub base_dir: Option<PathBuf>,
    /// Editor variant folder names, checked in order.
    pub variants: Vec<String>,
    /// Path below each variant folder that holds the cache folders.
    pub storage_suffix: PathBuf,
    /// Sidecar descriptor file name inside each cache folder.
    pub sidecar_file: String,
    /// Never remove anything.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            variants: DEFAULT_VARIANTS.iter().map(|v| (*v).to_string()).collect(),
            storage_suffix: PathBuf::from(WORKSPACE_STORAGE_SUFFIX),
            sidecar_file: SIDECAR_FILE.to_string(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Load defaults, the TOML file and the environment.
    ///
    /// A missing default config file is fine; an explicitly named one must
    /// exist.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::default_config_path(),
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = &file {
            log::debug!("Reading configuration from {}", file.display());
            figment = figment.merge(Toml::file(file));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: Self = figment.extract().context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded layers.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.path {
            self.base_dir = Some(path.clone());
        }
        if cli.dry_run {
            self.dry_run = true;
        }
    }

    /// Reject settings that could never find a cache folder.
    pub fn validate(&self) -> Result<()> {
        if self.sidecar_file.trim().is_empty() {
            bail!("sidecar_file must not be empty");
        }
        if self.variants.iter().any(|v| v.trim().is_empty()) {
            bail!("variants must not contain empty names");
        }
        Ok(())
    }

    /// The base directory, falling back to the platform config directory.
    pub fn resolved_base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => BaseDirs::new()
                .map(|dirs| dirs.config_dir().to_path_buf())
                .context("failed to determine the home configuration directory"),
        }
    }

    /// One storage root per configured variant, in order.
    pub fn roots(&self) -> Result<Vec<RootConfig>> {
        let base = self.resolved_base_dir()?;
        Ok(self
            .variants
            .iter()
            .map(|variant| {
                RootConfig::new(&base, variant.as_str()).with_storage_suffix(&self.storage_suffix)
            })
            .collect())
    }

    /// Get the default platform-specific configuration file path.
    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "vscache", "vscache")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
