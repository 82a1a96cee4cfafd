//! Configuration builder: file loading, environment merge, overrides.

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::environment::EnvironmentConfig;
use super::schema::Config;

/// Names of the configuration files looked up in the working directory,
/// in merge order (the later, private file wins).
const CONFIG_FILES: [&str; 2] = ["salle.yaml", "salle.local.yaml"];

/// Builder assembling a validated [`Config`] from all sources.
///
/// # Examples
///
/// ```no_run
/// use salle::config::ConfigBuilder;
/// use std::path::Path;
///
/// let config = ConfigBuilder::new()
///     .with_working_dir(Path::new("/srv/booking"))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Creates a builder with default behavior: load files from the
    /// current directory, apply environment overrides, no programmatic
    /// overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory searched for `salle.yaml` / `salle.local.yaml`.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Disables configuration file loading.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Disables environment variable overrides.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Adds a programmatic override layer (highest precedence; later calls
    /// win over earlier ones).
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Assembles and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read
    /// or parsed, an environment variable does not parse, or the merged
    /// result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            let dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            for name in CONFIG_FILES {
                let path = dir.join(name);
                if path.exists() {
                    let text = std::fs::read_to_string(&path)?;
                    let layer: Config = serde_yaml::from_str(&text)?;
                    config = config.merged_with(layer);
                }
            }
        }

        if !self.skip_env {
            config = config.merged_with(EnvironmentConfig::load()?);
        }

        for layer in self.overrides {
            config = config.merged_with(layer);
        }

        config.validate()?;
        Ok(config)
    }
}
