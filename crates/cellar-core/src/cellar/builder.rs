//! Builder for creating and configuring Cellar instances.

use std::path::{Path, PathBuf};

use log::debug;

use super::Cellar;
use crate::{
    config::EngineConfig,
    error::{CellarError, Result},
};

/// Builder for creating and configuring Cellar instances.
#[derive(Debug, Clone, Default)]
pub struct CellarBuilder {
    database_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    config: Option<EngineConfig>,
}

impl CellarBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cellar/cellar.db` or `~/.local/share/cellar/cellar.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets a configuration file to load.
    ///
    /// If not specified, `$XDG_CONFIG_HOME/cellar/config.toml` is used when
    /// it exists.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses `config` directly instead of reading a file.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the configured cellar instance.
    ///
    /// # Errors
    ///
    /// Returns `CellarError::FileSystem` if the database directory cannot be
    /// created or the config file cannot be read
    /// Returns `CellarError::Configuration` if the configuration is invalid
    /// Returns `CellarError::StoreUnavailable` if database initialization fails
    pub async fn build(self) -> Result<Cellar> {
        let config = match self.config {
            Some(config) => {
                config.validate()?;
                config
            }
            None => EngineConfig::load(self.config_path.as_deref())?,
        };

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CellarError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening cellar database at {}", db_path.display());
        let cellar = Cellar::new(db_path, config);
        // Fails early on an unusable database and creates the schema
        cellar.with_db(|_| Ok(())).await?;

        Ok(cellar)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cellar")
            .place_data_file("cellar.db")
            .map_err(|e| CellarError::XdgDirectory(e.to_string()))
    }
}
