//! JSON file provider for hosts that give the agent a config directory.

use super::{ConfigProvider, Configuration};
use crate::error::Result;
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "bedrock-voice-chat.json";

pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    /// Provider for `<config_dir>/bedrock-voice-chat.json`.
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            path: config_dir.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Configuration> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn write(&self, config: &Configuration) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

impl ConfigProvider for JsonFileProvider {
    fn load(&self) -> Configuration {
        debug!("Looking for config at {}", self.path.display());

        if !self.path.exists() {
            warn!(
                "Config not found at {}, creating default config",
                self.path.display()
            );
            self.create_default_if_missing();
            return Configuration::default();
        }

        match self.read() {
            Ok(config) => {
                debug!("Loaded config {:?}", config);
                config
            }
            Err(e) => {
                error!("Failed to load config from {}: {}", self.path.display(), e);
                Configuration::default()
            }
        }
    }

    fn create_default_if_missing(&self) {
        if self.path.exists() {
            return;
        }
        match self.write(&Configuration::default()) {
            Ok(()) => info!("Default config created at {}", self.path.display()),
            Err(e) => error!("Failed to create default config: {}", e),
        }
    }

    fn save(&self, config: &Configuration) -> Result<()> {
        self.write(config)
    }
}
