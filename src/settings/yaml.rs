//! Host-managed YAML config (plugin-style hosts).
//!
//! The host owns the file; the agent only reads the three keys and, on
//! request, materialises the bundled default resource.

use super::{ConfigProvider, Configuration, MINIMUM_PLAYERS_FLOOR};
use crate::error::Result;
use config::{Config, File, FileFormat};
use log::{debug, error, info};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config shipped with the agent, written verbatim on first start.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../resources/config.yml");

const SERVER_KEYS: [&str; 2] = ["bvc-server", "bvcServer"];
const TOKEN_KEYS: [&str; 2] = ["access-token", "accessToken"];
const MINIMUM_KEYS: [&str; 2] = ["minimum-players", "minimumPlayers"];

pub struct YamlProvider {
    path: PathBuf,
    default_resource: &'static str,
}

impl YamlProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            default_resource: DEFAULT_CONFIG_YAML,
        }
    }

    /// Use a host-specific default resource instead of the bundled one.
    pub fn with_default_resource(mut self, resource: &'static str) -> Self {
        self.default_resource = resource;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Configuration> {
        let settings = Config::builder()
            .add_source(
                File::from(self.path.as_path())
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .build()?;

        let minimum_players = MINIMUM_KEYS
            .iter()
            .find_map(|k| settings.get_int(k).ok())
            .map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .unwrap_or(MINIMUM_PLAYERS_FLOOR);

        Ok(Configuration {
            bvc_server: first_string(&settings, &SERVER_KEYS),
            access_token: first_string(&settings, &TOKEN_KEYS),
            minimum_players,
        })
    }
}

/// Hyphenated spelling first, then camelCase, then empty.
fn first_string(settings: &Config, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| settings.get_string(k).ok())
        .unwrap_or_default()
}

impl ConfigProvider for YamlProvider {
    fn load(&self) -> Configuration {
        match self.read() {
            Ok(config) => {
                debug!("Loaded config {:?} from {}", config, self.path.display());
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
        let written = self
            .path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| fs::write(&self.path, self.default_resource));
        match written {
            Ok(()) => info!("Default config created at {}", self.path.display()),
            Err(e) => error!("Failed to create default config: {}", e),
        }
    }

    /// Rewrites the three keys in place; other host keys are preserved.
    fn save(&self, config: &Configuration) -> Result<()> {
        let mut doc = if self.path.exists() {
            let text = fs::read_to_string(&self.path)?;
            match serde_yaml::from_str::<Value>(&text)? {
                Value::Mapping(m) => m,
                _ => Mapping::new(),
            }
        } else {
            Mapping::new()
        };

        for key in SERVER_KEYS.iter().chain(&TOKEN_KEYS).chain(&MINIMUM_KEYS) {
            doc.remove(*key);
        }
        doc.insert("bvc-server".into(), config.bvc_server.clone().into());
        doc.insert("access-token".into(), config.access_token.clone().into());
        doc.insert(
            "minimum-players".into(),
            Value::Number(config.minimum_players.into()),
        );

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(&Value::Mapping(doc))?)?;
        Ok(())
    }
}
