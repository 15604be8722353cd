//! Configuration façade.
//!
//! Every host stores the same three options somewhere different: a JSON file
//! next to the server, the host's own YAML config, or a schema-coded record
//! the host persists itself. Each backend implements [`ConfigProvider`] and
//! hands back one [`Configuration`].
//!
//! | Provider            | Backing store                         | `save`     |
//! |---------------------|---------------------------------------|------------|
//! | [`JsonFileProvider`]| `<config dir>/bedrock-voice-chat.json`| pretty JSON|
//! | [`YamlProvider`]    | host YAML file + bundled default      | YAML keys  |
//! | [`SchemaProvider`]  | host accessor                         | no-op      |

pub mod json;
pub mod schema;
pub mod yaml;

pub use json::JsonFileProvider;
pub use schema::{SchemaAccessor, SchemaProvider, SchemaRecord};
pub use yaml::YamlProvider;

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Effective lower bound on `minimum-players`, applied at pass time.
pub const MINIMUM_PLAYERS_FLOOR: i32 = 2;

// ---------------------------------------------------------------------------
// Configuration record
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Base URL of the coordination service.
    #[serde(
        rename = "bvc-server",
        alias = "bvcServer",
        deserialize_with = "null_as_empty"
    )]
    pub bvc_server: String,
    /// Sent verbatim in `X-MC-Access-Token`.
    #[serde(
        rename = "access-token",
        alias = "accessToken",
        deserialize_with = "null_as_empty"
    )]
    pub access_token: String,
    /// Values below [`MINIMUM_PLAYERS_FLOOR`] are kept as written and behave
    /// as the floor.
    #[serde(rename = "minimum-players", alias = "minimumPlayers")]
    pub minimum_players: i32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            bvc_server: String::new(),
            access_token: String::new(),
            minimum_players: MINIMUM_PLAYERS_FLOOR,
        }
    }
}

impl Configuration {
    pub fn new(
        bvc_server: impl Into<String>,
        access_token: impl Into<String>,
        minimum_players: i32,
    ) -> Self {
        Self {
            bvc_server: bvc_server.into(),
            access_token: access_token.into(),
            minimum_players,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the required options that are empty or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.bvc_server.trim().is_empty() {
            missing.push("bvc-server");
        }
        if self.access_token.trim().is_empty() {
            missing.push("access-token");
        }
        missing
    }

    /// Player count a pass needs before it emits anything.
    pub fn effective_minimum_players(&self) -> usize {
        self.minimum_players.max(MINIMUM_PLAYERS_FLOOR) as usize
    }
}

// The access token never reaches the logs.
impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let server: String = self.bvc_server.chars().take(20).collect();
        let token = if self.access_token.trim().is_empty() {
            "<blank>"
        } else {
            "***set***"
        };
        f.debug_struct("Configuration")
            .field("bvc_server", &server)
            .field("access_token", &token)
            .field("minimum_players", &self.minimum_players)
            .finish()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Provider port
// ---------------------------------------------------------------------------

/// Host-specific configuration backend.
pub trait ConfigProvider: Send + Sync {
    /// Read the current configuration. Never fails: unreadable input yields
    /// [`Configuration::default`], which is invalid and disables sampling.
    fn load(&self) -> Configuration;

    /// Materialise the default configuration if the host has none yet.
    fn create_default_if_missing(&self);

    /// Persist `config`. Hosts that own persistence keep the no-op.
    fn save(&self, _config: &Configuration) -> Result<()> {
        Ok(())
    }
}
