//! Position wire protocol.
//!
//! This module owns **every message that crosses a process boundary**:
//! the position batch posted to the coordination service, and the host
//! events a sidecar host streams into the agent.
//!
//! ## Channels
//!
//! | Channel                  | Direction             | Carried by              |
//! |--------------------------|-----------------------|-------------------------|
//! | `POST /api/position`     | agent → coordinator   | HTTP, JSON body         |
//! | host events              | host → agent          | line-delimited JSON     |
//!
//! ## Design rules
//!
//! 1. Field names are fixed by the receiver. `orientation.x` is yaw and
//!    `orientation.y` is pitch.
//! 2. `dimension` and `world_uuid` are always emitted, `null` when unknown.
//! 3. Each POST is a full snapshot; the receiver must not depend on order.

use crate::error::{AgentError, Result};
use crate::types::{Coordinates, Dimension, GameType, Orientation};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Endpoint contract
// ---------------------------------------------------------------------------

pub const POSITION_PATH: &str = "/api/position";
pub const ACCESS_TOKEN_HEADER: &str = "X-MC-Access-Token";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build the position endpoint URL from the configured base.
pub fn position_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), POSITION_PATH)
}

// ---------------------------------------------------------------------------
// Player sample
// ---------------------------------------------------------------------------

/// One observation of a single online player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSample {
    pub name: String,
    pub coordinates: Coordinates,
    pub orientation: Orientation,
    /// Wire token of the player's [`Dimension`].
    pub dimension: Option<String>,
    /// Only set by hosts that run several worlds inside one dimension.
    pub world_uuid: Option<String>,
    pub deafen: bool,
}

impl PlayerSample {
    pub fn new(name: impl Into<String>, coordinates: Coordinates, orientation: Orientation) -> Self {
        Self {
            name: name.into(),
            coordinates,
            orientation,
            dimension: None,
            world_uuid: None,
            deafen: false,
        }
    }

    pub fn with_dimension(mut self, dimension: Option<Dimension>) -> Self {
        self.dimension = dimension.map(|d| d.to_wire().to_string());
        self
    }

    pub fn with_world_uuid(mut self, world_uuid: impl Into<String>) -> Self {
        self.world_uuid = Some(world_uuid.into());
        self
    }

    pub fn with_deafen(mut self, deafen: bool) -> Self {
        self.deafen = deafen;
        self
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Batch of samples for one pass, all from the same game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub game: String,
    pub players: Vec<PlayerSample>,
}

impl Payload {
    pub fn new(game: GameType, players: Vec<PlayerSample>) -> Self {
        Self {
            game: game.as_wire().to_string(),
            players,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Serialise to the UTF-8 JSON request body.
    ///
    /// A sample without a name means a source built it wrong; that is
    /// reported rather than sent.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        if let Some(idx) = self.players.iter().position(|p| p.name.is_empty()) {
            return Err(AgentError::Serialization(format!(
                "player at index {} has no name",
                idx
            )));
        }
        Ok(serde_json::to_vec(self)?)
    }
}

// ---------------------------------------------------------------------------
// Host events (sidecar host → agent)
// ---------------------------------------------------------------------------

/// A roster change reported by a host running out of process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Join {
        id: String,
        name: String,
    },
    Move {
        id: String,
        x: f64,
        y: f64,
        z: f64,
        #[serde(default)]
        yaw: f32,
        #[serde(default)]
        pitch: f32,
        #[serde(default)]
        dimension: Option<String>,
        #[serde(default)]
        world_uuid: Option<String>,
        #[serde(default)]
        sneaking: bool,
    },
    Leave {
        id: String,
    },
}

impl HostEvent {
    pub fn player_id(&self) -> &str {
        match self {
            HostEvent::Join { id, .. } | HostEvent::Move { id, .. } | HostEvent::Leave { id } => id,
        }
    }
}
