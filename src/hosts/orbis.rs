//! Orbis-world host adapter.
//!
//! The host multiplexes several worlds inside its single dimension, so every
//! sample carries the containing world's id. Roster and transforms are
//! updated from world-thread callbacks and read from the agent's own
//! interval task.

use crate::error::SourceError;
use crate::protocol::PlayerSample;
use crate::source::PlayerSource;
use crate::types::{Coordinates, Dimension, GameType, Orientation};
use log::debug;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Cached view of one connected player.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbisPlayer {
    pub id: String,
    pub name: String,
    pub world_uuid: String,
    pub position: Coordinates,
    /// Head rotation (yaw, pitch).
    pub orientation: Orientation,
    /// Cleared when the host invalidates the entity ahead of disconnect.
    pub valid: bool,
}

impl OrbisPlayer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, world_uuid: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            world_uuid: world_uuid.into(),
            position: Coordinates::origin(),
            orientation: Orientation::new(0.0, 0.0),
            valid: true,
        }
    }

    pub fn at(mut self, position: Coordinates, orientation: Orientation) -> Self {
        self.position = position;
        self.orientation = orientation;
        self
    }
}

#[derive(Default)]
pub struct OrbisSource {
    roster: RwLock<BTreeMap<String, OrbisPlayer>>,
}

impl OrbisSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&self, player: OrbisPlayer) {
        debug!("Player connected: {} ({})", player.name, player.id);
        self.roster.write().insert(player.id.clone(), player);
    }

    pub fn remove_player(&self, id: &str) -> Option<OrbisPlayer> {
        debug!("Player disconnected: {}", id);
        self.roster.write().remove(id)
    }

    /// Returns `false` when `id` is not in the roster.
    pub fn update_transform(&self, id: &str, position: Coordinates, orientation: Orientation) -> bool {
        match self.roster.write().get_mut(id) {
            Some(p) => {
                p.position = position;
                p.orientation = orientation;
                true
            }
            None => false,
        }
    }

    /// Returns `false` when `id` is not in the roster.
    pub fn move_to_world(&self, id: &str, world_uuid: impl Into<String>) -> bool {
        match self.roster.write().get_mut(id) {
            Some(p) => {
                p.world_uuid = world_uuid.into();
                true
            }
            None => false,
        }
    }

    /// Transform and, when given, world in one step, so a concurrent
    /// `collect` never pairs the new position with the old world.
    /// Returns `false` when `id` is not in the roster.
    pub fn relocate(
        &self,
        id: &str,
        position: Coordinates,
        orientation: Orientation,
        world_uuid: Option<String>,
    ) -> bool {
        let mut roster = self.roster.write();
        let Some(p) = roster.get_mut(id) else {
            return false;
        };
        p.position = position;
        p.orientation = orientation;
        if let Some(world) = world_uuid {
            p.world_uuid = world;
        }
        true
    }

    pub fn invalidate(&self, id: &str) {
        if let Some(p) = self.roster.write().get_mut(id) {
            p.valid = false;
        }
    }

    pub fn len(&self) -> usize {
        self.roster.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.read().is_empty()
    }
}

impl PlayerSource for OrbisSource {
    fn collect(&self) -> Result<Vec<PlayerSample>, SourceError> {
        let roster = self.roster.read();
        Ok(roster
            .values()
            .filter(|p| p.valid)
            .map(|p| {
                // The host has no self-mute signal yet.
                PlayerSample::new(p.name.clone(), p.position, p.orientation)
                    .with_dimension(Some(Dimension::ORBIS))
                    .with_world_uuid(p.world_uuid.clone())
                    .with_deafen(false)
            })
            .collect())
    }

    fn game_type(&self) -> GameType {
        GameType::Hytale
    }
}
