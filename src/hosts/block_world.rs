//! Block-world host adapter.
//!
//! Join/leave events record player ids from whatever thread the host fires
//! them on. Each pass looks the ids up on the live server so no stale entity
//! references are held between ticks.

use crate::error::SourceError;
use crate::protocol::PlayerSample;
use crate::source::PlayerSource;
use crate::types::{Coordinates, Dimension, GameType, Orientation};
use log::debug;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Host-side view
// ---------------------------------------------------------------------------

/// How the host names the dimension a player is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionKey {
    /// Namespaced registry id such as `minecraft:the_nether`. Exact match
    /// only: a modded id like `mymod:nether_mines` stays custom rather than
    /// being folded into `nether` by substring, unlike world names.
    Registry(String),
    /// World folder name such as `world_nether`. Alias and substring match.
    WorldName(String),
}

impl DimensionKey {
    pub fn resolve(&self) -> Dimension {
        match self {
            DimensionKey::Registry(key) => Dimension::from_registry_key(key),
            DimensionKey::WorldName(name) => Dimension::parse(GameType::Minecraft, name),
        }
    }
}

/// Live state of one player as the host reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockWorldPlayer {
    pub name: String,
    pub position: Coordinates,
    pub orientation: Orientation,
    pub dimension: Option<DimensionKey>,
    pub sneaking: bool,
    pub connected: bool,
}

/// Lookup the host server provides once it is running.
pub trait BlockWorldServer: Send + Sync {
    fn player(&self, id: &str) -> Option<BlockWorldPlayer>;
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

pub struct BlockWorldSource<S> {
    server: RwLock<Option<Arc<S>>>,
    online: RwLock<BTreeSet<String>>,
}

impl<S: BlockWorldServer> BlockWorldSource<S> {
    pub fn new() -> Self {
        Self {
            server: RwLock::new(None),
            online: RwLock::new(BTreeSet::new()),
        }
    }

    /// Hosts hand the server over on their first tick.
    pub fn attach_server(&self, server: Arc<S>) {
        *self.server.write() = Some(server);
    }

    pub fn join(&self, id: impl Into<String>) {
        let id = id.into();
        debug!("Player joined: {}", id);
        self.online.write().insert(id);
    }

    pub fn leave(&self, id: &str) {
        debug!("Player left: {}", id);
        self.online.write().remove(id);
    }

    pub fn online_count(&self) -> usize {
        self.online.read().len()
    }

    fn sample(player: BlockWorldPlayer) -> PlayerSample {
        // Sneaking stands in for self-mute until hosts expose a real signal.
        PlayerSample::new(player.name, player.position, player.orientation)
            .with_dimension(player.dimension.as_ref().map(DimensionKey::resolve))
            .with_deafen(player.sneaking)
    }
}

impl<S: BlockWorldServer> Default for BlockWorldSource<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BlockWorldServer> PlayerSource for BlockWorldSource<S> {
    fn collect(&self) -> Result<Vec<PlayerSample>, SourceError> {
        let Some(server) = self.server.read().clone() else {
            return Ok(Vec::new());
        };

        // Snapshot ids first so join/leave never wait on server lookups.
        let ids: Vec<String> = self.online.read().iter().cloned().collect();

        Ok(ids
            .iter()
            .filter_map(|id| server.player(id))
            .filter(|p| p.connected)
            .map(Self::sample)
            .collect())
    }

    fn game_type(&self) -> GameType {
        GameType::Minecraft
    }
}
