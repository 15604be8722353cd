//! Sidecar host: a game server running out of process streams roster
//! events to the agent as line-delimited JSON.
//!
//! ## Event contract
//!
//! | `event` | Keys                                                   | Effect              |
//! |---------|--------------------------------------------------------|---------------------|
//! | `join`  | id, name                                               | player tracked      |
//! | `move`  | id, x, y, z, yaw?, pitch?, dimension?, world_uuid?, sneaking? | state refreshed |
//! | `leave` | id                                                     | player dropped      |
//!
//! A player only appears in samples after its first `move`.

use super::block_world::{BlockWorldPlayer, BlockWorldServer, BlockWorldSource, DimensionKey};
use super::orbis::{OrbisPlayer, OrbisSource};
use crate::error::Result;
use crate::protocol::HostEvent;
use crate::source::PlayerSource;
use crate::types::{Coordinates, GameType, Orientation};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

// ---------------------------------------------------------------------------
// Block-world server backed by events
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SidecarServer {
    players: RwLock<HashMap<String, BlockWorldPlayer>>,
}

impl SidecarServer {
    fn upsert(&self, id: &str, player: BlockWorldPlayer) {
        self.players.write().insert(id.to_string(), player);
    }

    fn remove(&self, id: &str) {
        self.players.write().remove(id);
    }
}

impl BlockWorldServer for SidecarServer {
    fn player(&self, id: &str) -> Option<BlockWorldPlayer> {
        self.players.read().get(id).cloned()
    }
}

// ---------------------------------------------------------------------------
// SidecarHost
// ---------------------------------------------------------------------------

enum Target {
    BlockWorld {
        source: Arc<BlockWorldSource<SidecarServer>>,
        server: Arc<SidecarServer>,
    },
    Orbis(Arc<OrbisSource>),
}

pub struct SidecarHost {
    names: RwLock<HashMap<String, String>>,
    target: Target,
}

impl SidecarHost {
    pub fn new(game: GameType) -> Self {
        let target = match game {
            GameType::Minecraft => {
                let server = Arc::new(SidecarServer::default());
                let source = Arc::new(BlockWorldSource::new());
                source.attach_server(server.clone());
                Target::BlockWorld { source, server }
            }
            GameType::Hytale => Target::Orbis(Arc::new(OrbisSource::new())),
        };
        Self {
            names: RwLock::new(HashMap::new()),
            target,
        }
    }

    pub fn source(&self) -> Arc<dyn PlayerSource> {
        match &self.target {
            Target::BlockWorld { source, .. } => source.clone(),
            Target::Orbis(source) => source.clone(),
        }
    }

    pub fn apply(&self, event: HostEvent) {
        match event {
            HostEvent::Join { id, name } => {
                if let Target::BlockWorld { source, .. } = &self.target {
                    source.join(id.clone());
                }
                self.names.write().insert(id, name);
            }
            HostEvent::Move {
                id,
                x,
                y,
                z,
                yaw,
                pitch,
                dimension,
                world_uuid,
                sneaking,
            } => {
                let Some(name) = self.names.read().get(&id).cloned() else {
                    warn!("Ignoring move for unknown player '{}'", id);
                    return;
                };
                let position = Coordinates::new(x, y, z);
                let orientation = Orientation::new(yaw, pitch);

                match &self.target {
                    Target::BlockWorld { server, .. } => server.upsert(
                        &id,
                        BlockWorldPlayer {
                            name,
                            position,
                            orientation,
                            dimension: dimension.map(DimensionKey::WorldName),
                            sneaking,
                            connected: true,
                        },
                    ),
                    Target::Orbis(source) => {
                        if source.relocate(&id, position, orientation, world_uuid.clone()) {
                            return;
                        }
                        if let Some(world) = world_uuid {
                            source.add_player(
                                OrbisPlayer::new(id, name, world).at(position, orientation),
                            );
                        } else {
                            warn!("First move for '{}' has no world_uuid, skipping", id);
                        }
                    }
                }
            }
            HostEvent::Leave { id } => {
                self.names.write().remove(&id);
                match &self.target {
                    Target::BlockWorld { source, server } => {
                        source.leave(&id);
                        server.remove(&id);
                    }
                    Target::Orbis(source) => {
                        source.remove_player(&id);
                    }
                }
            }
        }
    }

    /// Parse and apply one line. Malformed lines are logged and dropped.
    pub fn apply_line(&self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => {
                debug!("Host event for '{}'", event.player_id());
                self.apply(event);
            }
            Err(e) => warn!("Malformed host event ({}): {}", e, line),
        }
    }

    /// Apply events from `reader` until EOF.
    pub async fn pump<R>(&self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            self.apply_line(&line);
        }
        info!("Host event stream closed");
        Ok(())
    }
}
