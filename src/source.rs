//! PlayerSource port: the only way the agent reads the host.

use crate::error::SourceError;
use crate::protocol::PlayerSample;
use crate::types::GameType;
use std::sync::Arc;

/// Produces the current roster of online players.
///
/// Implementations are called from the scheduler thread (the host's main
/// thread in host-tick mode), so `collect` must be plain arithmetic over
/// state the host already holds: no network, no disk, no waiting on locks
/// held across I/O.
///
/// A host that is not ready yet returns `Ok(vec![])`; `Err` is reserved for
/// the host throwing while being read.
pub trait PlayerSource: Send + Sync {
    /// Each online player exactly once, sampled as close to now as possible.
    fn collect(&self) -> Result<Vec<PlayerSample>, SourceError>;

    fn game_type(&self) -> GameType;
}

impl<T: PlayerSource + ?Sized> PlayerSource for Arc<T> {
    fn collect(&self) -> Result<Vec<PlayerSample>, SourceError> {
        (**self).collect()
    }

    fn game_type(&self) -> GameType {
        (**self).game_type()
    }
}
