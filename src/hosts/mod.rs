//! Reference host adapters behind the [`PlayerSource`](crate::source::PlayerSource) port.

pub mod block_world;
pub mod orbis;
pub mod sidecar;

pub use block_world::{BlockWorldPlayer, BlockWorldServer, BlockWorldSource, DimensionKey};
pub use orbis::{OrbisPlayer, OrbisSource};
pub use sidecar::SidecarHost;
