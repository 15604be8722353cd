//! Bedrock Voice Chat position agent
//!
//! Samples the positions of online players on a game server and posts them
//! to the voice chat coordination service, which mixes spatial audio from
//! them.
//!
//! ## Architecture
//!
//! ```text
//! Agent  (agent.rs)                     ← bootstrap / shutdown
//!   ├── ConfigProvider  (settings/)     ← JSON file | host YAML | host schema
//!   ├── Scheduler  (scheduler.rs)       ← host tick divider | tokio interval
//!   └── SamplingLoop  (sampler.rs)      ← collect → gate → payload
//!         ├── PlayerSource  (source.rs, hosts/)
//!         └── Dispatcher  (dispatch.rs) ← fire-and-forget HTTP POST
//! ```
//!
//! Everything the agent puts on the wire lives in `protocol` and `types`.

// Wire model and config façade are always available (no agent feature needed).
pub mod error;
pub mod protocol;
pub mod settings;
pub mod source;
pub mod types;

// Runtime modules require the `agent` feature.
#[cfg(feature = "agent")]
pub mod agent;
#[cfg(feature = "agent")]
pub mod dispatch;
#[cfg(feature = "agent")]
pub mod hosts;
#[cfg(feature = "agent")]
pub mod sampler;
#[cfg(feature = "agent")]
pub mod scheduler;

// Convenience re-exports (agent only)
#[cfg(feature = "agent")]
pub use agent::Agent;
#[cfg(feature = "agent")]
pub use dispatch::{Dispatcher, HttpDispatcher};
#[cfg(feature = "agent")]
pub use sampler::{LoopState, PassOutcome, SamplerStats, SamplingLoop};
#[cfg(feature = "agent")]
pub use scheduler::{HostTickScheduler, IntervalScheduler, Scheduler};
pub use error::{AgentError, Result, SourceError};
pub use protocol::{Payload, PlayerSample};
pub use settings::{ConfigProvider, Configuration};
pub use source::PlayerSource;
pub use types::{Coordinates, Dimension, GameType, Orientation};
