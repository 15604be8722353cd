//! Error types shared by the agent.

use thiserror::Error;

/// Everything the library can fail with.
///
/// Most of these never reach the sampling loop: config failures are folded
/// into a default (invalid) configuration, and transport failures are
/// swallowed by the dispatcher.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("payload serialization failed: {0}")]
    Serialization(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;

/// Raised by a [`PlayerSource`](crate::source::PlayerSource) when the host
/// throws while being read. A host that is merely not ready returns an empty
/// roster instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("host unavailable: {0}")]
    HostUnavailable(String),

    #[error("player {player} could not be sampled: {reason}")]
    Sample { player: String, reason: String },
}
