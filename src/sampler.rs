//! SamplingLoop – one pass per scheduler firing: collect, gate, dispatch.

use crate::dispatch::Dispatcher;
use crate::protocol::Payload;
use crate::settings::{Configuration, MINIMUM_PLAYERS_FLOOR};
use crate::source::PlayerSource;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// ```text
/// Unconfigured ──valid config──▶ Armed ──scheduler attached──▶ Running ──shutdown──▶ Stopped
///      └──────────────invalid config───────────────────────────────────────────────▶ Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    Unconfigured,
    Armed,
    Running,
    Stopped,
}

/// What a single [`SamplingLoop::pass`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// A payload with this many players was handed to the dispatcher.
    Dispatched(usize),
    /// Too few players online.
    Gated { online: usize, required: usize },
    /// The source raised; nothing was sent.
    SourceFailed,
    /// The loop is not running.
    Idle(LoopState),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerStats {
    pub passes: u64,
    pub gated: u64,
    pub dispatched: u64,
    pub source_errors: u64,
}

struct Inner {
    state: LoopState,
    minimum_players: i32,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    stats: SamplerStats,
}

// ---------------------------------------------------------------------------
// SamplingLoop
// ---------------------------------------------------------------------------

pub struct SamplingLoop {
    source: Arc<dyn PlayerSource>,
    inner: Mutex<Inner>,
}

impl SamplingLoop {
    pub fn new(source: Arc<dyn PlayerSource>) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state: LoopState::Unconfigured,
                minimum_players: MINIMUM_PLAYERS_FLOOR,
                dispatcher: None,
                stats: SamplerStats::default(),
            }),
        }
    }

    /// Leave `Unconfigured`: `Armed` with a valid configuration, `Stopped`
    /// otherwise. Calls in any other state are ignored.
    pub fn arm(&self, config: &Configuration, dispatcher: Arc<dyn Dispatcher>) -> LoopState {
        let mut inner = self.inner.lock();
        if inner.state != LoopState::Unconfigured {
            warn!("Sampling loop already configured ({:?})", inner.state);
            return inner.state;
        }

        if !config.is_valid() {
            error!(
                "Invalid configuration, missing {} - player positions will not be sent",
                config.missing_fields().join(", ")
            );
            inner.state = LoopState::Stopped;
            return inner.state;
        }

        inner.minimum_players = config.minimum_players;
        inner.dispatcher = Some(dispatcher);
        inner.state = LoopState::Armed;
        debug!("Sampling loop armed {:?}", config);
        inner.state
    }

    /// `Armed` → `Running`. Returns whether the loop is now running.
    pub fn start(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.state == LoopState::Armed {
            inner.state = LoopState::Running;
            info!("Sampling {} players", self.source.game_type());
        }
        inner.state == LoopState::Running
    }

    /// Any state → `Stopped`. In-flight requests are left alone.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        inner.state = LoopState::Stopped;
        inner.dispatcher = None;
    }

    /// Leave `Unconfigured` straight to `Stopped`, e.g. when the dispatcher
    /// could not be built.
    pub fn disable(&self, reason: &str) {
        error!("Sampling disabled: {}", reason);
        self.stop();
    }

    pub fn state(&self) -> LoopState {
        self.inner.lock().state
    }

    pub fn stats(&self) -> SamplerStats {
        self.inner.lock().stats.clone()
    }

    /// Run one pass. Only does work while `Running`.
    pub fn pass(&self) -> PassOutcome {
        // Release the lock before touching the host.
        let (dispatcher, required) = {
            let mut inner = self.inner.lock();
            let dispatcher = match (&inner.state, &inner.dispatcher) {
                (LoopState::Running, Some(d)) => d.clone(),
                _ => return PassOutcome::Idle(inner.state),
            };
            inner.stats.passes += 1;
            // Floor applied here, not at load time.
            let required = inner.minimum_players.max(MINIMUM_PLAYERS_FLOOR) as usize;
            (dispatcher, required)
        };

        let samples = match self.source.collect() {
            Ok(samples) => samples,
            Err(e) => {
                warn!("Error during tick: {}", e);
                self.inner.lock().stats.source_errors += 1;
                return PassOutcome::SourceFailed;
            }
        };

        let online = samples.len();
        if online < required {
            self.inner.lock().stats.gated += 1;
            return PassOutcome::Gated { online, required };
        }

        dispatcher.send(Payload::new(self.source.game_type(), samples));
        self.inner.lock().stats.dispatched += 1;
        PassOutcome::Dispatched(online)
    }
}
