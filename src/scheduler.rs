//! Scheduler port and the two cadences hosts offer.
//!
//! | Scheduler             | Driven by                         | Cadence                      |
//! |-----------------------|-----------------------------------|------------------------------|
//! | [`HostTickScheduler`] | host calls `on_tick` every tick   | every 5th tick (250 ms @ 20 TPS) |
//! | [`IntervalScheduler`] | tokio task owned by the agent     | every 167 ms (~5 ticks @ 30 TPS) |

use crate::error::{AgentError, Result};
use crate::sampler::{PassOutcome, SamplingLoop};
use log::debug;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const HOST_TICKS_PER_PASS: u32 = 5;
pub const FIXED_INTERVAL: Duration = Duration::from_millis(167);

/// Something that will call [`SamplingLoop::pass`] periodically once attached.
pub trait Scheduler: Send {
    fn attach(&mut self, sampler: Arc<SamplingLoop>) -> Result<()>;

    /// Stop firing. Must not wait for a pass in progress.
    fn cancel(&mut self);
}

// ---------------------------------------------------------------------------
// Host-tick mode
// ---------------------------------------------------------------------------

struct TickState {
    counter: AtomicU32,
    sampler: Mutex<Option<Arc<SamplingLoop>>>,
}

/// Divides the host's per-tick callback down to one pass every N ticks.
///
/// Cheap to clone: the host keeps one clone for its tick hook and gives
/// another to the agent.
#[derive(Clone)]
pub struct HostTickScheduler {
    ticks_per_pass: u32,
    state: Arc<TickState>,
}

impl HostTickScheduler {
    pub fn new() -> Self {
        Self::every(HOST_TICKS_PER_PASS)
    }

    pub fn every(ticks_per_pass: u32) -> Self {
        Self {
            ticks_per_pass: ticks_per_pass.max(1),
            state: Arc::new(TickState {
                counter: AtomicU32::new(0),
                sampler: Mutex::new(None),
            }),
        }
    }

    /// Call from the host's end-of-tick hook. Returns the pass outcome on
    /// the ticks that run one.
    pub fn on_tick(&self) -> Option<PassOutcome> {
        let sampler = self.state.sampler.lock().clone()?;

        let count = self.state.counter.fetch_add(1, Ordering::Relaxed) + 1;
        if count < self.ticks_per_pass {
            return None;
        }
        self.state.counter.store(0, Ordering::Relaxed);
        Some(sampler.pass())
    }
}

impl Default for HostTickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for HostTickScheduler {
    fn attach(&mut self, sampler: Arc<SamplingLoop>) -> Result<()> {
        self.state.counter.store(0, Ordering::Relaxed);
        *self.state.sampler.lock() = Some(sampler);
        Ok(())
    }

    fn cancel(&mut self) {
        self.state.sampler.lock().take();
    }
}

// ---------------------------------------------------------------------------
// Fixed-interval mode
// ---------------------------------------------------------------------------

/// Runs passes on a tokio task, isolated from the host's own threads.
pub struct IntervalScheduler {
    period: Duration,
    runtime: Handle,
    task: Option<JoinHandle<()>>,
}

impl IntervalScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self::with_period(runtime, FIXED_INTERVAL)
    }

    pub fn with_period(runtime: Handle, period: Duration) -> Self {
        Self {
            period,
            runtime,
            task: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_attached(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Scheduler for IntervalScheduler {
    fn attach(&mut self, sampler: Arc<SamplingLoop>) -> Result<()> {
        if self.period.is_zero() {
            return Err(AgentError::InvalidConfiguration(
                "sampling period must be non-zero".to_string(),
            ));
        }
        self.cancel();
        let period = self.period;
        self.task = Some(self.runtime.spawn(async move {
            // First pass one period after attach, like a fixed-rate executor.
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                let outcome = sampler.pass();
                debug!("Pass: {:?}", outcome);
            }
        }));
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
