//! Agent – what a host shell instantiates on enable and drops on disable.

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::sampler::{LoopState, SamplerStats, SamplingLoop};
use crate::scheduler::Scheduler;
use crate::settings::{ConfigProvider, Configuration};
use crate::source::PlayerSource;
use log::info;
use std::sync::Arc;

/// Wires a config provider, a player source, a dispatcher and a scheduler
/// into a running [`SamplingLoop`].
///
/// An agent with a bad configuration still starts: it stays loaded with its
/// loop `Stopped` and never sends anything.
pub struct Agent {
    configuration: Configuration,
    sampler: Arc<SamplingLoop>,
    scheduler: Box<dyn Scheduler>,
}

impl Agent {
    pub fn start<F>(
        provider: &dyn ConfigProvider,
        source: Arc<dyn PlayerSource>,
        build_dispatcher: F,
        mut scheduler: Box<dyn Scheduler>,
    ) -> Self
    where
        F: FnOnce(&Configuration) -> Result<Arc<dyn Dispatcher>>,
    {
        info!("Initializing Bedrock Voice Chat ({})", source.game_type());

        provider.create_default_if_missing();
        let configuration = provider.load();
        let sampler = Arc::new(SamplingLoop::new(source));

        bring_up(&configuration, &sampler, build_dispatcher, scheduler.as_mut());

        Self {
            configuration,
            sampler,
            scheduler,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn state(&self) -> LoopState {
        self.sampler.state()
    }

    pub fn stats(&self) -> SamplerStats {
        self.sampler.stats()
    }

    pub fn sampler(&self) -> &Arc<SamplingLoop> {
        &self.sampler
    }

    /// Cancel the scheduled task without waiting. Requests already spawned
    /// finish or hit their own deadline.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.sampler.stop();
        info!("Bedrock Voice Chat disabled");
    }
}

fn bring_up<F>(
    configuration: &Configuration,
    sampler: &Arc<SamplingLoop>,
    build_dispatcher: F,
    scheduler: &mut dyn Scheduler,
) where
    F: FnOnce(&Configuration) -> Result<Arc<dyn Dispatcher>>,
{
    if !configuration.is_valid() {
        sampler.disable(&format!(
            "invalid configuration, missing {}",
            configuration.missing_fields().join(", ")
        ));
        return;
    }

    let dispatcher = match build_dispatcher(configuration) {
        Ok(d) => d,
        Err(e) => return sampler.disable(&e.to_string()),
    };

    if sampler.arm(configuration, dispatcher) != LoopState::Armed {
        return;
    }

    if let Err(e) = scheduler.attach(sampler.clone()) {
        return sampler.disable(&format!("scheduler refused the sampling task: {}", e));
    }

    sampler.start();
    info!(
        "Bedrock Voice Chat will connect to: {}",
        configuration.bvc_server
    );
}
