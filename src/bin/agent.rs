//! bvc-position-agent binary
//!
//! Runs the agent out of process next to a game server. The server streams
//! roster events (join / move / leave) as line-delimited JSON on stdin; the
//! agent samples them on a fixed interval and posts positions to the
//! coordination service.
//!
//! ## Configuration (env / flags)
//!
//! | Key                 | Default     | Description                                   |
//! |---------------------|-------------|-----------------------------------------------|
//! | `BVC_CONFIG_DIR`    | `config`    | Directory holding the agent config            |
//! | `BVC_CONFIG_FORMAT` | `json`      | `json` (bedrock-voice-chat.json) or `yaml` (config.yml) |
//! | `BVC_GAME`          | `minecraft` | `minecraft` or `hytale`                       |
//! | `BVC_INTERVAL_MS`   | `167`       | Sampling period in milliseconds               |

use anyhow::{Context, Result};
use bvc_position_agent::{
    dispatch::{Dispatcher, HttpDispatcher},
    hosts::SidecarHost,
    scheduler::IntervalScheduler,
    settings::{ConfigProvider, JsonFileProvider, YamlProvider},
    Agent, GameType,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::runtime::Handle;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConfigFormat {
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(
    name = "bvc-position-agent",
    about = "Bedrock Voice Chat position agent",
    version
)]
struct Args {
    /// Directory holding the agent config
    #[arg(long, env = "BVC_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Config backend
    #[arg(long, env = "BVC_CONFIG_FORMAT", value_enum, default_value_t = ConfigFormat::Json)]
    config_format: ConfigFormat,

    /// Game the host runs
    #[arg(long, env = "BVC_GAME", default_value = "minecraft")]
    game: GameType,

    /// Sampling period (ms)
    #[arg(
        long,
        env = "BVC_INTERVAL_MS",
        default_value_t = 167,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval_ms: u64,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bvc_position_agent=info".parse()?),
        )
        .init();

    let args = Args::parse();

    tracing::info!(
        "Starting bvc-position-agent (game={}, config={:?} in {}, interval={}ms)",
        args.game,
        args.config_format,
        args.config_dir.display(),
        args.interval_ms,
    );

    let provider: Box<dyn ConfigProvider> = match args.config_format {
        ConfigFormat::Json => Box::new(JsonFileProvider::new(&args.config_dir)),
        ConfigFormat::Yaml => Box::new(YamlProvider::new(args.config_dir.join("config.yml"))),
    };

    let host = Arc::new(SidecarHost::new(args.game));
    let runtime = Handle::current();
    let scheduler =
        IntervalScheduler::with_period(runtime.clone(), Duration::from_millis(args.interval_ms));

    let mut agent = Agent::start(
        provider.as_ref(),
        host.source(),
        move |config| Ok(Arc::new(HttpDispatcher::new(config, runtime)?) as Arc<dyn Dispatcher>),
        Box::new(scheduler),
    );

    // Host events until EOF or Ctrl-C.
    let pump_host = host.clone();
    let pump = tokio::spawn(async move {
        pump_host
            .pump(BufReader::new(tokio::io::stdin()))
            .await
            .context("reading host events from stdin")
    });

    tokio::select! {
        res = pump => match res {
            Ok(Ok(())) => tracing::info!("Host closed the event stream"),
            Ok(Err(e)) => tracing::error!("Host event stream failed: {:#}", e),
            Err(e) => tracing::error!("Host event task panicked: {}", e),
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("bvc-position-agent shutting down (SIGINT)");
        }
    }

    tracing::info!("Final stats: {:?}", agent.stats());
    agent.shutdown();
    Ok(())
}
