//! # axpulsed — axpulse daemon
//!
//! Composition root that wires the virtual host, the automation service and
//! the tick driver together.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Build the host adapter from a scene file or the built-in demo screen
//! - Attach and start the automation service, publishing it through the
//!   handle registry
//! - Pulse the service until Ctrl-C, the tick budget or the hand track runs
//!   out: a fixed-interval tick by default, recorded gestures when a
//!   landmark track is configured
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use axpulse_adapter_virtual::{VirtualHost, scene, track};
use axpulse_app::handle_registry::HandleRegistry;
use axpulse_app::services::automation_service::AutomationService;
use axpulse_app::services::tick_driver::{self, DriveSummary};
use axpulse_domain::gesture::HandLandmarks;

use crate::config::Config;

type Service = AutomationService<Arc<VirtualHost>>;

/// Everything the daemon wires together.
struct Daemon {
    host: Arc<VirtualHost>,
    registry: Arc<HandleRegistry<Service>>,
    service: Arc<Service>,
    track: Option<Vec<HandLandmarks>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_new(&config.logging.filter).context("parsing log filter")?)
        .init();

    let daemon = launch(&config)?;

    tracing::info!(
        interval_ms = config.engine.tick_interval_ms,
        max_ticks = ?config.engine.max_ticks,
        frames = daemon.track.as_ref().map(Vec::len),
        "axpulsed running"
    );

    let summary = drive(&daemon, &config, shutdown_signal()).await;

    daemon.service.force_stop();

    tracing::info!(
        pulses = summary.pulses,
        skipped = summary.skipped,
        dispatched = summary.dispatched,
        ticks = daemon.service.status().ticks,
        host_actions = daemon.host.dispatched().len(),
        published = daemon.registry.get().is_some(),
        "axpulsed stopped"
    );

    Ok(())
}

/// Build the host and registry, attach the service and start it.
fn launch(config: &Config) -> anyhow::Result<Daemon> {
    // Host
    let root = match &config.host.scene {
        Some(path) => scene::load(path)
            .with_context(|| format!("loading scene from {}", path.display()))?,
        None => scene::demo(),
    };
    let host = Arc::new(VirtualHost::new(root));

    let track = config
        .host
        .landmarks
        .as_ref()
        .map(|path| {
            track::load(path)
                .with_context(|| format!("loading hand track from {}", path.display()))
        })
        .transpose()?;

    // Registry
    let registry = Arc::new(HandleRegistry::new());
    registry.register_observer(|handle: Option<Arc<Service>>| match handle {
        Some(service) => tracing::info!(service_id = %service.id(), "service handle published"),
        None => tracing::info!("service handle cleared"),
    });

    // Service
    let service = AutomationService::attach(
        Arc::clone(&host),
        Arc::clone(&registry),
        config.service_options(),
    );
    service.start();

    Ok(Daemon {
        host,
        registry,
        service,
        track,
    })
}

/// Pulse the service with the configured source until it is spent or
/// `shutdown` resolves.
async fn drive<S>(daemon: &Daemon, config: &Config, shutdown: S) -> DriveSummary
where
    S: Future<Output = ()>,
{
    let period = config.tick_interval();
    match &daemon.track {
        Some(hands) => {
            let budget = config
                .engine
                .max_ticks
                .map_or(usize::MAX, |max| usize::try_from(max).unwrap_or(usize::MAX));
            let frames = hands.iter().copied().take(budget);
            tick_driver::replay(&daemon.service, period, frames, shutdown).await
        }
        None => {
            tick_driver::run(&daemon.service, period, config.engine.max_ticks, shutdown).await
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "cannot listen for Ctrl-C, running until the pulse source is spent");
        std::future::pending::<()>().await;
    }
}
