//! Automation service — the Stopped/Running lifecycle around the engine.
//!
//! A host adapter attaches one service per hosting process and translates
//! its own events into three calls:
//!
//! - [`start`](AutomationService::start): user asked the agent to run
//! - [`stop`](AutomationService::stop): user asked the agent to stop
//! - [`force_stop`](AutomationService::force_stop): the host is tearing the
//!   process down
//!
//! While running, the service is published in the [`HandleRegistry`] so a
//! control surface can reach it without owning it. Pulses that arrive while
//! stopped are silently skipped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use axpulse_domain::action::ActionKind;
use axpulse_domain::gesture::{self, GestureThresholds, HandLandmarks};
use axpulse_domain::id::ServiceId;
use axpulse_domain::state::EngineState;
use axpulse_domain::throttle::ThrottleConfig;
use axpulse_domain::time::{Timestamp, now};

use crate::automation_engine::{AutomationEngine, TickReport};
use crate::handle_registry::HandleRegistry;
use crate::ports::{ForegroundPresentation, HostPlatform};

/// Static settings for an attached service.
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    pub throttles: ThrottleConfig,
    pub presentation: ForegroundPresentation,
    pub gestures: GestureThresholds,
}

/// Point-in-time view of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub id: ServiceId,
    pub state: EngineState,
    /// When the current run started; `None` while stopped.
    pub started_at: Option<Timestamp>,
    /// Pulses processed during the current run.
    pub ticks: u64,
}

struct Inner {
    state: EngineState,
    engine: AutomationEngine,
    started_at: Option<Timestamp>,
    ticks: u64,
}

/// Lifecycle-gated automation service.
pub struct AutomationService<H> {
    id: ServiceId,
    host: H,
    /// Held weakly: the registry owns the service while it is published.
    registry: Weak<HandleRegistry<Self>>,
    options: ServiceOptions,
    /// Serializes start/stop/teardown, including their host side effects.
    transition: Mutex<()>,
    inner: Mutex<Inner>,
}

impl<H: HostPlatform> AutomationService<H> {
    /// Attach a new service to `host`, in the stopped state.
    ///
    /// The service only keeps a weak reference to `registry`. While running
    /// it is published there, so whoever owns the registry keeps the service
    /// alive until it is stopped or the registry itself is dropped.
    pub fn attach(
        host: H,
        registry: Arc<HandleRegistry<Self>>,
        options: ServiceOptions,
    ) -> Arc<Self> {
        let id = ServiceId::new();
        tracing::debug!(service_id = %id, "automation service attached");
        Arc::new(Self {
            id,
            host,
            registry: Arc::downgrade(&registry),
            inner: Mutex::new(Inner {
                state: EngineState::Stopped,
                engine: AutomationEngine::new(&options.throttles),
                started_at: None,
                ticks: 0,
            }),
            options,
            transition: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn id(&self) -> ServiceId {
        self.id
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock().state.is_running()
    }

    #[must_use]
    pub fn status(&self) -> ServiceStatus {
        let inner = self.lock();
        ServiceStatus {
            id: self.id,
            state: inner.state,
            started_at: inner.started_at,
            ticks: inner.ticks,
        }
    }

    /// Ticks left before `kind` is due.
    #[must_use]
    pub fn remaining(&self, kind: ActionKind) -> u32 {
        self.lock().engine.throttle(kind).remaining()
    }

    /// Transition Stopped → Running.
    ///
    /// Re-arms the throttles, enters foreground mode and publishes this
    /// service. Returns `false` (and does nothing) if already running.
    #[tracing::instrument(skip(self), fields(service_id = %self.id))]
    pub fn start(self: &Arc<Self>) -> bool {
        let _transition = self.lock_transition();
        {
            let mut inner = self.lock();
            if inner.state.is_running() {
                tracing::debug!("start ignored, already running");
                return false;
            }
            inner.state = EngineState::Running;
            inner.engine = AutomationEngine::new(&self.options.throttles);
            inner.started_at = Some(now());
            inner.ticks = 0;
        }

        self.host.enter_foreground(&self.options.presentation);
        if let Some(registry) = self.registry.upgrade() {
            registry.publish(Arc::clone(self));
        }
        tracing::info!("automation service started");
        true
    }

    /// Transition Running → Stopped.
    ///
    /// Leaves foreground mode and withdraws this service from the registry.
    /// Returns `false` (and does nothing) if already stopped.
    #[tracing::instrument(skip(self), fields(service_id = %self.id))]
    pub fn stop(&self) -> bool {
        let _transition = self.lock_transition();
        if !self.halt() {
            tracing::debug!("stop ignored, already stopped");
            return false;
        }

        self.host.exit_foreground();
        self.withdraw();
        tracing::info!("automation service stopped");
        true
    }

    /// Host teardown: force the service to Stopped whatever its state.
    ///
    /// Foreground mode is only exited if it was entered, so enter and exit
    /// calls still alternate. The registry is withdrawn unconditionally.
    #[tracing::instrument(skip(self), fields(service_id = %self.id))]
    pub fn force_stop(&self) {
        let _transition = self.lock_transition();
        let was_running = self.halt();

        if was_running {
            self.host.exit_foreground();
        }
        self.withdraw();
        tracing::info!(was_running, "automation service torn down");
    }

    /// One scheduling pulse for all three actions.
    ///
    /// A no-op while stopped: the host is not queried and no throttle moves.
    pub fn tick(&self) -> TickReport {
        self.pulse(&ActionKind::ALL)
    }

    /// One scheduling pulse for the given actions only.
    pub fn pulse(&self, kinds: &[ActionKind]) -> TickReport {
        let mut inner = self.lock();
        if !inner.state.is_running() {
            tracing::trace!(service_id = %self.id, "pulse ignored while stopped");
            return TickReport::skipped();
        }

        let root = self.host.active_root();
        let report = inner
            .engine
            .tick_selected(&self.host, root.as_ref(), kinds);
        inner.ticks += 1;
        report
    }

    /// Pulse the actions requested by the gestures of one tracked hand.
    ///
    /// A hand making no gesture produces an empty (but not skipped) report
    /// while running.
    pub fn pulse_hand(&self, hand: &HandLandmarks) -> TickReport {
        let kinds = gesture::classify(hand, &self.options.gestures);
        self.pulse(&kinds)
    }

    fn withdraw(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.retract(self);
        }
    }

    /// Mark the service stopped. Returns whether it was running.
    fn halt(&self) -> bool {
        let mut inner = self.lock();
        let was_running = inner.state.is_running();
        inner.state = EngineState::Stopped;
        inner.started_at = None;
        was_running
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_transition(&self) -> MutexGuard<'_, ()> {
        self.transition
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
