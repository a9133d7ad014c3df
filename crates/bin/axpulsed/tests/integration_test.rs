//! End-to-end tests for the full axpulsed stack.
//!
//! Each test wires the real virtual host, handle registry and automation
//! service together exactly as the daemon does. Pulses are delivered either
//! directly or through the tick driver with a tick budget.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axpulse_adapter_virtual::{DispatchRecord, VirtualHost, scene};
use axpulse_app::automation_engine::ActionOutcome;
use axpulse_app::handle_registry::HandleRegistry;
use axpulse_app::services::automation_service::{AutomationService, ServiceOptions};
use axpulse_app::services::tick_driver::{self, DriveSummary};
use axpulse_domain::action::ActionKind;
use axpulse_domain::element::ElementAction;
use axpulse_domain::gesture::{HandLandmarks, Landmark};
use axpulse_domain::state::EngineState;
use axpulse_domain::throttle::ThrottleConfig;

type Service = AutomationService<Arc<VirtualHost>>;

struct Stack {
    host: Arc<VirtualHost>,
    registry: Arc<HandleRegistry<Service>>,
    service: Arc<Service>,
}

fn stack(throttles: ThrottleConfig) -> Stack {
    let host = Arc::new(VirtualHost::new(scene::demo()));
    let registry = Arc::new(HandleRegistry::new());
    let service = AutomationService::attach(
        Arc::clone(&host),
        Arc::clone(&registry),
        ServiceOptions {
            throttles,
            ..ServiceOptions::default()
        },
    );
    Stack {
        host,
        registry,
        service,
    }
}

/// Forward due on tick 1, backward on tick 2, tap on tick 3, then every third.
fn staggered() -> ThrottleConfig {
    ThrottleConfig {
        scroll_forward: 0,
        scroll_backward: 1,
        tap: 2,
        reset: 2,
    }
}

fn record(node: &str, action: ElementAction) -> DispatchRecord {
    DispatchRecord {
        node: node.to_string(),
        action,
    }
}

// ---------------------------------------------------------------------------
// Pacing and targeting
// ---------------------------------------------------------------------------

#[test]
fn should_dispatch_each_action_on_shallowest_capable_node() {
    let stack = stack(staggered());
    assert!(stack.service.start());

    for _ in 0..3 {
        stack.service.tick();
    }

    assert_eq!(
        stack.host.dispatched(),
        vec![
            record("feed", ElementAction::ScrollForward),
            record("feed", ElementAction::ScrollBackward),
            record("post_1", ElementAction::Click),
        ]
    );
    let root = stack.host.root().unwrap();
    assert_eq!(root.find_by_name("feed").unwrap().scroll_position(), 0);
    assert_eq!(root.find_by_name("post_1").unwrap().clicks(), 1);
    assert_eq!(root.find_by_name("menu").unwrap().clicks(), 0);
}

#[test]
fn should_wait_out_default_countdowns() {
    let stack = stack(ThrottleConfig::default());
    stack.service.start();

    for _ in 0..40 {
        stack.service.tick();
    }
    assert!(stack.host.dispatched().is_empty());

    let report = stack.service.tick();
    assert_eq!(
        report.outcome(ActionKind::Tap),
        Some(ActionOutcome::Dispatched)
    );
    assert_eq!(
        stack.host.dispatched(),
        vec![record("post_1", ElementAction::Click)]
    );
}

#[test]
fn should_spend_due_slots_without_active_window() {
    let stack = stack(staggered());
    stack.service.start();
    stack.host.clear_root();

    let report = stack.service.tick();

    assert_eq!(
        report.outcome(ActionKind::ScrollForward),
        Some(ActionOutcome::NoActiveRoot)
    );
    assert_eq!(stack.service.remaining(ActionKind::ScrollForward), 2);
    assert!(stack.host.dispatched().is_empty());
    assert_eq!(stack.service.status().ticks, 1);
}

#[test]
fn should_resume_dispatching_when_window_returns() {
    let stack = stack(ThrottleConfig {
        scroll_forward: 0,
        scroll_backward: 9,
        tap: 9,
        reset: 0,
    });
    stack.service.start();
    stack.host.clear_root();
    stack.service.tick();

    stack.host.set_root(scene::demo());
    stack.service.tick();

    assert_eq!(
        stack.host.dispatched(),
        vec![record("feed", ElementAction::ScrollForward)]
    );
}

// ---------------------------------------------------------------------------
// Lifecycle and handle
// ---------------------------------------------------------------------------

#[test]
fn should_publish_handle_and_enter_foreground_while_running() {
    let stack = stack(staggered());
    assert!(stack.registry.get().is_none());
    assert!(stack.host.foreground().is_none());

    stack.service.start();

    let handle = stack.registry.get().unwrap();
    assert!(Arc::ptr_eq(&handle, &stack.service));
    assert_eq!(handle.status().state, EngineState::Running);
    assert_eq!(stack.host.foreground().unwrap().title, "Gesture Service");

    assert!(stack.service.stop());

    assert!(stack.registry.get().is_none());
    assert!(stack.host.foreground().is_none());
    assert!(!stack.service.stop());
}

#[test]
fn should_ignore_pulses_while_stopped() {
    let stack = stack(staggered());

    let report = stack.service.tick();

    assert!(report.is_skipped());
    assert_eq!(stack.service.remaining(ActionKind::ScrollForward), 0);
    assert!(stack.host.dispatched().is_empty());
}

#[test]
fn should_notify_observer_across_lifecycle() {
    let stack = stack(staggered());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    stack
        .registry
        .register_observer(move |handle: Option<Arc<Service>>| {
            sink.lock().unwrap().push(handle.is_some());
        });

    stack.service.start();
    stack.service.force_stop();
    stack.service.force_stop();

    assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
    assert!(stack.host.foreground().is_none());
}

#[test]
fn should_rearm_throttles_on_restart() {
    let stack = stack(staggered());
    stack.service.start();
    stack.service.tick();
    stack.service.stop();

    stack.service.start();

    assert_eq!(stack.service.remaining(ActionKind::ScrollForward), 0);
    assert_eq!(stack.service.remaining(ActionKind::Tap), 2);
    assert_eq!(stack.service.status().ticks, 0);
}

// ---------------------------------------------------------------------------
// Gesture pulses
// ---------------------------------------------------------------------------

#[test]
fn should_pulse_only_gestured_action() {
    let stack = stack(ThrottleConfig {
        scroll_forward: 0,
        scroll_backward: 0,
        tap: 0,
        reset: 5,
    });
    stack.service.start();

    // Index pinch; middle finger and index joint far away.
    let hand = HandLandmarks {
        thumb_tip: Landmark::new(0.5, 0.5, 0.0),
        index_tip: Landmark::new(0.51, 0.5, 0.0),
        index_pip: Landmark::new(0.51, 0.3, 0.0),
        middle_tip: Landmark::new(0.8, 0.5, 0.0),
    };
    let report = stack.service.pulse_hand(&hand);

    assert_eq!(report.actions().len(), 1);
    assert_eq!(
        stack.host.dispatched(),
        vec![record("feed", ElementAction::ScrollForward)]
    );
    assert_eq!(stack.service.remaining(ActionKind::Tap), 0);
}

// ---------------------------------------------------------------------------
// Tick driver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_drive_service_until_tick_budget_is_spent() {
    let stack = stack(staggered());
    stack.service.start();

    let summary = tick_driver::run(
        &stack.service,
        Duration::from_millis(1),
        Some(6),
        std::future::pending(),
    )
    .await;

    assert_eq!(
        summary,
        DriveSummary {
            pulses: 6,
            skipped: 0,
            dispatched: 6,
        }
    );
    assert_eq!(stack.host.dispatched().len(), 6);
    assert_eq!(stack.service.status().ticks, 6);
}
