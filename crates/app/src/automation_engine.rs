//! Automation engine — paces the three actions and picks their targets.
//!
//! The engine owns one [`ActionThrottle`] per [`ActionKind`]. On every pulse
//! each selected throttle advances; when one comes due, the engine searches
//! the current tree snapshot for the shallowest element with the matching
//! capability and asks the host to dispatch the action on it.
//!
//! The engine itself has no notion of running or stopped. Gating happens in
//! [`AutomationService`](crate::services::automation_service::AutomationService).

use axpulse_domain::action::ActionKind;
use axpulse_domain::throttle::{ActionThrottle, ThrottleConfig};
use axpulse_domain::tree_search;

use crate::ports::HostPlatform;

/// What happened to a single action during one pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Not due yet; `remaining` ticks left after this one.
    Waiting { remaining: u32 },
    /// Due, a target was found and the host accepted the action.
    Dispatched,
    /// Due, but no element in the tree has the capability.
    NotFound,
    /// Due, but the host had no active window.
    NoActiveRoot,
    /// Due and targeted, but the host reported a failure.
    DispatchFailed,
}

/// Outcome for one action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionReport {
    pub kind: ActionKind,
    pub outcome: ActionOutcome,
}

/// Diagnostics for one pulse. Never an error: "nothing happened" is normal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    skipped: bool,
    actions: Vec<ActionReport>,
}

impl TickReport {
    /// Report for a pulse that arrived while the service was stopped.
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// Per-action outcomes, in evaluation order.
    #[must_use]
    pub fn actions(&self) -> &[ActionReport] {
        &self.actions
    }

    /// Outcome for `kind`, if it was evaluated during this pulse.
    #[must_use]
    pub fn outcome(&self, kind: ActionKind) -> Option<ActionOutcome> {
        self.actions
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.outcome)
    }

    /// Kinds that were dispatched during this pulse.
    pub fn dispatched(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.actions
            .iter()
            .filter(|r| r.outcome == ActionOutcome::Dispatched)
            .map(|r| r.kind)
    }
}

/// Countdown-driven automation engine.
#[derive(Debug, Clone)]
pub struct AutomationEngine {
    throttles: [ActionThrottle; 3],
}

impl AutomationEngine {
    /// Create an engine with freshly armed throttles.
    #[must_use]
    pub fn new(config: &ThrottleConfig) -> Self {
        Self {
            throttles: ActionKind::ALL.map(|kind| config.throttle(kind)),
        }
    }

    /// Current throttle for `kind`.
    #[must_use]
    pub fn throttle(&self, kind: ActionKind) -> &ActionThrottle {
        &self.throttles[Self::slot(kind)]
    }

    /// Advance all three throttles against `root`.
    pub fn tick<H: HostPlatform>(&mut self, host: &H, root: Option<&H::Element>) -> TickReport {
        self.tick_selected(host, root, &ActionKind::ALL)
    }

    /// Advance only the throttles named in `kinds`, in fixed evaluation order.
    ///
    /// Throttles not named keep their countdown untouched.
    pub fn tick_selected<H: HostPlatform>(
        &mut self,
        host: &H,
        root: Option<&H::Element>,
        kinds: &[ActionKind],
    ) -> TickReport {
        let mut report = TickReport::default();

        for throttle in &mut self.throttles {
            let kind = throttle.kind();
            if !kinds.contains(&kind) {
                continue;
            }
            let outcome = if throttle.tick() {
                fire(host, root, kind)
            } else {
                ActionOutcome::Waiting {
                    remaining: throttle.remaining(),
                }
            };
            report.actions.push(ActionReport { kind, outcome });
        }

        report
    }

    fn slot(kind: ActionKind) -> usize {
        match kind {
            ActionKind::ScrollForward => 0,
            ActionKind::ScrollBackward => 1,
            ActionKind::Tap => 2,
        }
    }
}

/// Search for a target and dispatch `kind` on it.
fn fire<H: HostPlatform>(host: &H, root: Option<&H::Element>, kind: ActionKind) -> ActionOutcome {
    let Some(root) = root else {
        tracing::debug!(action = %kind, "action due but no active window");
        return ActionOutcome::NoActiveRoot;
    };

    let Some(target) = tree_search::find(Some(root.clone()), |e| kind.matches(e)) else {
        tracing::debug!(action = %kind, "action due but no matching element");
        return ActionOutcome::NotFound;
    };

    match host.dispatch(&target, kind.element_action()) {
        Ok(()) => {
            tracing::debug!(action = %kind, "action dispatched");
            ActionOutcome::Dispatched
        }
        Err(err) => {
            tracing::warn!(%err, action = %kind, "host failed to dispatch action");
            ActionOutcome::DispatchFailed
        }
    }
}
