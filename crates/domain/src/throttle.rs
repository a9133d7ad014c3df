//! Action throttle — a countdown that paces how often an action may fire.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;

/// Ticks between firings once an action has fired at least once.
pub const DEFAULT_RESET: u32 = 5;

/// Countdown counter for a single [`ActionKind`].
///
/// Each [`tick`](Self::tick) either reports the action as due (when the
/// counter has reached zero) and re-arms it to `reset`, or decrements.
/// With `reset = R` the action is due once every `R + 1` ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionThrottle {
    kind: ActionKind,
    remaining: u32,
    reset: u32,
}

impl ActionThrottle {
    /// Create a throttle that first fires after `initial` silent ticks.
    #[must_use]
    pub fn new(kind: ActionKind, initial: u32, reset: u32) -> Self {
        Self {
            kind,
            remaining: initial,
            reset,
        }
    }

    /// Advance by one tick. Returns `true` when the action is due now.
    ///
    /// A due slot is spent whether or not a target is later found.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            self.remaining = self.reset;
            true
        } else {
            self.remaining -= 1;
            false
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Ticks left before the action is due.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn reset_value(&self) -> u32 {
        self.reset
    }
}

/// Per-action initial countdowns plus the shared reset value.
///
/// The initial values stagger the first firings; the defaults hold the
/// scrolls back for 60 ticks and the tap for 40.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub scroll_forward: u32,
    pub scroll_backward: u32,
    pub tap: u32,
    pub reset: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            scroll_forward: 60,
            scroll_backward: 60,
            tap: 40,
            reset: DEFAULT_RESET,
        }
    }
}

impl ThrottleConfig {
    /// Initial countdown configured for `kind`.
    #[must_use]
    pub fn initial(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::ScrollForward => self.scroll_forward,
            ActionKind::ScrollBackward => self.scroll_backward,
            ActionKind::Tap => self.tap,
        }
    }

    /// Build a freshly armed throttle for `kind`.
    #[must_use]
    pub fn throttle(&self, kind: ActionKind) -> ActionThrottle {
        ActionThrottle::new(kind, self.initial(kind), self.reset)
    }
}
