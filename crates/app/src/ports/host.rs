//! Host port — the accessibility platform the engine drives.
//!
//! The host owns the UI tree and performs the actual interactions. The engine
//! only reads the current snapshot and asks for actions to be dispatched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use axpulse_domain::element::{Element, ElementAction};
use axpulse_domain::error::{DispatchError, ValidationError};

/// Title and body of the persistent notice shown while the service runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForegroundPresentation {
    pub title: String,
    pub message: String,
}

impl Default for ForegroundPresentation {
    fn default() -> Self {
        Self {
            title: "Gesture Service".to_string(),
            message: "Gesture control is active".to_string(),
        }
    }
}

impl ForegroundPresentation {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// The accessibility host: tree snapshots, dispatch and foreground mode.
///
/// Implementations live in adapter crates (e.g. `adapter_virtual`).
/// The automation service calls, per tick:
///
/// 1. [`active_root`](Self::active_root), once
/// 2. [`dispatch`](Self::dispatch), for each due action with a target
///
/// and, on lifecycle transitions, [`enter_foreground`](Self::enter_foreground)
/// / [`exit_foreground`](Self::exit_foreground), strictly alternating.
pub trait HostPlatform: Send + Sync {
    /// Handle type for tree nodes. Valid for one tick only.
    type Element: Element;

    /// Root of the active window, or `None` when no window is available.
    fn active_root(&self) -> Option<Self::Element>;

    /// Perform `action` on `element`. Best-effort; never retried.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the host could not perform the action.
    fn dispatch(&self, element: &Self::Element, action: ElementAction)
    -> Result<(), DispatchError>;

    /// Enter the persistent foreground mode so the host keeps the process alive.
    fn enter_foreground(&self, presentation: &ForegroundPresentation);

    /// Leave foreground mode.
    fn exit_foreground(&self);
}

impl<T: HostPlatform> HostPlatform for Arc<T> {
    type Element = T::Element;

    fn active_root(&self) -> Option<Self::Element> {
        (**self).active_root()
    }

    fn dispatch(
        &self,
        element: &Self::Element,
        action: ElementAction,
    ) -> Result<(), DispatchError> {
        (**self).dispatch(element, action)
    }

    fn enter_foreground(&self, presentation: &ForegroundPresentation) {
        (**self).enter_foreground(presentation);
    }

    fn exit_foreground(&self) {
        (**self).exit_foreground();
    }
}
