//! # axpulse-adapter-virtual
//!
//! Virtual/demo host that provides an in-memory UI tree for testing and
//! demonstration purposes.
//!
//! ## Behaviour
//!
//! | Action | Effect on the target node |
//! |--------|---------------------------|
//! | `scroll_forward` | scroll position + 1 |
//! | `scroll_backward` | scroll position − 1, floored at 0 |
//! | `click` | click count + 1 |
//!
//! Every accepted dispatch is also appended to a log. Foreground mode is a
//! flag holding the last presentation entered.
//!
//! Recorded hand tracks ([`track`]) stand in for a live hand tracker.
//!
//! ## Dependency rule
//!
//! Depends on `axpulse-app` (port traits) and `axpulse-domain` only.

mod node;
pub mod scene;
pub mod track;

pub use node::{VirtualElement, VirtualElementBuilder};

use std::sync::{Mutex, MutexGuard, PoisonError};

use axpulse_app::ports::{ForegroundPresentation, HostPlatform};
use axpulse_domain::element::ElementAction;
use axpulse_domain::error::DispatchError;

/// One accepted dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRecord {
    pub node: String,
    pub action: ElementAction,
}

/// In-memory host platform.
#[derive(Default)]
pub struct VirtualHost {
    root: Mutex<Option<VirtualElement>>,
    log: Mutex<Vec<DispatchRecord>>,
    foreground: Mutex<Option<ForegroundPresentation>>,
}

impl VirtualHost {
    /// Create a host whose active window shows `root`.
    #[must_use]
    pub fn new(root: VirtualElement) -> Self {
        let host = Self::default();
        host.set_root(root);
        host
    }

    /// Replace the active window. The previous tree, if different, is detached.
    pub fn set_root(&self, root: VirtualElement) {
        let previous = lock(&self.root).replace(root.clone());
        if let Some(previous) = previous.filter(|previous| !previous.ptr_eq(&root)) {
            previous.detach();
        }
    }

    /// Simulate "no active window". The previous tree is detached.
    pub fn clear_root(&self) {
        if let Some(previous) = lock(&self.root).take() {
            previous.detach();
        }
    }

    /// The active window's root, without going through the port.
    #[must_use]
    pub fn root(&self) -> Option<VirtualElement> {
        lock(&self.root).clone()
    }

    /// All accepted dispatches so far, oldest first.
    #[must_use]
    pub fn dispatched(&self) -> Vec<DispatchRecord> {
        lock(&self.log).clone()
    }

    /// The presentation currently shown, if in foreground mode.
    #[must_use]
    pub fn foreground(&self) -> Option<ForegroundPresentation> {
        lock(&self.foreground).clone()
    }
}

impl HostPlatform for VirtualHost {
    type Element = VirtualElement;

    fn active_root(&self) -> Option<VirtualElement> {
        self.root()
    }

    fn dispatch(
        &self,
        element: &VirtualElement,
        action: ElementAction,
    ) -> Result<(), DispatchError> {
        element.perform(action)?;
        tracing::debug!(node = element.name(), %action, "virtual action performed");
        lock(&self.log).push(DispatchRecord {
            node: element.name().to_string(),
            action,
        });
        Ok(())
    }

    fn enter_foreground(&self, presentation: &ForegroundPresentation) {
        tracing::info!(title = %presentation.title, "virtual host entered foreground");
        *lock(&self.foreground) = Some(presentation.clone());
    }

    fn exit_foreground(&self) {
        tracing::info!("virtual host left foreground");
        *lock(&self.foreground) = None;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
