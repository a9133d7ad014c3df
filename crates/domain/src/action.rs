//! Action kinds — the three interactions the engine can inject.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementAction};

/// One of the fixed interactions driven by the engine.
///
/// [`ActionKind::ALL`] is also the evaluation order within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ScrollForward,
    ScrollBackward,
    Tap,
}

impl ActionKind {
    /// Every kind, in evaluation order.
    pub const ALL: [Self; 3] = [Self::ScrollForward, Self::ScrollBackward, Self::Tap];

    /// The host action dispatched when this kind fires.
    #[must_use]
    pub fn element_action(self) -> ElementAction {
        match self {
            Self::ScrollForward => ElementAction::ScrollForward,
            Self::ScrollBackward => ElementAction::ScrollBackward,
            Self::Tap => ElementAction::Click,
        }
    }

    /// Capability predicate: does `element` qualify as a target for this kind?
    ///
    /// The element must both advertise the host action and carry the
    /// matching scrollable/clickable flag.
    pub fn matches<E: Element>(self, element: &E) -> bool {
        if !element.supports(self.element_action()) {
            return false;
        }
        match self {
            Self::ScrollForward | Self::ScrollBackward => element.is_scrollable(),
            Self::Tap => element.is_clickable(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScrollForward => f.write_str("scroll_forward"),
            Self::ScrollBackward => f.write_str("scroll_backward"),
            Self::Tap => f.write_str("tap"),
        }
    }
}
