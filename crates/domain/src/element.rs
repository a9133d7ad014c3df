//! Element — a read-only view over one node of the host's UI tree.
//!
//! The host owns the tree. Implementations are cheap handles (reference
//! counted nodes, platform object proxies, …) that are only valid for the
//! duration of a single tick and must never be stored across ticks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Host-level action identifier an element may advertise and receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementAction {
    ScrollForward,
    ScrollBackward,
    Click,
}

impl fmt::Display for ElementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScrollForward => f.write_str("scroll_forward"),
            Self::ScrollBackward => f.write_str("scroll_backward"),
            Self::Click => f.write_str("click"),
        }
    }
}

/// A node of the host UI tree, as consumed by the search.
///
/// `Clone` must be cheap: one root snapshot is searched once per due action.
pub trait Element: Clone {
    /// Number of child slots, in index order.
    fn child_count(&self) -> usize;

    /// Child at `index`, or `None` when the host has already invalidated it.
    fn child(&self, index: usize) -> Option<Self>;

    /// Whether the element advertises `action` in its action list.
    fn supports(&self, action: ElementAction) -> bool;

    fn is_scrollable(&self) -> bool;

    fn is_clickable(&self) -> bool;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_snake_case_identifiers() {
        assert_eq!(ElementAction::ScrollForward.to_string(), "scroll_forward");
        assert_eq!(ElementAction::ScrollBackward.to_string(), "scroll_backward");
        assert_eq!(ElementAction::Click.to_string(), "click");
    }

    #[test]
    fn should_deserialize_from_snake_case() {
        let action: ElementAction = serde_json::from_str("\"scroll_backward\"").unwrap();
        assert_eq!(action, ElementAction::ScrollBackward);
    }
}
