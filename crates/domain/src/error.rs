//! Common error types used across the workspace.
//!
//! "Nothing to act on" is never an error here: a missing root or an
//! unmatched search are ordinary outcomes reported by the engine.

use crate::element::ElementAction;

/// A value failed a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("foreground title must not be empty")]
    EmptyTitle,

    #[error("tick interval must be non-zero")]
    ZeroInterval,

    #[error("gesture threshold for {name} must be a positive finite number")]
    InvalidThreshold { name: &'static str },
}

/// The host refused or failed to perform a dispatched action.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The element was invalidated by the host before the action ran.
    #[error("element is no longer attached to the tree")]
    Detached,

    /// The host rejected the action for this element.
    #[error("element does not accept {action}")]
    Unsupported { action: ElementAction },

    /// Any other host-side failure.
    #[error("host dispatch failed")]
    Host(#[source] Box<dyn std::error::Error + Send + Sync>),
}
