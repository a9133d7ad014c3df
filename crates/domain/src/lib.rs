//! # axpulse-domain
//!
//! Pure domain model for the axpulse automation agent.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Element** view over a host UI tree and the host-level
//!   [`ElementAction`](element::ElementAction) identifiers
//! - Define the three **action kinds** and their capability predicates
//! - Define the **throttle** countdown that paces each action
//! - Breadth-first **tree search** for the shallowest matching element
//! - Map pre-computed hand landmarks onto action **pulses**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod element;
pub mod gesture;
pub mod state;
pub mod throttle;
pub mod tree_search;
