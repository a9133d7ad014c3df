//! # axpulse-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **driven port** adapters must implement:
//!   - `HostPlatform` — active tree snapshot, action dispatch, foreground mode
//! - Provide the **automation engine** that paces and targets actions
//! - Provide the **handle registry** through which a control surface finds
//!   the running service
//! - Provide the **automation service** — the Stopped/Running lifecycle that
//!   gates the engine and publishes itself in the registry
//! - Provide the **tick driver** that pulses a service on a fixed period
//!
//! ## Dependency rule
//! Depends on `axpulse-domain` only (plus `tokio` for the watch channel and
//! the tick driver).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod automation_engine;
pub mod handle_registry;
pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;
