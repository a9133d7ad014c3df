//! Application services — use-cases driven by the host adapter.

pub mod automation_service;
pub mod tick_driver;
