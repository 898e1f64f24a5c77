//! Core library components.
//!
//! Path resolution, secret discovery, overlay collection, and the
//! orchestration that drives the external tools.

pub mod config;
pub mod constants;
pub mod deploy;
pub mod layout;
pub mod overlays;
pub mod provision;
pub mod runner;
pub mod secrets;
pub mod tools;
pub mod types;
pub mod validation;
