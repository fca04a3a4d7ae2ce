//! Machine signal monitor firmware library.
//!
//! Reads optocoupled machine inputs, debounces them, and reports machine
//! availability and completed parts to a host as single-entry JSON
//! commands over a serial link.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod pins;
pub mod policy;
pub mod signal;
pub mod timing;
pub mod transport;

pub mod adapters;
pub mod drivers;
