//! Application core: Pure domain logic, zero I/O.
//!
//! This module contains the poll-cycle orchestration: sampling every input,
//! debouncing, resend scheduling, and the event policies.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
