//! GPIO / peripheral pin assignments for the monitor board.
//!
//! Single source of truth for the default wiring.  Deployments with a
//! different harness override the per-machine pins through
//! [`MonitorConfig`](crate::config::MonitorConfig) instead of editing this
//! file.
//!
//! All machine inputs are optocoupler outputs with the internal pull-up
//! enabled: HIGH = at rest, LOW = condition asserted.

/// Number of GPIOs on the ESP32-S3 (GPIO0 – GPIO48).
pub const GPIO_COUNT: i32 = 49;

// ---------------------------------------------------------------------------
// Machine 1: injection moulding machine
// ---------------------------------------------------------------------------

/// Machine ready / automatic-cycle lamp.  LOW = machine available.
pub const MACHINE1_AVAILABILITY_GPIO: i32 = 4;
/// Reject diverter output.  LOW = current part marked reject.
pub const MACHINE1_REJECT_GPIO: i32 = 5;
/// Mould-closed contact.  LOW = mould closed (part cycle completed).
pub const MACHINE1_COMPLETION_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// UART link to the host
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
/// Host link baud rate.
pub const UART_BAUD: u32 = 115_200;
