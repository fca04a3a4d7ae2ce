//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port for diagnostics.
//! They are separate from the wire commands sent to the host.

use crate::config::MachineName;
use crate::error::{DispatchError, SampleError};
use crate::policy::CommandKind;
use crate::signal::Edge;

/// Which input of a machine an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    Availability,
    Reject,
    Completion,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// The service has started (carries the number of machines).
    Started { machines: usize },

    /// The debouncer confirmed a transition.
    EdgeDetected {
        machine: MachineName,
        input: InputRole,
        edge: Edge,
    },

    /// A reject mark was latched for the next completed part.
    RejectLatched { machine: MachineName },

    /// A command was handed to the transport.
    CommandSent {
        machine: MachineName,
        kind: CommandKind,
        /// True when the command was a periodic re-announcement.
        resend: bool,
    },

    /// Encoding or transport write failed.
    DispatchFailed {
        machine: MachineName,
        kind: CommandKind,
        error: DispatchError,
    },

    /// An input could not be read; the previous sample was reused.
    SampleFailed { error: SampleError },
}

/// Running counters, reported periodically by the main loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonitorStats {
    pub poll_cycles: u64,
    pub on_sent: u32,
    pub off_sent: u32,
    pub good_parts: u32,
    pub reject_parts: u32,
    pub resends: u32,
    pub dispatch_failures: u32,
    pub sample_failures: u32,
}

impl MonitorStats {
    pub fn record_sent(&mut self, kind: CommandKind) {
        let counter = match kind {
            CommandKind::On => &mut self.on_sent,
            CommandKind::Off => &mut self.off_sent,
            CommandKind::GoodPartsCompleted => &mut self.good_parts,
            CommandKind::RejectPartsCompleted => &mut self.reject_parts,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn commands_sent(&self) -> u32 {
        self.on_sent + self.off_sent + self.good_parts + self.reject_parts
    }
}
