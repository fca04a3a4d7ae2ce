//! Event policy: Turns debounced edges into command identifiers.
//!
//! ```text
//!   availability ──▶ AvailabilityPolicy ──▶ <Machine>_on / <Machine>_off
//!   reject ────────▶ ┐
//!                    CompletionPolicy ───▶ <Machine>_good_parts_completed
//!   completion ────▶ ┘                     <Machine>_reject_parts_completed
//! ```
//!
//! Policies decide *what* to send; the service performs the dispatch and
//! stamps the originating signal afterwards.

pub mod availability;
pub mod completion;

pub use availability::AvailabilityPolicy;
pub use completion::CompletionPolicy;

use core::fmt::Write;

use crate::config::MAX_MACHINE_NAME_LEN;
use crate::error::DispatchError;

/// Longest suffix in the vocabulary plus the `_` separator.
const MAX_SUFFIX_LEN: usize = 1 + "reject_parts_completed".len();

/// Capacity of a fully-qualified command identifier.
pub const MAX_COMMAND_ID_LEN: usize = MAX_MACHINE_NAME_LEN + MAX_SUFFIX_LEN;

/// Fully-qualified identifier, e.g. `InjectionMouldingMachine1_on`.
pub type CommandId = heapless::String<MAX_COMMAND_ID_LEN>;

/// The fixed command vocabulary of this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Machine became (or still is) available.
    On,
    /// Machine became (or still is) unavailable.
    Off,
    GoodPartsCompleted,
    RejectPartsCompleted,
}

impl CommandKind {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::GoodPartsCompleted => "good_parts_completed",
            Self::RejectPartsCompleted => "reject_parts_completed",
        }
    }

    /// Build `<machine>_<suffix>`.
    pub fn command_id(self, machine: &str) -> Result<CommandId, DispatchError> {
        let mut id = CommandId::new();
        write!(id, "{}_{}", machine, self.suffix()).map_err(|_| DispatchError::IdTooLong)?;
        Ok(id)
    }
}

/// Pre-built identifiers for one machine, so the poll loop never formats.
#[derive(Debug, Clone)]
pub struct MachineCommands {
    on: CommandId,
    off: CommandId,
    good: CommandId,
    reject: CommandId,
}

impl MachineCommands {
    pub fn new(machine: &str) -> Result<Self, DispatchError> {
        Ok(Self {
            on: CommandKind::On.command_id(machine)?,
            off: CommandKind::Off.command_id(machine)?,
            good: CommandKind::GoodPartsCompleted.command_id(machine)?,
            reject: CommandKind::RejectPartsCompleted.command_id(machine)?,
        })
    }

    pub fn id(&self, kind: CommandKind) -> &str {
        match kind {
            CommandKind::On => &self.on,
            CommandKind::Off => &self.off,
            CommandKind::GoodPartsCompleted => &self.good,
            CommandKind::RejectPartsCompleted => &self.reject,
        }
    }
}
