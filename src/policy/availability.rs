//! Level policy for machine availability.
//!
//! Announces the current stable level whenever it changes or the resend
//! scheduler marks the signal due.  Exactly one of `On` / `Off` per
//! announcement, chosen from the stable level at that moment.

use super::CommandKind;
use crate::signal::{Level, Signal};

#[derive(Debug, Default, Clone, Copy)]
pub struct AvailabilityPolicy;

impl AvailabilityPolicy {
    /// Command for a stable availability level.
    pub const fn command_for(level: Level) -> CommandKind {
        match level {
            Level::Active => CommandKind::On,
            Level::Inactive => CommandKind::Off,
        }
    }

    /// Consume any pending edge and decide whether to announce.
    ///
    /// Does not touch `announce_due` or the announce timestamp; the caller
    /// stamps the signal with [`Signal::mark_announced`] once the command is
    /// out.
    pub fn evaluate(&self, signal: &mut Signal) -> Option<CommandKind> {
        let edge = signal.take_edge();
        if edge.is_none() && !signal.announce_due() {
            return None;
        }
        Some(Self::command_for(signal.stable_level()))
    }
}
