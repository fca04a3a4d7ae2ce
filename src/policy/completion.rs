//! Edge policy for part completion with reject classification.
//!
//! The reject input marks the part *before* the mould opens; the completion
//! input (mould-close) is the event that actually denotes a finished part.
//! A reject edge only arms the latch.  The next completion edge reads and
//! clears it, whichever way it classified the part, so one reject mark can
//! never bleed into the following cycle.
//!
//! The reject signal must be polled and observed before the completion
//! signal within a cycle; [`MonitorService`](crate::app::service::MonitorService)
//! guarantees that ordering.

use super::CommandKind;
use crate::signal::{Edge, Signal};

#[derive(Debug, Default, Clone)]
pub struct CompletionPolicy {
    reject_latched: bool,
}

impl CompletionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_reject_latched(&self) -> bool {
        self.reject_latched
    }

    /// Consume the reject signal's edge.  Returns `true` when this call armed
    /// the latch.
    pub fn observe_reject(&mut self, reject: &mut Signal) -> bool {
        if reject.take_edge() == Some(Edge::Positive) {
            self.reject_latched = true;
            return true;
        }
        false
    }

    /// Consume the completion signal's edge and classify the part.
    pub fn observe_completion(&mut self, completion: &mut Signal) -> Option<CommandKind> {
        if completion.take_edge() != Some(Edge::Positive) {
            return None;
        }
        let kind = if self.reject_latched {
            CommandKind::RejectPartsCompleted
        } else {
            CommandKind::GoodPartsCompleted
        };
        self.reject_latched = false;
        Some(kind)
    }
}
