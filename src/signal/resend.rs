//! Periodic re-announcement of a signal's current level.
//!
//! Availability has no natural repeat trigger, so a lost serial message
//! would leave the host with a stale state forever.  The scheduler flags a
//! signal as due once `period` has passed since its last announcement,
//! independent of any edge.

use super::Signal;
use crate::timing::elapsed_ms;

/// Default resend period (one minute).
pub const DEFAULT_RESEND_PERIOD_MS: u32 = 60_000;

#[derive(Debug, Clone, Copy)]
pub struct ResendScheduler {
    period_ms: u32,
}

impl Default for ResendScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_PERIOD_MS)
    }
}

impl ResendScheduler {
    pub fn new(period_ms: u32) -> Self {
        Self { period_ms }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Flag `signal` for re-announcement if its period has lapsed.
    /// Returns the resulting `announce_due` state.
    pub fn check(&self, signal: &mut Signal, now_ms: u32) -> bool {
        if elapsed_ms(now_ms, signal.last_announce_ms) > self.period_ms {
            signal.announce_due = true;
        }
        signal.announce_due
    }
}
