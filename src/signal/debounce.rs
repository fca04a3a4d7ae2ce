//! Time-based debounce with edge detection.
//!
//! Every raw change restarts the stability timer, so an input that keeps
//! bouncing never reaches the threshold and never produces an edge.  Once
//! the raw level has held for longer than the delay it becomes the stable
//! level, and one edge flag is raised if that level differs from the
//! previous stable one.  The first settle after boot always reports.

use super::{Edge, Level, Signal};
use crate::timing::elapsed_ms;

/// Default stability window.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Debounce engine shared by all signals.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay_ms: u32,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Feed a fresh raw sample taken at `now_ms`.
    ///
    /// Returns the edge raised by this poll, if the sample completed a
    /// genuine transition.  The edge also stays pending on the signal until
    /// the policy consumes it or the raw level changes again.
    pub fn poll(&self, signal: &mut Signal, raw_high: bool, now_ms: u32) -> Option<Edge> {
        signal.last_raw_level = signal.raw_level;
        signal.raw_level = raw_high;

        if signal.raw_level != signal.last_raw_level {
            signal.last_change_ms = now_ms;
            signal.edge_already_signalled = false;
            signal.pending_positive_edge = false;
            signal.pending_negative_edge = false;
        }

        if elapsed_ms(now_ms, signal.last_change_ms) <= self.delay_ms {
            return None;
        }

        if signal.edge_already_signalled {
            return None;
        }
        signal.edge_already_signalled = true;

        // A settle back onto the current stable level is noise, except for
        // the first settle after boot, which reports the resting level.
        let changed = signal.raw_level != signal.stable_level || !signal.settled_once;
        signal.stable_level = signal.raw_level;
        signal.settled_once = true;
        if !changed {
            return None;
        }

        let edge = Edge::into_level(Level::from_raw(signal.stable_level));
        match edge {
            Edge::Positive => signal.pending_positive_edge = true,
            Edge::Negative => signal.pending_negative_edge = true,
        }
        Some(edge)
    }
}
