//! Per-input signal state and the debounce / resend engines that drive it.
//!
//! ## Hardware
//!
//! Every monitored input is an optocoupler output pulled up to 3V3.  At rest
//! the pin reads HIGH; the asserted machine condition pulls it LOW.  All
//! edge semantics here are defined on that inverted reading:
//!
//! | Raw pin | [`Level`]            | Edge into this level |
//! |---------|----------------------|----------------------|
//! | LOW     | `Level::Active`      | `Edge::Positive`     |
//! | HIGH    | `Level::Inactive`    | `Edge::Negative`     |
//!
//! A [`Signal`] lives for the whole process.  It is created once at startup
//! with the resting (inactive) level and both timestamps set to boot time.

pub mod debounce;
pub mod resend;

pub use debounce::Debouncer;
pub use resend::ResendScheduler;

/// Debounced logical level of an active-low input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Pin pulled LOW: the machine condition is asserted.
    Active,
    /// Pin resting HIGH.
    Inactive,
}

impl Level {
    /// Map a raw pin reading onto the active-low convention.
    pub const fn from_raw(raw_high: bool) -> Self {
        if raw_high { Self::Inactive } else { Self::Active }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A debounce-confirmed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Transition to [`Level::Active`].
    Positive,
    /// Transition to [`Level::Inactive`].
    Negative,
}

impl Edge {
    /// Edge that leads into `level`.
    pub const fn into_level(level: Level) -> Self {
        match level {
            Level::Active => Self::Positive,
            Level::Inactive => Self::Negative,
        }
    }
}

/// State of one monitored input.
#[derive(Debug, Clone)]
pub struct Signal {
    pin: i32,
    /// Latest raw sample (true = HIGH).
    raw_level: bool,
    /// Raw sample from the previous poll.
    last_raw_level: bool,
    /// Debounced raw level.
    stable_level: bool,
    last_change_ms: u32,
    last_announce_ms: u32,
    pending_positive_edge: bool,
    pending_negative_edge: bool,
    edge_already_signalled: bool,
    /// Set by the first settle after boot.
    settled_once: bool,
    announce_due: bool,
}

impl Signal {
    /// Create the signal at its resting level.  `now_ms` is boot time.
    pub fn new(pin: i32, now_ms: u32) -> Self {
        Self {
            pin,
            raw_level: true,
            last_raw_level: true,
            stable_level: true,
            last_change_ms: now_ms,
            last_announce_ms: now_ms,
            pending_positive_edge: false,
            pending_negative_edge: false,
            edge_already_signalled: false,
            settled_once: false,
            announce_due: false,
        }
    }

    /// GPIO this signal is sampled from.
    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// Most recent raw sample (true = HIGH).
    pub fn raw_level(&self) -> bool {
        self.raw_level
    }

    /// Debounced logical level.
    pub fn stable_level(&self) -> Level {
        Level::from_raw(self.stable_level)
    }

    pub fn last_change_ms(&self) -> u32 {
        self.last_change_ms
    }

    pub fn last_announce_ms(&self) -> u32 {
        self.last_announce_ms
    }

    pub fn announce_due(&self) -> bool {
        self.announce_due
    }

    /// Edge raised by the debouncer and not yet consumed.
    pub fn pending_edge(&self) -> Option<Edge> {
        if self.pending_positive_edge {
            Some(Edge::Positive)
        } else if self.pending_negative_edge {
            Some(Edge::Negative)
        } else {
            None
        }
    }

    /// Consume the pending edge, if any.
    pub fn take_edge(&mut self) -> Option<Edge> {
        let edge = self.pending_edge();
        self.pending_positive_edge = false;
        self.pending_negative_edge = false;
        edge
    }

    /// Record that a command attributable to this signal went out at `now_ms`.
    pub fn mark_announced(&mut self, now_ms: u32) {
        self.last_announce_ms = now_ms;
        self.announce_due = false;
    }
}
