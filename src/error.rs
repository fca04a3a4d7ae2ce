//! Unified error types for the monitor firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! poll loop's error handling uniform.  All variants are `Copy` so they can
//! be passed through the service and logged without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
    /// A command could not be encoded or written.
    Dispatch(DispatchError),
    /// An input pin could not be sampled.
    Sample(SampleError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Dispatch(e) => write!(f, "dispatch: {e}"),
            Self::Sample(e) => write!(f, "sample: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON override document could not be parsed.
    Parse,
    /// No machine is configured.
    NoMachines,
    /// Machine name is empty, too long, or contains characters that are not
    /// allowed in a command identifier.
    InvalidMachineName,
    /// Debounce delay must be non-zero.
    ZeroDebounce,
    /// Resend period must be longer than the debounce delay.
    ResendTooShort,
    /// Poll interval must be non-zero and shorter than the debounce delay.
    InvalidPollInterval,
    /// The same GPIO is assigned to two inputs.
    DuplicatePin(i32),
    /// GPIO number is outside the chip's range.
    PinOutOfRange(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "could not parse config document"),
            Self::NoMachines => write!(f, "no machines configured"),
            Self::InvalidMachineName => write!(f, "invalid machine name"),
            Self::ZeroDebounce => write!(f, "debounce delay is zero"),
            Self::ResendTooShort => write!(f, "resend period not above debounce delay"),
            Self::InvalidPollInterval => write!(f, "poll interval out of range"),
            Self::DuplicatePin(pin) => write!(f, "GPIO {pin} assigned twice"),
            Self::PinOutOfRange(pin) => write!(f, "GPIO {pin} out of range"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Dispatch errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Serialising the wire message failed.
    Encode,
    /// Command identifier does not fit the fixed-capacity buffer.
    IdTooLong,
    /// The transport rejected the write or wrote only part of the message.
    Transport,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "encode failed"),
            Self::IdTooLong => write!(f, "command identifier too long"),
            Self::Transport => write!(f, "transport write failed"),
        }
    }
}

impl From<DispatchError> for Error {
    fn from(e: DispatchError) -> Self {
        Self::Dispatch(e)
    }
}

// ---------------------------------------------------------------------------
// Sample errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleError {
    /// GPIO read returned an error.
    GpioReadFailed(i32),
    /// No input is registered for this GPIO.
    UnknownPin(i32),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed(pin) => write!(f, "GPIO {pin} read failed"),
            Self::UnknownPin(pin) => write!(f, "GPIO {pin} not registered"),
        }
    }
}

impl From<SampleError> for Error {
    fn from(e: SampleError) -> Self {
        Self::Sample(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
