//! System configuration parameters
//!
//! All tunable parameters for the monitor.  Defaults reproduce the standard
//! single-machine harness from [`pins`](crate::pins); a JSON document can
//! override them at build time (see `main.rs`).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;
use crate::signal::debounce::DEFAULT_DEBOUNCE_MS;
use crate::signal::resend::DEFAULT_RESEND_PERIOD_MS;

/// Maximum number of machines one board can monitor.
pub const MAX_MACHINES: usize = 4;
/// Maximum machine name length (bytes).
pub const MAX_MACHINE_NAME_LEN: usize = 32;

pub type MachineName = heapless::String<MAX_MACHINE_NAME_LEN>;

/// Wiring of one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Command prefix, e.g. `InjectionMouldingMachine1`.
    pub name: MachineName,
    /// Availability input (LOW = available).
    pub availability_pin: i32,
    /// Mould-close input (LOW = part completed).
    pub completion_pin: i32,
    /// Reject input (LOW = reject).  `None` classifies every part as good.
    #[serde(default)]
    pub reject_pin: Option<i32>,
}

impl MachineConfig {
    pub fn new(
        name: &str,
        availability_pin: i32,
        completion_pin: i32,
        reject_pin: Option<i32>,
    ) -> Result<Self, ConfigError> {
        let mut owned = MachineName::new();
        owned
            .push_str(name)
            .map_err(|()| ConfigError::InvalidMachineName)?;
        Ok(Self {
            name: owned,
            availability_pin,
            completion_pin,
            reject_pin,
        })
    }

    /// Inputs in poll order: availability, reject, completion.
    pub fn pins(&self) -> impl Iterator<Item = i32> + '_ {
        [Some(self.availability_pin), self.reject_pin, Some(self.completion_pin)]
            .into_iter()
            .flatten()
    }
}

/// Core monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Minimum stable time before a raw change is accepted (milliseconds)
    pub debounce_ms: u32,
    /// Availability re-announcement period (milliseconds)
    pub resend_period_ms: u32,
    /// Main loop poll interval (milliseconds)
    pub poll_interval_ms: u32,
    /// Terminate each wire message with `\n`
    pub append_newline: bool,
    /// Statistics log interval (seconds, 0 = never)
    pub stats_interval_secs: u32,
    /// Monitored machines, processed in this order
    pub machines: heapless::Vec<MachineConfig, MAX_MACHINES>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        let mut machines = heapless::Vec::new();
        if let Ok(m) = MachineConfig::new(
            "InjectionMouldingMachine1",
            pins::MACHINE1_AVAILABILITY_GPIO,
            pins::MACHINE1_COMPLETION_GPIO,
            Some(pins::MACHINE1_REJECT_GPIO),
        ) {
            let _ = machines.push(m);
        }

        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,         // 50 ms
            resend_period_ms: DEFAULT_RESEND_PERIOD_MS, // 1/min
            poll_interval_ms: 5,
            append_newline: false,
            stats_interval_secs: 300,
            machines,
        }
    }
}

impl MonitorConfig {
    /// Parse a JSON override document and validate it.  Missing fields take
    /// their defaults.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(doc).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would break the monitor's timing or
    /// produce malformed command identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.resend_period_ms <= self.debounce_ms {
            return Err(ConfigError::ResendTooShort);
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms >= self.debounce_ms {
            return Err(ConfigError::InvalidPollInterval);
        }
        if self.machines.is_empty() {
            return Err(ConfigError::NoMachines);
        }

        let mut seen: heapless::Vec<i32, { 3 * MAX_MACHINES }> = heapless::Vec::new();
        for machine in &self.machines {
            if !is_valid_name(&machine.name) {
                return Err(ConfigError::InvalidMachineName);
            }
            for pin in machine.pins() {
                if !(0..pins::GPIO_COUNT).contains(&pin) {
                    return Err(ConfigError::PinOutOfRange(pin));
                }
                if seen.contains(&pin) {
                    return Err(ConfigError::DuplicatePin(pin));
                }
                // Capacity is exactly three pins per machine.
                let _ = seen.push(pin);
            }
        }
        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
