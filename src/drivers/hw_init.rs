//! One-shot hardware peripheral initialization.
//!
//! Configures every monitored input as a pulled-up GPIO input using raw
//! ESP-IDF sys calls.  Called once from `main()` before the poll loop
//! starts.  On host targets the GPIO layer is simulated: every pin rests
//! HIGH until a test drives it with [`sim_set_level`].

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::MonitorConfig;
#[cfg(not(target_os = "espidf"))]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed { pin: i32, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed { pin, rc } => {
                write!(f, "GPIO{} config failed (rc={})", pin, rc)
            }
        }
    }
}

impl std::error::Error for HwInitError {}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_inputs(config: &MonitorConfig) -> Result<(), HwInitError> {
    for machine in &config.machines {
        for pin in machine.pins() {
            let cfg = gpio_config_t {
                pin_bit_mask: 1u64 << pin,
                mode: gpio_mode_t_GPIO_MODE_INPUT,
                pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
                pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
                intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            };
            // SAFETY: called once from main() before the poll loop;
            // single-threaded, and `cfg` outlives the call.
            let rc = unsafe { gpio_config(&cfg) };
            if rc != ESP_OK as i32 {
                return Err(HwInitError::GpioConfigFailed { pin, rc });
            }
        }
    }
    log::info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_inputs(config: &MonitorConfig) -> Result<(), HwInitError> {
    let count: usize = config.machines.iter().map(|m| m.pins().count()).sum();
    log::info!("hw_init(sim): {} input(s), configuration skipped", count);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

// ── Simulation ────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_LEVELS: [AtomicBool; pins::GPIO_COUNT as usize] =
    [const { AtomicBool::new(true) }; pins::GPIO_COUNT as usize];

/// Drive a simulated input pin.  Out-of-range pins are ignored.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    if let Some(level) = usize::try_from(pin).ok().and_then(|i| SIM_LEVELS.get(i)) {
        level.store(high, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    usize::try_from(pin)
        .ok()
        .and_then(|i| SIM_LEVELS.get(i))
        .is_none_or(|level| level.load(Ordering::Relaxed))
}
