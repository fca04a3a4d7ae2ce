//! Hardware adapters: Bridge physical inputs to the [`SamplePort`].
//!
//! Two flavours:
//!
//! - [`GpioSampler`] reads configured pins straight from the GPIO
//!   registers via [`hw_init::gpio_read`]; on non-espidf targets that call
//!   is backed by the simulation table.
//! - [`HalInputs`] owns a set of `embedded-hal` input pins, for boards
//!   where the inputs are driven through a HAL (`PinDriver`, port
//!   expanders, etc.).

use embedded_hal::digital::InputPin;

use crate::app::ports::SamplePort;
use crate::drivers::hw_init;
use crate::error::SampleError;

/// Upper bound on pins held by [`HalInputs`].
pub const MAX_HAL_INPUTS: usize = 12;

// ── Raw GPIO ──────────────────────────────────────────────────

/// Samples any pin configured by [`hw_init::init_inputs`].
#[derive(Debug, Default)]
pub struct GpioSampler;

impl GpioSampler {
    pub fn new() -> Self {
        Self
    }
}

impl SamplePort for GpioSampler {
    fn read_level(&mut self, pin: i32) -> Result<bool, SampleError> {
        Ok(hw_init::gpio_read(pin))
    }
}

// ── embedded-hal ──────────────────────────────────────────────

/// A fixed set of `embedded-hal` input pins keyed by GPIO number.
pub struct HalInputs<P> {
    pins: heapless::Vec<(i32, P), MAX_HAL_INPUTS>,
}

impl<P: InputPin> Default for HalInputs<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> HalInputs<P> {
    pub fn new() -> Self {
        Self {
            pins: heapless::Vec::new(),
        }
    }

    /// Register `driver` under `gpio`.  Returns the driver back if the table
    /// is full.
    pub fn add(&mut self, gpio: i32, driver: P) -> Result<(), P> {
        self.pins.push((gpio, driver)).map_err(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl<P: InputPin> SamplePort for HalInputs<P> {
    fn read_level(&mut self, pin: i32) -> Result<bool, SampleError> {
        let (_, driver) = self
            .pins
            .iter_mut()
            .find(|(gpio, _)| *gpio == pin)
            .ok_or(SampleError::UnknownPin(pin))?;
        driver
            .is_high()
            .map_err(|_| SampleError::GpioReadFailed(pin))
    }
}
