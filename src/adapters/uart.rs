//! Serial transports for the host command link.
//!
//! - [`UartTransport`] (espidf only) drives a hardware UART through
//!   `esp-idf-hal`.
//! - [`WriterTransport`] wraps any `std::io::Write`, for host-side links
//!   and for driving the service off-target.

use crate::transport::Transport;

// ── ESP-IDF UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use esp_impl::UartTransport;

#[cfg(target_os = "espidf")]
mod esp_impl {
    use esp_idf_hal::delay::BLOCK;
    use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin};
    use esp_idf_hal::peripheral::Peripheral;
    use esp_idf_hal::uart::{Uart, UartDriver, config::Config};
    use esp_idf_hal::units::Hertz;
    use esp_idf_svc::sys::EspError;

    use crate::transport::Transport;

    pub struct UartTransport {
        driver: UartDriver<'static>,
    }

    impl UartTransport {
        pub fn new(
            uart: impl Peripheral<P = impl Uart> + 'static,
            tx: impl Peripheral<P = impl OutputPin> + 'static,
            rx: impl Peripheral<P = impl InputPin> + 'static,
            baud: u32,
        ) -> Result<Self, EspError> {
            let config = Config::default().baudrate(Hertz(baud));
            let driver = UartDriver::new(
                uart,
                tx,
                rx,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &config,
            )?;
            log::info!("uart: host link up at {} baud", baud);
            Ok(Self { driver })
        }
    }

    impl Transport for UartTransport {
        type Error = EspError;

        fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
            self.driver.write(data)
        }

        fn flush(&mut self) -> Result<(), EspError> {
            self.driver.wait_tx_done(BLOCK)
        }
    }
}

// ── Generic writer ────────────────────────────────────────────

/// Transport over any blocking `std::io::Write`.
pub struct WriterTransport<W> {
    writer: W,
}

impl<W: std::io::Write> WriterTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: std::io::Write> Transport for WriterTransport<W> {
    type Error = std::io::Error;

    fn write(&mut self, data: &[u8]) -> Result<usize, std::io::Error> {
        // One call, whole message: a partial line would corrupt the stream.
        self.writer.write_all(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), std::io::Error> {
        self.writer.flush()
    }
}
