//! Transport abstraction: Any byte-oriented output channel.
//!
//! Concrete implementations:
//! - UART serial to the host ([`adapters::uart`](crate::adapters::uart))
//! - [`NullTransport`] when no host link is wired
//!
//! The dispatcher is generic over `Transport`, so adding a new link requires
//! zero changes to the policy or debounce logic.

/// Byte-oriented output channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// A null transport that discards all writes.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}
