//! Byte Source Trait
//!
//! Pull-based, non-blocking access to the sensor's serial output using the
//! `nb` crate, in the same shape as `embedded-hal` serial reads.
//!
//! ## Contract
//!
//! - `Err(nb::Error::WouldBlock)` means "no data right now". It is not an
//!   error and the decoder treats it as an empty line.
//! - `Err(nb::Error::Other(e))` is a transport fault. The decoder handles it
//!   exactly like missing data; the fault itself is logged.
//! - Neither read may block past the implementation's own timeout.
//!
//! ```rust
//! use sm300d2_core::traits::ByteSource;
//!
//! struct Silent;
//!
//! impl ByteSource for Silent {
//!     type Error = core::convert::Infallible;
//!
//!     fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
//!         Err(nb::Error::WouldBlock)
//!     }
//!
//!     fn read_exact(&mut self, _buf: &mut [u8]) -> nb::Result<(), Self::Error> {
//!         Err(nb::Error::WouldBlock)
//!     }
//!
//!     fn flush(&mut self) {}
//! }
//! ```

use core::fmt::Debug;

/// Source of raw bytes from the sensor
pub trait ByteSource {
    /// Transport fault type
    type Error: Debug;

    /// Read one byte if one is available
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Fill `buf` completely
    ///
    /// Succeeds only if all `buf.len()` bytes arrive within the source's own
    /// timeout. On `WouldBlock` the contents of `buf` are unspecified and any
    /// partially read bytes are lost.
    fn read_exact(&mut self, buf: &mut [u8]) -> nb::Result<(), Self::Error>;

    /// Discard all pending input
    fn flush(&mut self);
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> nb::Result<(), Self::Error> {
        (**self).read_exact(buf)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}
