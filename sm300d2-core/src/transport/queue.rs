//! Memory-backed byte source
//!
//! [`ByteQueue`] is a fixed-capacity FIFO of received bytes. On hardware the
//! UART receive interrupt feeds it and the polling tick drains it; in tests
//! and replay tools it is fed from a recorded capture.
//!
//! ## Example
//!
//! ```rust
//! use sm300d2_core::{ByteQueue, FrameDecoder};
//!
//! let mut uart: ByteQueue<64> = ByteQueue::new();
//! uart.feed(&[0x00, 0xFF]); // line noise before the frame
//! uart.feed(&[
//!     0x3C, 0x02, 0x01, 0xF4, 0x00, 0x0A, 0x00, 0x14, 0x00, 0x05,
//!     0x00, 0x08, 0x16, 0x05, 0x3C, 0x02, 0xB7,
//! ]);
//!
//! let mut decoder = FrameDecoder::new();
//! let m = decoder.decode(&mut uart).unwrap();
//! assert_eq!(m.co2, 500);
//! assert!(uart.is_empty());
//! ```

use core::convert::Infallible;

use heapless::Deque;

use crate::traits::ByteSource;

/// Fixed-capacity byte FIFO implementing [`ByteSource`]
pub struct ByteQueue<const N: usize> {
    /// Pending bytes, oldest at the front
    bytes: Deque<u8, N>,
    /// Bytes refused because the queue was full
    overruns: usize,
    /// Number of times `flush` discarded input
    flushes: usize,
}

impl<const N: usize> ByteQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            bytes: Deque::new(),
            overruns: 0,
            flushes: 0,
        }
    }

    /// Append received bytes, returning how many were accepted
    ///
    /// Bytes that do not fit are dropped and counted as overruns, like a
    /// UART FIFO overflowing.
    pub fn feed(&mut self, data: &[u8]) -> usize {
        let mut accepted = 0;
        for &b in data {
            if self.bytes.push_back(b).is_err() {
                self.overruns += data.len() - accepted;
                break;
            }
            accepted += 1;
        }
        accepted
    }

    /// Number of pending bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if no bytes are pending
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes dropped because the queue was full
    pub fn overruns(&self) -> usize {
        self.overruns
    }

    /// Times pending input was discarded
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteSource for ByteQueue<N> {
    type Error = Infallible;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.bytes.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> nb::Result<(), Self::Error> {
        // Nothing is consumed unless the whole block is there
        if self.bytes.len() < buf.len() {
            return Err(nb::Error::WouldBlock);
        }

        for slot in buf.iter_mut() {
            *slot = self.bytes.pop_front().ok_or(nb::Error::WouldBlock)?;
        }
        Ok(())
    }

    fn flush(&mut self) {
        self.bytes.clear();
        self.flushes += 1;
    }
}
