//! Error Types for Frame Decoding Failures
//!
//! ## Design Philosophy
//!
//! The decoder runs once per polling tick on a microcontroller, so its errors
//! follow the same rules as the rest of the hot path:
//!
//! 1. **Small Size**: every variant is a few bytes of inline data.
//!
//! 2. **No Heap Allocation**: no `String`, only `Copy` fields.
//!
//! 3. **Non-Fatal**: nothing here stops the monitor. A failed tick is counted
//!    and the next tick is the retry.
//!
//! ## Error Categories
//!
//! ### Framing
//! - `FrameSync`: start marker not found within the scan bound
//! - `ShortRead`: transport could not deliver the rest of the frame
//!
//! ### Content
//! - `Checksum`: bytes corrupted in transit
//! - `ImplausibleValue`: checksum fine, value physically impossible
//!
//! Only `ShortRead` asks for transport recovery. A stuck partial frame sits
//! in the UART buffer and would poison every following tick, so the decoder
//! flushes it. The other failures already consumed their bad bytes.
//!
//! ```rust
//! use sm300d2_core::{DecodeError, FrameDecoder, ByteQueue};
//!
//! let mut decoder = FrameDecoder::new();
//! let mut uart: ByteQueue<32> = ByteQueue::new();
//!
//! match decoder.decode(&mut uart) {
//!     Ok(_measurements) => {}
//!     Err(DecodeError::FrameSync) => {
//!         // No frame start yet; nothing arrived or line noise
//!     }
//!     Err(DecodeError::ShortRead) => {
//!         // Transport already flushed
//!     }
//!     Err(DecodeError::Checksum { .. }) | Err(DecodeError::ImplausibleValue { .. }) => {
//!         // Frame dropped
//!     }
//! }
//! ```

use thiserror_no_std::Error;

use crate::channel::Channel;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decode failures - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DecodeError {
    /// Start marker `3C 02` not found within the scan bound
    #[error("Frame start marker not found")]
    FrameSync,

    /// Transport delivered fewer bytes than a frame body
    #[error("Short read: frame body incomplete")]
    ShortRead,

    /// Checksum byte does not match the sum of the frame
    #[error("Checksum mismatch: computed {computed}, received {received}")]
    Checksum {
        /// Sum of bytes 0..16 modulo 256
        computed: u8,
        /// Checksum byte carried by the frame
        received: u8,
    },

    /// Frame passed the checksum but a reading is physically impossible
    #[error("Implausible {channel} reading {value} outside [{min}, {max}]")]
    ImplausibleValue {
        /// Channel that failed the range check
        channel: Channel,
        /// Decoded value
        value: f32,
        /// Lowest accepted value
        min: f32,
        /// Highest accepted value
        max: f32,
    },
}

/// Failure category, used for statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`DecodeError::FrameSync`]
    FrameSync,
    /// See [`DecodeError::ShortRead`]
    ShortRead,
    /// See [`DecodeError::Checksum`]
    Checksum,
    /// See [`DecodeError::ImplausibleValue`]
    ImplausibleValue,
}

impl DecodeError {
    /// Category of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FrameSync => ErrorKind::FrameSync,
            Self::ShortRead => ErrorKind::ShortRead,
            Self::Checksum { .. } => ErrorKind::Checksum,
            Self::ImplausibleValue { .. } => ErrorKind::ImplausibleValue,
        }
    }

    /// Whether this failure discards the transport's pending input
    pub fn flushes_transport(&self) -> bool {
        matches!(self, Self::ShortRead)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DecodeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::FrameSync =>
                defmt::write!(fmt, "Frame start not found"),
            Self::ShortRead =>
                defmt::write!(fmt, "Short read"),
            Self::Checksum { computed, received } =>
                defmt::write!(fmt, "Checksum {=u8:#x} != {=u8:#x}", computed, received),
            Self::ImplausibleValue { channel, value, min, max } =>
                defmt::write!(fmt, "Implausible {} {} outside [{}, {}]", channel, value, min, max),
        }
    }
}
