//! Frame decoder and smoothing core for the SM300D2 air quality sensor
//!
//! Turns the sensor's unframed UART output into validated CO2, CH2O, TVOC,
//! PM2.5, PM10, temperature and humidity readings, then smooths each one with
//! a bounded moving average before handing it to the host.
//!
//! Key constraints:
//! - No heap allocation (`no_std` without the `std` feature)
//! - Bounded work per tick: at most 100 bytes scanned plus one 15 byte block
//! - Every failure is local; the next tick is the retry
//!
//! ```no_run
//! use sm300d2_core::{AirQualityMonitor, Channel, ByteQueue};
//!
//! let mut uart: ByteQueue<64> = ByteQueue::new();
//! let mut monitor: AirQualityMonitor<_> = AirQualityMonitor::new(
//!     |channel: Channel, value: f32| {
//!         // hand the smoothed value to the host
//!         let _ = (channel, value);
//!     },
//! );
//!
//! // Called by the host scheduler every 2 s
//! match monitor.tick(&mut uart) {
//!     Ok(_) => {},  // seven filters advanced
//!     Err(_) => {}, // counted, retried on the next tick
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod channel;
pub mod constants;
pub mod decoder;
pub mod errors;
pub mod filter;
pub mod frame;
pub mod monitor;
pub mod plausibility;
pub mod traits;
pub mod transport;
pub mod window;

// Public API
pub use channel::Channel;
pub use decoder::{DecodeStats, DecoderConfig, FrameDecoder};
pub use errors::{DecodeError, DecodeResult, ErrorKind};
pub use filter::MovingAverageFilter;
pub use frame::{Measurements, RawFrame};
pub use monitor::AirQualityMonitor;
pub use plausibility::PlausibilityLimits;
pub use traits::{ByteSource, Publisher};
pub use transport::ByteQueue;

#[cfg(feature = "transport-io")]
pub use transport::IoByteSource;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
