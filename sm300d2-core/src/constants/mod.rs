//! Constants for the SM300D2 core
//!
//! Every protocol constant and default limit lives here so the decoder and
//! filters never carry magic numbers.
//!
//! ## Organization
//!
//! - **Frame**: wire layout of the 17 byte measurement frame
//! - **Sensors**: plausibility limits taken from observed sensor behavior
//! - **Time**: polling and smoothing cadence defaults

/// Wire layout of the measurement frame.
pub mod frame;

/// Plausibility limits for each measurement channel.
pub mod sensors;

/// Polling interval and smoothing defaults.
pub mod time;

// Re-export commonly used constants for convenience
pub use frame::{
    FRAME_LEN, FRAME_BODY_LEN, FRAME_MARKER_FIRST, FRAME_MARKER_SECOND,
    CHECKSUM_OFFSET, MAX_RESYNC_SCAN,
};

pub use time::{
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_WINDOW_SIZE, DEFAULT_PUBLISH_EVERY,
    MIN_WINDOW_SIZE,
};
