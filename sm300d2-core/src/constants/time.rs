//! Polling and Smoothing Defaults

/// Reference polling period of the host scheduler (milliseconds).
///
/// The core does not own a timer; this is what the sensor component was
/// tuned against.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 2000;

/// Default moving average window (samples).
///
/// 360 samples at one per 2 s tick covers twelve minutes.
pub const DEFAULT_WINDOW_SIZE: usize = 360;

/// Default number of ingested samples between publishes.
///
/// 30 ticks at 2 s gives one published value per minute.
pub const DEFAULT_PUBLISH_EVERY: usize = 30;

/// Smallest window a filter accepts.
pub const MIN_WINDOW_SIZE: usize = 10;
