//! Moving average smoothing per channel
//!
//! The sensor reports every ~2 s and its readings jitter, PM and TVOC
//! especially. Each channel therefore runs its own moving average and only
//! publishes every `PUBLISH_EVERY` samples, decoupling the sampling rate from
//! what the host sees.
//!
//! ## Warm-up
//!
//! Until `WINDOW` samples have arrived the filter divides by the number of
//! samples seen, not by `WINDOW`, so the first published value is already a
//! true mean rather than one dragged toward zero.
//!
//! ```rust
//! use sm300d2_core::{Channel, MovingAverageFilter};
//!
//! let mut filter: MovingAverageFilter<10, 30> = MovingAverageFilter::new(Channel::Pm25);
//! filter.push(1.0);
//! filter.push(2.0);
//! filter.push(3.0);
//! assert_eq!(filter.value(), Some(2.0));
//! ```

use crate::channel::Channel;
use crate::constants::time::{DEFAULT_PUBLISH_EVERY, DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE};
use crate::frame::Measurements;
use crate::traits::Publisher;
use crate::window::SampleWindow;

/// Moving average over the last `WINDOW` samples of one channel,
/// published every `PUBLISH_EVERY` samples
#[derive(Debug, Clone)]
pub struct MovingAverageFilter<
    const WINDOW: usize = DEFAULT_WINDOW_SIZE,
    const PUBLISH_EVERY: usize = DEFAULT_PUBLISH_EVERY,
> {
    /// Channel whose field this filter reads
    channel: Channel,
    /// Most recent samples
    window: SampleWindow<WINDOW>,
    /// Samples since the last publish
    ticks: usize,
}

impl<const WINDOW: usize, const PUBLISH_EVERY: usize> MovingAverageFilter<WINDOW, PUBLISH_EVERY> {
    const PARAMS_OK: () = {
        assert!(WINDOW >= MIN_WINDOW_SIZE, "moving average window needs at least 10 samples");
        assert!(PUBLISH_EVERY >= 1, "publish cadence must be at least 1");
    };

    /// Create an empty filter bound to `channel`
    pub const fn new(channel: Channel) -> Self {
        let () = Self::PARAMS_OK;

        Self {
            channel,
            window: SampleWindow::new(),
            ticks: 0,
        }
    }

    /// Channel this filter is bound to
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Add one sample, returning the smoothed value when it is due for publishing
    pub fn push(&mut self, sample: f32) -> Option<f32> {
        self.window.push(sample);

        self.ticks += 1;
        if self.ticks == PUBLISH_EVERY {
            self.ticks = 0;
            self.value()
        } else {
            None
        }
    }

    /// Take this channel's reading from a decoded frame and publish when due
    pub fn ingest<P>(&mut self, measurements: &Measurements, publisher: &mut P)
    where
        P: Publisher + ?Sized,
    {
        if let Some(value) = self.push(measurements.get(self.channel)) {
            log_debug!("Publishing {} = {}", self.channel, value);
            publisher.publish(self.channel, value);
        }
    }

    /// Current smoothed value, `None` before the first sample
    pub fn value(&self) -> Option<f32> {
        self.window.mean()
    }

    /// Number of samples in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Check if no sample has been ingested
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Check if the window has reached `WINDOW` samples
    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    /// Samples remaining until the next publish
    pub fn until_publish(&self) -> usize {
        PUBLISH_EVERY - self.ticks
    }

    /// Return to the empty warm-up state
    pub fn reset(&mut self) {
        self.window.clear();
        self.ticks = 0;
    }
}
