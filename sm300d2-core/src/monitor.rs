//! Per-tick orchestration
//!
//! [`AirQualityMonitor`] is what the host scheduler calls: one decode attempt
//! per tick, and on success one sample into each of the seven channel
//! filters. A failed tick feeds nothing. Filters never see a synthetic or
//! repeated sample, a missed tick just leaves the windows where they were.
//!
//! ```rust
//! use sm300d2_core::{AirQualityMonitor, ByteQueue, Channel};
//!
//! let mut published = Vec::new();
//! let mut monitor: AirQualityMonitor<_, 10, 1> =
//!     AirQualityMonitor::new(|channel: Channel, value: f32| published.push((channel, value)));
//!
//! let mut uart: ByteQueue<32> = ByteQueue::new();
//! uart.feed(&[
//!     0x3C, 0x02, 0x01, 0xF4, 0x00, 0x0A, 0x00, 0x14, 0x00, 0x05,
//!     0x00, 0x08, 0x16, 0x05, 0x3C, 0x02, 0xB7,
//! ]);
//! assert!(monitor.tick(&mut uart).is_ok());
//! drop(monitor);
//!
//! assert_eq!(published.len(), 7);
//! assert_eq!(published[0], (Channel::Co2, 500.0));
//! ```

use crate::channel::{Channel, CHANNEL_COUNT};
use crate::constants::time::{DEFAULT_PUBLISH_EVERY, DEFAULT_WINDOW_SIZE};
use crate::decoder::{DecodeStats, FrameDecoder};
use crate::errors::DecodeResult;
use crate::filter::MovingAverageFilter;
use crate::frame::Measurements;
use crate::traits::{ByteSource, Publisher};

/// Decoder plus one moving average per channel
pub struct AirQualityMonitor<
    P: Publisher,
    const WINDOW: usize = DEFAULT_WINDOW_SIZE,
    const PUBLISH_EVERY: usize = DEFAULT_PUBLISH_EVERY,
> {
    decoder: FrameDecoder,
    /// Indexed by [`Channel::index`]
    filters: [MovingAverageFilter<WINDOW, PUBLISH_EVERY>; CHANNEL_COUNT],
    publisher: P,
    last: Option<Measurements>,
}

impl<P, const WINDOW: usize, const PUBLISH_EVERY: usize> AirQualityMonitor<P, WINDOW, PUBLISH_EVERY>
where
    P: Publisher,
{
    /// Monitor with a default decoder
    pub fn new(publisher: P) -> Self {
        Self::with_decoder(FrameDecoder::new(), publisher)
    }

    /// Monitor around a preconfigured decoder
    pub fn with_decoder(decoder: FrameDecoder, publisher: P) -> Self {
        Self {
            decoder,
            filters: Channel::ALL.map(MovingAverageFilter::new),
            publisher,
            last: None,
        }
    }

    /// Run one polling tick against `source`
    ///
    /// Failures are already counted and logged by the decoder; they are
    /// returned for hosts that want to surface them.
    pub fn tick<S>(&mut self, source: &mut S) -> DecodeResult<Measurements>
    where
        S: ByteSource + ?Sized,
    {
        let measurements = self.decoder.decode(source)?;

        for filter in self.filters.iter_mut() {
            filter.ingest(&measurements, &mut self.publisher);
        }
        self.last = Some(measurements);

        Ok(measurements)
    }

    /// Filter of one channel
    pub fn filter(&self, channel: Channel) -> &MovingAverageFilter<WINDOW, PUBLISH_EVERY> {
        &self.filters[channel.index()]
    }

    /// Current smoothed value of one channel
    pub fn value(&self, channel: Channel) -> Option<f32> {
        self.filter(channel).value()
    }

    /// Most recent frame that passed every check
    pub fn last_measurements(&self) -> Option<&Measurements> {
        self.last.as_ref()
    }

    /// The decoder
    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    /// Decode counters
    pub fn stats(&self) -> &DecodeStats {
        self.decoder.stats()
    }

    /// Failed ticks since the last decoded frame
    pub fn consecutive_errors(&self) -> u32 {
        self.decoder.consecutive_errors()
    }

    /// The publisher
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Mutable access to the publisher
    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    /// Drop every window back to warm-up
    pub fn reset_filters(&mut self) {
        for filter in self.filters.iter_mut() {
            filter.reset();
        }
        self.last = None;
    }

    /// Take the publisher back
    pub fn into_publisher(self) -> P {
        self.publisher
    }
}
