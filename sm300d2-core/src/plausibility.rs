//! Plausibility checks on decoded readings
//!
//! ## Why a second check after the checksum?
//!
//! The checksum catches bit errors on the wire. It does not catch the sensor
//! firmware itself emitting garbage: some modules send perfectly checksummed
//! frames with CO2 at 0 or PM2.5 at 30000 after a brown-out. Those frames would
//! drag a 360 sample average off for twelve minutes, so they are dropped here.
//!
//! ## Limits
//!
//! ```text
//! CO2          350 ..= 5550 ppm
//! CH2O               <= 1000 ppb
//! TVOC               <= 2000 ppb
//! PM2.5              <= 1000 µg/m³
//! PM10               <= 1000 µg/m³
//! Temperature  -40.0 ..= 125.0 °C
//! Humidity           <= 100.0 %
//! ```
//!
//! Channels without a lower bound accept zero, which is the normal reading in
//! clean air.
//!
//! ## Customization
//!
//! ```rust
//! use sm300d2_core::{Channel, PlausibilityLimits};
//!
//! // Indoor deployment that never sees outdoor CO2 levels
//! let limits = PlausibilityLimits::default()
//!     .with_limits(Channel::Co2, 400.0, 5000.0);
//! assert_eq!(limits.limits(Channel::Co2).max, 5000.0);
//! ```

use crate::channel::{Channel, CHANNEL_COUNT};
use crate::constants::sensors::{
    CH2O_MAX_PPB, CO2_MAX_PPM, CO2_MIN_PPM, HUMIDITY_MAX_PCT, PM10_MAX_UG_M3,
    PM25_MAX_UG_M3, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C, TVOC_MAX_PPB,
};
use crate::errors::{DecodeError, DecodeResult};
use crate::frame::Measurements;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Accepted range for one channel, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelLimits {
    /// Lowest accepted value, `None` when unbounded
    #[cfg_attr(feature = "serde", serde(default))]
    pub min: Option<f32>,
    /// Highest accepted value
    pub max: f32,
}

impl ChannelLimits {
    /// Range with both bounds
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min: Some(min), max }
    }

    /// Range with an upper bound only
    pub const fn at_most(max: f32) -> Self {
        Self { min: None, max }
    }

    /// Whether `value` lies inside the range. NaN never does.
    pub fn contains(&self, value: f32) -> bool {
        self.min.map_or(true, |min| value >= min) && value <= self.max
    }
}

/// Plausibility limits for every channel
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlausibilityLimits {
    channels: [ChannelLimits; CHANNEL_COUNT],
}

impl Default for PlausibilityLimits {
    fn default() -> Self {
        Self {
            channels: [
                ChannelLimits::new(CO2_MIN_PPM as f32, CO2_MAX_PPM as f32),
                ChannelLimits::at_most(CH2O_MAX_PPB as f32),
                ChannelLimits::at_most(TVOC_MAX_PPB as f32),
                ChannelLimits::at_most(PM25_MAX_UG_M3 as f32),
                ChannelLimits::at_most(PM10_MAX_UG_M3 as f32),
                ChannelLimits::new(TEMPERATURE_MIN_C, TEMPERATURE_MAX_C),
                ChannelLimits::at_most(HUMIDITY_MAX_PCT),
            ],
        }
    }
}

impl PlausibilityLimits {
    /// Override the range of one channel
    pub fn with_limits(mut self, channel: Channel, min: f32, max: f32) -> Self {
        self.channels[channel.index()] = ChannelLimits::new(min, max);
        self
    }

    /// Range applied to `channel`
    pub fn limits(&self, channel: Channel) -> ChannelLimits {
        self.channels[channel.index()]
    }

    /// Check a single reading
    pub fn check_value(&self, channel: Channel, value: f32) -> DecodeResult<()> {
        let limits = self.limits(channel);
        if limits.contains(value) {
            Ok(())
        } else {
            Err(DecodeError::ImplausibleValue {
                channel,
                value,
                min: limits.min.unwrap_or(f32::NEG_INFINITY),
                max: limits.max,
            })
        }
    }

    /// Check every reading of a frame, reporting the first failing channel
    pub fn check(&self, measurements: &Measurements) -> DecodeResult<()> {
        for channel in Channel::ALL {
            self.check_value(channel, measurements.get(channel))?;
        }
        Ok(())
    }
}
