//! Measurement channels reported by the sensor
//!
//! Each channel owns exactly one moving average filter. Filters are bound to
//! a channel tag rather than a closure over the decoder, so a filter can only
//! ever read its own field out of a decoded frame.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of measurement channels in a frame.
pub const CHANNEL_COUNT: usize = 7;

/// One measurement carried by the SM300D2 frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    /// Carbon dioxide, ppm
    Co2,
    /// Formaldehyde, ppb
    Ch2o,
    /// Total volatile organic compounds, ppb
    Tvoc,
    /// Fine particulate matter, µg/m³
    Pm25,
    /// Coarse particulate matter, µg/m³
    Pm10,
    /// Air temperature, °C
    Temperature,
    /// Relative humidity, %
    Humidity,
}

impl Channel {
    /// All channels in fan-out order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Co2,
        Channel::Ch2o,
        Channel::Tvoc,
        Channel::Pm25,
        Channel::Pm10,
        Channel::Temperature,
        Channel::Humidity,
    ];

    /// Position of this channel in [`Channel::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Channel::Co2 => 0,
            Channel::Ch2o => 1,
            Channel::Tvoc => 2,
            Channel::Pm25 => 3,
            Channel::Pm10 => 4,
            Channel::Temperature => 5,
            Channel::Humidity => 6,
        }
    }

    /// Stable identifier used when publishing.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Co2 => "co2",
            Channel::Ch2o => "ch2o",
            Channel::Tvoc => "tvoc",
            Channel::Pm25 => "pm25",
            Channel::Pm10 => "pm10",
            Channel::Temperature => "temperature",
            Channel::Humidity => "humidity",
        }
    }

    /// Unit of measurement.
    pub const fn unit(self) -> &'static str {
        match self {
            Channel::Co2 => "ppm",
            Channel::Ch2o | Channel::Tvoc => "ppb",
            Channel::Pm25 | Channel::Pm10 => "µg/m³",
            Channel::Temperature => "°C",
            Channel::Humidity => "%",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_fan_out_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn names_are_unique() {
        for a in Channel::ALL {
            for b in Channel::ALL {
                if a != b {
                    assert_ne!(a.name(), b.name());
                }
            }
        }
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(format!("{}", Channel::Pm25), "pm25");
        assert_eq!(Channel::Temperature.unit(), "°C");
    }
}
