//! Measurement frame decoding
//!
//! A [`RawFrame`] is the 17 byte image exactly as it came off the wire.
//! Fields are read out of it one by one at fixed offsets, and the checksum is
//! an explicit loop over the same bytes, so nothing depends on struct layout.
//!
//! ```rust
//! use sm300d2_core::RawFrame;
//!
//! let frame = RawFrame::from_bytes([
//!     0x3C, 0x02, 0x01, 0xF4, 0x00, 0x0A, 0x00, 0x14, 0x00, 0x05,
//!     0x00, 0x08, 0x16, 0x05, 0x3C, 0x02, 0xB7,
//! ]);
//! assert!(frame.checksum_valid());
//! assert_eq!(frame.measurements().co2, 500);
//! ```

use crate::channel::Channel;
use crate::constants::frame::{
    CHECKSUM_OFFSET, CH2O_OFFSET, CO2_OFFSET, FRAME_LEN, FRAME_MARKER_FIRST,
    FRAME_MARKER_SECOND, HUMIDITY_OFFSET, PM10_OFFSET, PM25_OFFSET, TEMPERATURE_OFFSET,
    TENTHS_SCALE, TVOC_OFFSET,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw 17 byte measurement frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame {
    bytes: [u8; FRAME_LEN],
}

impl RawFrame {
    /// Zeroed frame, used as the decoder's reusable buffer
    pub const fn empty() -> Self {
        Self { bytes: [0; FRAME_LEN] }
    }

    /// Wrap bytes received from the sensor
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    /// Frame image
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Mutable frame image, filled byte-serially by the decoder
    pub fn as_mut_bytes(&mut self) -> &mut [u8; FRAME_LEN] {
        &mut self.bytes
    }

    /// Whether the frame starts with `3C 02`
    pub fn has_markers(&self) -> bool {
        self.bytes[0] == FRAME_MARKER_FIRST && self.bytes[1] == FRAME_MARKER_SECOND
    }

    /// Sum of every byte before the checksum, modulo 256
    pub fn computed_checksum(&self) -> u8 {
        checksum(&self.bytes[..CHECKSUM_OFFSET])
    }

    /// Checksum byte carried by the frame
    pub fn received_checksum(&self) -> u8 {
        self.bytes[CHECKSUM_OFFSET]
    }

    /// Whether the carried checksum matches the frame contents
    pub fn checksum_valid(&self) -> bool {
        self.computed_checksum() == self.received_checksum()
    }

    /// Decode all seven fields
    ///
    /// Decoding never fails; plausibility is checked separately.
    pub fn measurements(&self) -> Measurements {
        Measurements {
            co2: self.word(CO2_OFFSET),
            ch2o: self.word(CH2O_OFFSET),
            tvoc: self.word(TVOC_OFFSET),
            pm25: self.word(PM25_OFFSET),
            pm10: self.word(PM10_OFFSET),
            temperature: self.tenths(TEMPERATURE_OFFSET),
            humidity: self.tenths(HUMIDITY_OFFSET),
        }
    }

    fn word(&self, offset: usize) -> u16 {
        u16::from_be_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    fn tenths(&self, offset: usize) -> f32 {
        f32::from(self.bytes[offset]) + f32::from(self.bytes[offset + 1]) * TENTHS_SCALE
    }
}

impl Default for RawFrame {
    fn default() -> Self {
        Self::empty()
    }
}

/// Additive checksum used by the sensor
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Decoded readings from one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurements {
    /// CO2 in ppm
    pub co2: u16,
    /// Formaldehyde in ppb
    pub ch2o: u16,
    /// TVOC in ppb
    pub tvoc: u16,
    /// PM2.5 in µg/m³
    pub pm25: u16,
    /// PM10 in µg/m³
    pub pm10: u16,
    /// Temperature in °C
    pub temperature: f32,
    /// Relative humidity in %
    pub humidity: f32,
}

impl Measurements {
    /// Reading for one channel as a sample value
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Co2 => f32::from(self.co2),
            Channel::Ch2o => f32::from(self.ch2o),
            Channel::Tvoc => f32::from(self.tvoc),
            Channel::Pm25 => f32::from(self.pm25),
            Channel::Pm10 => f32::from(self.pm10),
            Channel::Temperature => self.temperature,
            Channel::Humidity => self.humidity,
        }
    }
}
