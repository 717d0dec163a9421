//! Common test utilities for integration tests
//!
//! This module provides:
//! - A frame builder that fills in the checksum
//! - A scripted byte source with transport fault injection
//! - A publisher that records everything it receives

#![allow(dead_code)]

use std::collections::VecDeque;

use sm300d2_core::{
    constants::frame::{FRAME_LEN, FRAME_MARKER_FIRST, FRAME_MARKER_SECOND},
    frame::checksum,
    ByteSource, Channel, Publisher,
};

/// Builds well-formed frames field by field
#[derive(Debug, Clone, Copy)]
pub struct FrameBuilder {
    pub co2: u16,
    pub ch2o: u16,
    pub tvoc: u16,
    pub pm25: u16,
    pub pm10: u16,
    /// Whole degrees, tenths
    pub temperature: (u8, u8),
    /// Whole percent, tenths
    pub humidity: (u8, u8),
}

impl Default for FrameBuilder {
    /// The reference frame: 500 ppm, 10, 20, 5, 8, 22.5 °C, 60.2 %
    fn default() -> Self {
        Self {
            co2: 500,
            ch2o: 10,
            tvoc: 20,
            pm25: 5,
            pm10: 8,
            temperature: (22, 5),
            humidity: (60, 2),
        }
    }
}

impl FrameBuilder {
    pub fn co2(mut self, co2: u16) -> Self {
        self.co2 = co2;
        self
    }

    pub fn pm25(mut self, pm25: u16) -> Self {
        self.pm25 = pm25;
        self
    }

    pub fn temperature(mut self, whole: u8, tenths: u8) -> Self {
        self.temperature = (whole, tenths);
        self
    }

    pub fn humidity(mut self, whole: u8, tenths: u8) -> Self {
        self.humidity = (whole, tenths);
        self
    }

    /// Frame bytes with a correct checksum
    pub fn build(&self) -> [u8; FRAME_LEN] {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = FRAME_MARKER_FIRST;
        bytes[1] = FRAME_MARKER_SECOND;
        bytes[2..4].copy_from_slice(&self.co2.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.ch2o.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.tvoc.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.pm25.to_be_bytes());
        bytes[10..12].copy_from_slice(&self.pm10.to_be_bytes());
        bytes[12] = self.temperature.0;
        bytes[13] = self.temperature.1;
        bytes[14] = self.humidity.0;
        bytes[15] = self.humidity.1;
        bytes[16] = checksum(&bytes[..16]);
        bytes
    }
}

/// Byte source driven by a script, with fault injection
#[derive(Debug, Default)]
pub struct ScriptedSource {
    bytes: VecDeque<u8>,
    /// Reads that fail with a transport error before data flows again
    pub faults_pending: usize,
    pub flushes: usize,
    pub bytes_read: usize,
}

impl ScriptedSource {
    pub fn new(data: &[u8]) -> Self {
        Self {
            bytes: data.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, data: &[u8]) {
        self.bytes.extend(data.iter().copied());
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    fn fault(&mut self) -> Option<&'static str> {
        if self.faults_pending > 0 {
            self.faults_pending -= 1;
            Some("line fault")
        } else {
            None
        }
    }
}

impl ByteSource for ScriptedSource {
    type Error = &'static str;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        if let Some(e) = self.fault() {
            return Err(nb::Error::Other(e));
        }
        let b = self.bytes.pop_front().ok_or(nb::Error::WouldBlock)?;
        self.bytes_read += 1;
        Ok(b)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> nb::Result<(), Self::Error> {
        if let Some(e) = self.fault() {
            return Err(nb::Error::Other(e));
        }
        // A real UART loses whatever trickled in before the timeout
        for slot in buf.iter_mut() {
            *slot = self.bytes.pop_front().ok_or(nb::Error::WouldBlock)?;
            self.bytes_read += 1;
        }
        Ok(())
    }

    fn flush(&mut self) {
        self.bytes.clear();
        self.flushes += 1;
    }
}

/// Publisher that keeps every value it is handed
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub published: Vec<(Channel, f32)>,
}

impl RecordingPublisher {
    pub fn count_for(&self, channel: Channel) -> usize {
        self.published.iter().filter(|(c, _)| *c == channel).count()
    }

    pub fn last_for(&self, channel: Channel) -> Option<f32> {
        self.published
            .iter()
            .rev()
            .find(|(c, _)| *c == channel)
            .map(|(_, v)| *v)
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, channel: Channel, value: f32) {
        self.published.push((channel, value));
    }
}

/// Approximate float comparison
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {}, got {}",
        expected,
        actual
    );
}
