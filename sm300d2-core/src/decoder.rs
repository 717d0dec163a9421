//! Frame Synchronizer and Decoder
//!
//! ## Overview
//!
//! The SM300D2 streams frames with no framing guarantee. A reader that joins
//! mid-frame, or loses bytes to noise or a brown-out, sees an arbitrary
//! offset into the stream. The decoder recovers by scanning for the start
//! marker on every tick, bounded so a tick never spins on garbage.
//!
//! ## Per-Tick Protocol
//!
//! ```text
//!  scan ≤100 bytes for 3C ──not found──▶ FrameSync
//!        │
//!  read 1 byte == 02 ───────no─────────▶ FrameSync
//!        │
//!  read 15 byte body ───────short──────▶ ShortRead  (transport flushed)
//!        │
//!  sum(0..16) == byte 16 ───no─────────▶ Checksum
//!        │
//!  every value in range ────no─────────▶ ImplausibleValue
//!        │
//!     Measurements
//! ```
//!
//! Every failure bumps the consecutive error counter; a decoded frame resets
//! it. Only a short read touches the transport: the partial frame left in
//! the receive buffer would otherwise misalign every following tick.
//!
//! ## Memory
//!
//! The decoder owns one [`RawFrame`] and overwrites it in place every tick.
//! Reads go straight into that buffer, and nothing is indexed past
//! [`FRAME_LEN`] whatever the stream contains.

use crate::constants::frame::{FRAME_LEN, FRAME_MARKER_FIRST, FRAME_MARKER_SECOND, MAX_RESYNC_SCAN};
use crate::errors::{DecodeError, DecodeResult, ErrorKind};
use crate::frame::{Measurements, RawFrame};
use crate::plausibility::PlausibilityLimits;
use crate::traits::ByteSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decoder settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoderConfig {
    /// Bytes read per tick while looking for the first marker
    pub scan_limit: usize,
    /// Ranges applied after the checksum passes
    pub limits: PlausibilityLimits,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            scan_limit: MAX_RESYNC_SCAN,
            limits: PlausibilityLimits::default(),
        }
    }
}

/// Decode counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodeStats {
    /// Frames that passed every check
    pub frames_decoded: u32,
    /// Start marker not found
    pub sync_errors: u32,
    /// Incomplete frame bodies
    pub short_reads: u32,
    /// Checksum mismatches
    pub checksum_errors: u32,
    /// Frames dropped by the plausibility check
    pub implausible_frames: u32,
    /// Transport flushes issued
    pub flushes: u32,
    /// Failed attempts since the last decoded frame
    pub consecutive_errors: u32,
}

impl DecodeStats {
    /// Failures of every kind since creation or the last reset
    pub fn total_errors(&self) -> u32 {
        self.sync_errors
            .saturating_add(self.short_reads)
            .saturating_add(self.checksum_errors)
            .saturating_add(self.implausible_frames)
    }

    fn record_success(&mut self) {
        self.frames_decoded = self.frames_decoded.saturating_add(1);
        self.consecutive_errors = 0;
    }

    fn record_failure(&mut self, kind: ErrorKind) {
        let counter = match kind {
            ErrorKind::FrameSync => &mut self.sync_errors,
            ErrorKind::ShortRead => &mut self.short_reads,
            ErrorKind::Checksum => &mut self.checksum_errors,
            ErrorKind::ImplausibleValue => &mut self.implausible_frames,
        };
        *counter = counter.saturating_add(1);
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
    }
}

/// Resynchronizing decoder for the 17 byte SM300D2 frame
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    config: DecoderConfig,
    /// Reused frame buffer
    frame: RawFrame,
    stats: DecodeStats,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Decoder with the default scan bound and limits
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Decoder with custom settings
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            frame: RawFrame::empty(),
            stats: DecodeStats::default(),
        }
    }

    /// Decoder with custom plausibility limits
    pub fn with_limits(limits: PlausibilityLimits) -> Self {
        Self::with_config(DecoderConfig {
            limits,
            ..DecoderConfig::default()
        })
    }

    /// Active settings
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Get statistics
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Failed attempts since the last decoded frame
    pub fn consecutive_errors(&self) -> u32 {
        self.stats.consecutive_errors
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = DecodeStats::default();
    }

    /// Frame buffer as left by the last attempt
    ///
    /// After a failure only the bytes that were actually read are current.
    pub fn last_frame(&self) -> &RawFrame {
        &self.frame
    }

    /// Attempt to decode one frame from `source`
    pub fn decode<S>(&mut self, source: &mut S) -> DecodeResult<Measurements>
    where
        S: ByteSource + ?Sized,
    {
        match self.read_frame(source) {
            Ok(measurements) => {
                self.stats.record_success();
                Ok(measurements)
            }
            Err(err) => {
                if err.flushes_transport() {
                    source.flush();
                    self.stats.flushes = self.stats.flushes.saturating_add(1);
                    log_warn!("Flushed transport after incomplete frame");
                }
                self.stats.record_failure(err.kind());
                log_debug!("Skipping readout: {}, {} errors", err, self.stats.consecutive_errors);
                Err(err)
            }
        }
    }

    fn read_frame<S>(&mut self, source: &mut S) -> DecodeResult<Measurements>
    where
        S: ByteSource + ?Sized,
    {
        self.find_start(source)?;

        let bytes = self.frame.as_mut_bytes();
        bytes[0] = FRAME_MARKER_FIRST;

        bytes[1] = match source.read_byte() {
            Ok(b) => b,
            Err(nb::Error::WouldBlock) => return Err(DecodeError::FrameSync),
            Err(nb::Error::Other(_e)) => {
                log_debug!("Transport error after start marker: {:?}", _e);
                return Err(DecodeError::FrameSync);
            }
        };
        if bytes[1] != FRAME_MARKER_SECOND {
            return Err(DecodeError::FrameSync);
        }

        source.read_exact(&mut bytes[2..FRAME_LEN]).map_err(|_e| {
            if let nb::Error::Other(_e) = _e {
                log_debug!("Transport error reading frame body: {:?}", _e);
            }
            DecodeError::ShortRead
        })?;

        if !self.frame.checksum_valid() {
            return Err(DecodeError::Checksum {
                computed: self.frame.computed_checksum(),
                received: self.frame.received_checksum(),
            });
        }

        let measurements = self.frame.measurements();
        self.config.limits.check(&measurements)?;
        Ok(measurements)
    }

    /// Consume bytes up to and including the first marker
    fn find_start<S>(&self, source: &mut S) -> DecodeResult<()>
    where
        S: ByteSource + ?Sized,
    {
        for _ in 0..self.config.scan_limit {
            match source.read_byte() {
                Ok(FRAME_MARKER_FIRST) => return Ok(()),
                Ok(_) => {}
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_e)) => {
                    log_debug!("Transport error while scanning: {:?}", _e);
                    break;
                }
            }
        }
        Err(DecodeError::FrameSync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::checksum;
    use crate::transport::ByteQueue;

    const SAMPLE: [u8; FRAME_LEN] = [
        0x3C, 0x02, 0x01, 0xF4, 0x00, 0x0A, 0x00, 0x14, 0x00, 0x05,
        0x00, 0x08, 0x16, 0x05, 0x3C, 0x02, 0xB7,
    ];

    fn queue_with(chunks: &[&[u8]]) -> ByteQueue<256> {
        let mut queue = ByteQueue::new();
        for chunk in chunks {
            queue.feed(chunk);
        }
        queue
    }

    #[test]
    fn decodes_clean_frame() {
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[&SAMPLE]);

        let m = decoder.decode(&mut source).unwrap();
        assert_eq!(m.co2, 500);
        assert_eq!(decoder.stats().frames_decoded, 1);
        assert_eq!(decoder.consecutive_errors(), 0);
        assert_eq!(decoder.last_frame().as_bytes(), &SAMPLE);
    }

    #[test]
    fn skips_leading_garbage() {
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[&[0x00, 0x11, 0xFF, 0x02], &SAMPLE]);

        assert!(decoder.decode(&mut source).is_ok());
        assert!(source.is_empty());
    }

    #[test]
    fn empty_source_is_sync_error() {
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[]);

        assert_eq!(decoder.decode(&mut source), Err(DecodeError::FrameSync));
        assert_eq!(decoder.consecutive_errors(), 1);
        assert_eq!(source.flushes(), 0);
    }

    #[test]
    fn scan_is_bounded() {
        let mut decoder = FrameDecoder::new();
        let garbage = [0x55u8; 150];
        let mut source = queue_with(&[&garbage, &SAMPLE]);

        assert_eq!(decoder.decode(&mut source), Err(DecodeError::FrameSync));
        assert_eq!(source.len(), 50 + FRAME_LEN);

        // Next tick finishes the garbage and finds the frame
        assert!(decoder.decode(&mut source).is_ok());
    }

    #[test]
    fn wrong_second_marker() {
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[&[0x3C, 0x03]]);

        assert_eq!(decoder.decode(&mut source), Err(DecodeError::FrameSync));
        assert_eq!(source.flushes(), 0);
    }

    #[test]
    fn lone_start_marker_is_sync_error() {
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[&[0x3C]]);

        assert_eq!(decoder.decode(&mut source), Err(DecodeError::FrameSync));
        assert_eq!(decoder.consecutive_errors(), 1);
        assert_eq!(decoder.stats().sync_errors, 1);
        assert_eq!(source.flushes(), 0);
        assert!(source.is_empty());
    }

    #[test]
    fn short_body_flushes_transport() {
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[&SAMPLE[..10]]);

        assert_eq!(decoder.decode(&mut source), Err(DecodeError::ShortRead));
        assert_eq!(source.flushes(), 1);
        assert!(source.is_empty());
        assert_eq!(decoder.stats().flushes, 1);
        assert_eq!(decoder.stats().short_reads, 1);
    }

    #[test]
    fn checksum_mismatch_reported() {
        let mut bad = SAMPLE;
        bad[16] = 0x00;
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[&bad]);

        assert_eq!(
            decoder.decode(&mut source),
            Err(DecodeError::Checksum { computed: 0xB7, received: 0x00 })
        );
        assert_eq!(source.flushes(), 0);
    }

    #[test]
    fn implausible_frame_dropped() {
        let mut bad = SAMPLE;
        // CO2 = 0x0100 = 256 ppm
        bad[2] = 0x01;
        bad[3] = 0x00;
        bad[16] = checksum(&bad[..16]);
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[&bad]);

        assert!(matches!(
            decoder.decode(&mut source),
            Err(DecodeError::ImplausibleValue { .. })
        ));
        assert_eq!(decoder.stats().implausible_frames, 1);
    }

    #[test]
    fn success_resets_consecutive_errors() {
        let mut decoder = FrameDecoder::new();
        let mut source = queue_with(&[]);

        for _ in 0..3 {
            let _ = decoder.decode(&mut source);
        }
        assert_eq!(decoder.consecutive_errors(), 3);

        source.feed(&SAMPLE);
        assert!(decoder.decode(&mut source).is_ok());
        assert_eq!(decoder.consecutive_errors(), 0);
        assert_eq!(decoder.stats().total_errors(), 3);
    }

    #[test]
    fn total_errors_saturates() {
        let stats = DecodeStats {
            sync_errors: u32::MAX,
            checksum_errors: 7,
            ..DecodeStats::default()
        };
        assert_eq!(stats.total_errors(), u32::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn default_config_survives_json() {
        let config = DecoderConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: DecoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_without_minimum_loads() {
        let json = r#"{"scan_limit":50,"limits":{"channels":[
            {"min":350.0,"max":5550.0},{"max":1000.0},{"max":2000.0},
            {"max":1000.0},{"max":1000.0},{"min":-40.0,"max":125.0},{"max":100.0}]}}"#;
        let config: DecoderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.scan_limit, 50);
        assert_eq!(config.limits, PlausibilityLimits::default());
    }

    #[test]
    fn custom_scan_limit() {
        let mut decoder = FrameDecoder::with_config(DecoderConfig {
            scan_limit: 4,
            ..DecoderConfig::default()
        });
        let mut source = queue_with(&[&[0u8; 4], &SAMPLE]);
        assert_eq!(decoder.decode(&mut source), Err(DecodeError::FrameSync));
        assert!(decoder.decode(&mut source).is_ok());
    }
}
