//! Measurement Frame Layout
//!
//! The SM300D2 pushes one 17 byte frame roughly every second, 9600 8N1.
//! There is no idle gap or escape scheme, so a reader that joins mid-frame
//! has to find the start marker by scanning.
//!
//! ```text
//! offset  0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15  16
//!        3C  02 [CO2 ] [CH2O] [TVOC] [PM25] [PM10] [TEMP] [HUM ] SUM
//! ```

/// Total frame length in bytes, markers and checksum included.
pub const FRAME_LEN: usize = 17;

/// Bytes following the two marker bytes (fields plus checksum).
pub const FRAME_BODY_LEN: usize = FRAME_LEN - 2;

/// First start-of-frame marker byte.
pub const FRAME_MARKER_FIRST: u8 = 0x3C;

/// Second start-of-frame marker byte.
pub const FRAME_MARKER_SECOND: u8 = 0x02;

/// Offset of the checksum byte. It covers every byte before it.
pub const CHECKSUM_OFFSET: usize = 16;

/// Maximum bytes read per tick while hunting for the first marker.
///
/// Six frames worth of garbage. Anything longer is left for the next tick.
pub const MAX_RESYNC_SCAN: usize = 100;

// ===== FIELD OFFSETS =====

/// CO2, big-endian ppm.
pub const CO2_OFFSET: usize = 2;
/// Formaldehyde, big-endian ppb.
pub const CH2O_OFFSET: usize = 4;
/// TVOC, big-endian ppb.
pub const TVOC_OFFSET: usize = 6;
/// PM2.5, big-endian µg/m³.
pub const PM25_OFFSET: usize = 8;
/// PM10, big-endian µg/m³.
pub const PM10_OFFSET: usize = 10;
/// Temperature, whole degrees then tenths.
pub const TEMPERATURE_OFFSET: usize = 12;
/// Humidity, whole percent then tenths.
pub const HUMIDITY_OFFSET: usize = 14;

/// Scale of the fractional byte in temperature and humidity fields.
pub const TENTHS_SCALE: f32 = 0.1;
