//! Sensor Plausibility Limits
//!
//! Frames that pass the checksum can still carry nonsense. Some modules emit
//! checksum-valid frames with wild magnitudes after power glitches, so every
//! decoded value is range checked before it reaches a filter.
//!
//! Only CO2 and temperature carry a lower bound. The other channels read 0 in
//! clean air and are accepted down to zero.

// ===== GAS SENSORS =====

/// Minimum CO2 reading (ppm).
///
/// Outdoor air sits around 400 ppm. The NDIR cell never reports below its
/// baseline unless the frame is corrupt.
pub const CO2_MIN_PPM: u16 = 350;

/// Maximum CO2 reading (ppm).
///
/// Upper end of the module's measuring range.
pub const CO2_MAX_PPM: u16 = 5550;

/// Maximum formaldehyde reading (ppb).
pub const CH2O_MAX_PPB: u16 = 1000;

/// Maximum total volatile organic compounds reading (ppb).
pub const TVOC_MAX_PPB: u16 = 2000;

// ===== PARTICULATE MATTER =====

/// Maximum PM2.5 concentration (µg/m³).
pub const PM25_MAX_UG_M3: u16 = 1000;

/// Maximum PM10 concentration (µg/m³).
pub const PM10_MAX_UG_M3: u16 = 1000;

// ===== CLIMATE =====

/// Minimum temperature (°C), operating limit of the on-board sensor.
pub const TEMPERATURE_MIN_C: f32 = -40.0;

/// Maximum temperature (°C), survival limit of the on-board sensor.
pub const TEMPERATURE_MAX_C: f32 = 125.0;

/// Maximum relative humidity (%).
pub const HUMIDITY_MAX_PCT: f32 = 100.0;
