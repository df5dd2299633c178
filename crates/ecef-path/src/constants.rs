//! Numeric thresholds and unit conversion shared by every module.
//!
//! All angular quantities in this crate are radians of great-circle angle on
//! the unit sphere. Nautical miles only appear at presentation boundaries.

/// Machine epsilon for `f64`.
pub const EPSILON: f64 = f64::EPSILON;

/// `EPSILON²`, compared against squared distances and squared dot products.
pub const SQ_EPSILON: f64 = EPSILON * EPSILON;

/// Shortest vector treated as a usable direction (`EPSILON·2^14`).
pub const MIN_LENGTH: f64 = EPSILON * 16384.0;

/// `MIN_LENGTH²`.
pub const SQ_MIN_LENGTH: f64 = MIN_LENGTH * MIN_LENGTH;

/// Smallest turn modelled with turn geometry: 1°.
pub const MIN_TURN_ANGLE: f64 = std::f64::consts::PI / 180.0;

/// Largest turn modelled with turn geometry: 150°.
pub const MAX_TURN_ANGLE: f64 = 150.0 * std::f64::consts::PI / 180.0;

/// One nautical mile: one arc minute.
pub const NM: f64 = std::f64::consts::PI / (180.0 * 60.0);

/// Upper bound for turn initiation distances (ICAO 9905 AN/471).
pub const TWENTY_NM: f64 = 20.0 * NM;

/// Lower bound for turn initiation distances of derived turns.
pub const TWO_NM: f64 = 2.0 * NM;

/// Chords at or below this length use the short-arc extreme point search: 0.1 NM.
pub const MINIMUM_ARC_LENGTH: f64 = 0.1 * NM;

/// Radians to nautical miles.
#[inline]
pub fn rad2nm(radians: f64) -> f64 {
    60.0 * radians.to_degrees()
}

/// Nautical miles to radians.
#[inline]
pub fn nm2rad(nm: f64) -> f64 {
    (nm / 60.0).to_radians()
}
