//! Physical Constants for HygroGuard
//!
//! Fundamental constants and environmental limits used by the psychrometric
//! primitives and the derivation pipeline. All values are based on
//! established physics and industry standards.

// ===== FUNDAMENTAL PHYSICS CONSTANTS =====

/// Offset between Celsius and Kelvin scales (K).
///
/// Used to convert dry-bulb and dew-point temperatures into the absolute
/// scale required by the saturation-pressure correlations.
///
/// Source: NIST Special Publication 330 (2019)
pub const KELVIN_OFFSET: f64 = 273.15;

/// Standard atmospheric pressure at sea level (Pa).
///
/// Reference pressure for the standard-atmosphere model and the default
/// indoor pressure when no pressure source is configured.
///
/// Source: International Standard Atmosphere (ISA)
pub const STANDARD_ATMOSPHERE_PA: f64 = 101_325.0;

/// Ratio of the molar mass of water vapor to that of dry air.
///
/// Appears in every humidity-ratio ↔ vapor-pressure conversion.
///
/// Source: ASHRAE Handbook - Fundamentals (2017), Chapter 1
pub const WATER_AIR_MOLAR_MASS_RATIO: f64 = 0.621_945;

/// Triple point of water (°C).
///
/// Below this temperature the saturation-pressure correlation over ice
/// applies; above it, the correlation over liquid water.
///
/// Source: ASHRAE Handbook - Fundamentals (2017), Chapter 1
pub const TRIPLE_POINT_WATER_C: f64 = 0.01;

// ===== PSYCHROMETRIC VALIDITY BOUNDS =====

/// Lower validity bound of the saturation-pressure correlations (°C).
pub const PSYCHRO_TEMP_MIN_C: f64 = -100.0;

/// Upper validity bound of the saturation-pressure correlations (°C).
pub const PSYCHRO_TEMP_MAX_C: f64 = 200.0;

/// Floor applied to computed humidity ratios (kg water / kg dry air).
///
/// Keeps downstream divisions well-conditioned for perfectly dry air.
///
/// Source: reference psychrometric library convention
pub const MIN_HUM_RATIO: f64 = 1e-7;

/// Convergence tolerance of the dew-point solve (°C).
pub const DEW_POINT_TOLERANCE_C: f64 = 0.001;

/// Iteration budget of the dew-point solve.
///
/// Newton steps on the log saturation curve converge in a handful of
/// iterations for any physical state; the budget only bounds worst-case work.
pub const DEW_POINT_MAX_ITERATIONS: usize = 100;

// ===== MOLD RISK =====

/// Relative humidity above which condensation and mold growth become likely (%).
///
/// Applied both to the indoor air and to the humidity projected onto the
/// coldest (critical) surface; also the hard cap on the optimal-humidity
/// recommendation.
///
/// Source: ASHRAE Standard 55-2020, Section 5.2
pub const MOLD_RISK_MAX_HUMIDITY_PCT: f64 = 60.0;

/// [`MOLD_RISK_MAX_HUMIDITY_PCT`] expressed as a fraction of saturation.
pub const MOLD_RISK_MAX_HUMIDITY_FRACTION: f64 = MOLD_RISK_MAX_HUMIDITY_PCT / 100.0;
