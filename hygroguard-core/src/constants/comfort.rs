//! Comfort-Point and Humidex Classification Constants
//!
//! The ideal comfort point anchors the comfortable-specific-humidity target;
//! the humidex coefficients and break points classify perceived heat.

/// Dry-bulb temperature of the ideal indoor comfort point (°C).
///
/// Source: ASHRAE Standard 55-2020 comfort zone, sedentary activity
pub const IDEAL_COMFORT_TEMP_C: f64 = 21.0;

/// Relative humidity of the ideal indoor comfort point (fraction).
///
/// Source: ASHRAE Standard 55-2020 comfort zone, sedentary activity
pub const IDEAL_COMFORT_HUMIDITY: f64 = 0.45;

/// Humidex vapor-pressure coefficient (°C per mb).
///
/// Humidex = T + coefficient × (e − base), with e the vapor pressure in
/// millibars.
///
/// Source: Masterton & Richardson (1979), Environment Canada
pub const HUMIDEX_VAPOR_PRESSURE_COEFF: f64 = 0.5555;

/// Humidex base vapor pressure (mb).
///
/// Vapor pressure at which moisture contributes nothing to perceived heat.
///
/// Source: Masterton & Richardson (1979), Environment Canada
pub const HUMIDEX_BASE_VAPOR_PRESSURE_MB: f64 = 10.0;

/// Upper humidex bound of each comfort bracket except the open-ended last (°C).
///
/// A humidex of `b + 1` falls in the bracket above break point `b`; the
/// comparison is made against humidex − 1.
///
/// Source: Environment Canada humidex comfort scale
pub const HUMIDEX_BREAK_POINTS_C: [f64; 5] = [29.0, 34.0, 39.0, 45.0, 54.0];
