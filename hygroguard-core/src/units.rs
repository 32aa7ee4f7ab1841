//! Unit vocabulary and conversions at the sensor boundary
//!
//! Raw readings arrive with a declared unit string; everything past the
//! input adapter is SI (°C, Pa, fractional RH). The only non-SI conversion
//! on the way out is Celsius → Fahrenheit at the presentation boundary for
//! hosts configured with the imperial unit system.

/// Degrees Celsius.
pub const CELSIUS: &str = "°C";

/// Degrees Fahrenheit.
pub const FAHRENHEIT: &str = "°F";

/// Relative humidity percentage.
pub const PERCENT: &str = "%";

/// Hectopascals (equal to millibars).
pub const HECTOPASCALS: &str = "hPa";

/// Pascals.
pub const PASCALS: &str = "Pa";

/// Milligrams of water per gram of moist air (specific humidity).
pub const MILLIGRAMS_PER_GRAM: &str = "mg/g";

/// Pascals per hectopascal.
pub const PA_PER_HPA: f64 = 100.0;

/// Millibars per pascal.
pub const MB_PER_PA: f64 = 0.01;

/// Host unit system, applied at the presentation boundary only.
///
/// Internal math is always metric SI; a non-metric host sees
/// temperature-valued outputs in Fahrenheit, nothing else changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// Celsius presentation (internal unit, no conversion)
    #[default]
    Metric,
    /// Fahrenheit presentation for temperature-valued outputs
    Imperial,
}

/// Convert a Fahrenheit reading to Celsius.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Convert an internal Celsius value to Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert a hectopascal reading to pascals.
pub fn hectopascals_to_pascals(hectopascals: f64) -> f64 {
    hectopascals * PA_PER_HPA
}
