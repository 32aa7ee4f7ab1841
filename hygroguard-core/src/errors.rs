//! Error Types for the Input Boundary and the Psychrometric Primitives
//!
//! ## Design Philosophy
//!
//! The error system follows the same rules as the rest of the crate:
//!
//! 1. **Small Size**: Each variant is minimal - errors are returned on the
//!    per-reading hot path and may be logged from constrained targets.
//!
//! 2. **No Heap Allocation**: All error data is inline - no String, only
//!    `&'static str` and scalar payloads. Deterministic memory usage.
//!
//! 3. **Copy Semantics**: Errors implement Copy so they can be returned and
//!    stored without move-semantics complications.
//!
//! ## Error Categories
//!
//! ### Input rejections (`ParseError`)
//! A raw reading that cannot be turned into a validated SI value: bad unit,
//! bad numeric format, out-of-range relative humidity. These are non-fatal -
//! the engine stores "unknown" for the source and the pipeline propagates
//! unknown through every dependent quantity.
//!
//! ### Psychrometric domain violations (`PsychroError`)
//! The primitives in [`crate::psychro`] reject states outside their validity
//! region (temperature outside [-100, 200] °C, dew point above dry bulb,
//! negative vapor pressure) and a non-converging dew-point solve. The
//! derivation pipeline maps any of these to an unknown output; none is fatal
//! to the surrounding process.

use thiserror_no_std::Error;

/// Result type for input-adapter parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for psychrometric calculations.
pub type PsychroResult<T> = Result<T, PsychroError>;

/// A raw sensor reading that could not be validated into an SI value.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParseError {
    /// State string is not a finite number
    #[error("State is not a finite number")]
    InvalidNumber,

    /// Source declared no unit of measurement
    #[error("No unit of measurement declared")]
    MissingUnit,

    /// Declared unit is not accepted for this quantity
    #[error("Unsupported unit (allowed: {allowed})")]
    UnsupportedUnit {
        /// Units this quantity accepts
        allowed: &'static str,
    },

    /// Value outside the accepted range for this quantity
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The reading that failed validation
        value: f64,
        /// Minimum acceptable value
        min: f64,
        /// Maximum acceptable value
        max: f64,
    },
}

/// A psychrometric primitive was asked for a state outside its validity region.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PsychroError {
    /// Temperature outside the saturation-pressure correlation bounds
    #[error("Temperature {value}°C outside supported range [{min}, {max}]")]
    TemperatureOutOfBounds {
        /// Requested temperature (°C)
        value: f64,
        /// Lower correlation bound (°C)
        min: f64,
        /// Upper correlation bound (°C)
        max: f64,
    },

    /// Relative humidity outside [0, 1]
    #[error("Relative humidity {0} outside [0, 1]")]
    HumidityOutOfBounds(f64),

    /// Partial pressure of water vapor must be positive
    #[error("Vapor pressure {0} Pa is not positive")]
    VaporPressureOutOfBounds(f64),

    /// Humidity ratio cannot be negative
    #[error("Humidity ratio {0} is negative")]
    HumidityRatioOutOfBounds(f64),

    /// Specific humidity outside [0, 1)
    #[error("Specific humidity {0} outside [0, 1)")]
    SpecificHumidityOutOfBounds(f64),

    /// Dew point above dry-bulb temperature is physically impossible
    #[error("Dew point {dew_point}°C above dry bulb {dry_bulb}°C")]
    DewPointAboveDryBulb {
        /// Requested dew point (°C)
        dew_point: f64,
        /// Dry-bulb temperature (°C)
        dry_bulb: f64,
    },

    /// Dew-point iteration did not converge within the iteration budget
    #[error("Dew point solve did not converge")]
    NonConvergence,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ParseError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidNumber => defmt::write!(fmt, "not a finite number"),
            Self::MissingUnit => defmt::write!(fmt, "no unit declared"),
            Self::UnsupportedUnit { allowed } => {
                defmt::write!(fmt, "unsupported unit (allowed: {})", allowed)
            }
            Self::OutOfRange { value, min, max } => {
                defmt::write!(fmt, "value {} outside [{}, {}]", value, min, max)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PsychroError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::TemperatureOutOfBounds { value, min, max } => {
                defmt::write!(fmt, "temperature {} outside [{}, {}]", value, min, max)
            }
            Self::HumidityOutOfBounds(v) => defmt::write!(fmt, "humidity {} outside [0, 1]", v),
            Self::VaporPressureOutOfBounds(v) => {
                defmt::write!(fmt, "vapor pressure {} not positive", v)
            }
            Self::HumidityRatioOutOfBounds(v) => {
                defmt::write!(fmt, "humidity ratio {} negative", v)
            }
            Self::SpecificHumidityOutOfBounds(v) => {
                defmt::write!(fmt, "specific humidity {} outside [0, 1)", v)
            }
            Self::DewPointAboveDryBulb { dew_point, dry_bulb } => {
                defmt::write!(fmt, "dew point {} above dry bulb {}", dew_point, dry_bulb)
            }
            Self::NonConvergence => defmt::write!(fmt, "dew point solve did not converge"),
        }
    }
}
