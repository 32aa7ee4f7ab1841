//! Barometric-pressure reading parser
//!
//! Accepts hPa (weather-station convention) and Pa; everything downstream
//! is Pa.

use crate::errors::{ParseError, ParseResult};
use crate::log_warn;
use crate::units;

use super::SensorState;

const ALLOWED: &str = "hPa, Pa";

/// Parse a raw pressure reading into Pa.
pub fn parse_pressure(state: &SensorState<'_>) -> ParseResult<f64> {
    let value = super::parse_number(state.value).map_err(|e| {
        log_warn!("Unable to parse pressure state: {}", state.value);
        e
    })?;

    let Some(unit) = state.unit else {
        log_warn!("Pressure reading {} has no unit declared", state.value);
        return Err(ParseError::MissingUnit);
    };

    if unit == units::HECTOPASCALS {
        Ok(units::hectopascals_to_pascals(value))
    } else if unit == units::PASCALS {
        Ok(value)
    } else {
        log_warn!(
            "Pressure reading has unsupported unit: {} (allowed: {})",
            unit,
            ALLOWED
        );
        Err(ParseError::UnsupportedUnit { allowed: ALLOWED })
    }
}
