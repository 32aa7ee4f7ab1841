//! Relative-humidity reading parser
//!
//! Only percentage readings are accepted, and only within [0, 100]; sensors
//! drifting outside the physical range are rejected rather than clamped,
//! since a drifting humidity sensor is not trustworthy near the bounds
//! either. Downstream the value is a fraction of saturation.

use crate::errors::{ParseError, ParseResult};
use crate::log_warn;
use crate::units;

use super::SensorState;

const ALLOWED: &str = "%";

/// Parse a raw relative-humidity reading into a fraction [0, 1].
pub fn parse_humidity(state: &SensorState<'_>) -> ParseResult<f64> {
    let value = super::parse_number(state.value).map_err(|e| {
        log_warn!("Unable to parse humidity state: {}", state.value);
        e
    })?;

    let Some(unit) = state.unit else {
        log_warn!("Humidity reading {} has no unit declared", state.value);
        return Err(ParseError::MissingUnit);
    };

    if unit != units::PERCENT {
        log_warn!(
            "Humidity reading has unsupported unit: {} (allowed: {})",
            unit,
            ALLOWED
        );
        return Err(ParseError::UnsupportedUnit { allowed: ALLOWED });
    }

    if !(0.0..=100.0).contains(&value) {
        log_warn!("Humidity reading is out of range: {} (allowed: 0-100%)", value);
        return Err(ParseError::OutOfRange { value, min: 0.0, max: 100.0 });
    }

    Ok(value / 100.0)
}
