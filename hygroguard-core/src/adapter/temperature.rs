//! Temperature reading parser
//!
//! Accepts Celsius and Fahrenheit readings; everything downstream is Celsius.

use crate::errors::{ParseError, ParseResult};
use crate::log_warn;
use crate::units;

use super::SensorState;

const ALLOWED: &str = "°C, °F";

/// Parse a raw temperature reading into °C.
pub fn parse_temperature(state: &SensorState<'_>) -> ParseResult<f64> {
    let value = super::parse_number(state.value).map_err(|e| {
        log_warn!("Unable to parse temperature state: {}", state.value);
        e
    })?;

    let Some(unit) = state.unit else {
        log_warn!("Temperature reading {} has no unit declared", state.value);
        return Err(ParseError::MissingUnit);
    };

    if unit == units::CELSIUS {
        Ok(value)
    } else if unit == units::FAHRENHEIT {
        Ok(units::fahrenheit_to_celsius(value))
    } else {
        log_warn!(
            "Temperature reading has unsupported unit: {} (allowed: {})",
            unit,
            ALLOWED
        );
        Err(ParseError::UnsupportedUnit { allowed: ALLOWED })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_passes_through() {
        let state = SensorState { value: "21.3", unit: Some("°C") };
        assert_eq!(parse_temperature(&state), Ok(21.3));
    }

    #[test]
    fn fahrenheit_converts() {
        let state = SensorState { value: "68", unit: Some("°F") };
        assert_eq!(parse_temperature(&state), Ok(20.0));
    }

    #[test]
    fn rejects_kelvin() {
        let state = SensorState { value: "294", unit: Some("K") };
        assert!(matches!(
            parse_temperature(&state),
            Err(ParseError::UnsupportedUnit { .. })
        ));
    }

    #[test]
    fn rejects_missing_unit_and_garbage() {
        let state = SensorState { value: "21.3", unit: None };
        assert_eq!(parse_temperature(&state), Err(ParseError::MissingUnit));

        let state = SensorState { value: "chilly", unit: Some("°C") };
        assert_eq!(parse_temperature(&state), Err(ParseError::InvalidNumber));
    }
}
