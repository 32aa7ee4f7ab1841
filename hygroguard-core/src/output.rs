//! Output Selection and Presentation
//!
//! ## Overview
//!
//! The host publishes exactly one derived quantity as the state, selected by
//! configuration, and the full set of derived quantities as auxiliary
//! attributes. This module is the presentation boundary: the one place where
//! internal SI values may become Fahrenheit for an imperial host, and where
//! availability is decided.
//!
//! Availability is a property of the selection, not of the engine: the
//! published value is available iff the selected quantity is known.

use crate::pipeline::Derived;
use crate::units::{self, UnitSystem};

/// The derived quantity published as the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum OutputKind {
    /// Dew point of the indoor air
    DewPoint = 0,
    /// Current specific humidity
    SpecificHumidity = 1,
    /// RH at the critical temperature consistent with the dew point
    CriticalHumidity = 2,
    /// Recommended RH balancing comfort against mold risk
    #[default]
    OptimalHumidity = 3,
    /// Condensation/mold risk flag
    MoldWarning = 4,
    /// Humidex at actual current conditions
    Humidex = 5,
    /// Humidex if RH were the optimal humidity
    OptimalHumidex = 6,
    /// Comfort bracket of the current humidex
    HumidexComfort = 7,
    /// Specific-humidity target for comfort
    ComfortableSpecificHumidity = 8,
    /// RH at indoor temperature reaching the comfort target
    ComfortableHumidity = 9,
}

impl OutputKind {
    /// Canonical attribute name of this quantity.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DewPoint => "dewpoint",
            Self::SpecificHumidity => "specific_humidity",
            Self::CriticalHumidity => "critical_humidity",
            Self::OptimalHumidity => "optimal_humidity",
            Self::MoldWarning => "mold_warning",
            Self::Humidex => "humidex",
            Self::OptimalHumidex => "optimal_humidex",
            Self::HumidexComfort => "humidex_comfort",
            Self::ComfortableSpecificHumidity => "comfortable_specific_humidity",
            Self::ComfortableHumidity => "comfortable_humidity",
        }
    }

    /// Whether this quantity is a temperature (and thus subject to °F
    /// presentation on imperial hosts).
    pub const fn is_temperature(&self) -> bool {
        matches!(self, Self::DewPoint | Self::Humidex | Self::OptimalHumidex)
    }

    /// Presentation unit under the given host unit system.
    pub const fn unit(&self, unit_system: UnitSystem) -> &'static str {
        match self {
            Self::DewPoint | Self::Humidex | Self::OptimalHumidex => match unit_system {
                UnitSystem::Metric => units::CELSIUS,
                UnitSystem::Imperial => units::FAHRENHEIT,
            },
            Self::SpecificHumidity | Self::ComfortableSpecificHumidity => {
                units::MILLIGRAMS_PER_GRAM
            }
            Self::CriticalHumidity | Self::OptimalHumidity | Self::ComfortableHumidity => {
                units::PERCENT
            }
            Self::MoldWarning | Self::HumidexComfort => "",
        }
    }
}

/// A published state value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StateValue {
    /// Numeric quantity in its presentation unit
    Number(f64),
    /// Boolean flag
    Flag(bool),
    /// Discrete label
    Label(&'static str),
}

impl core::fmt::Display for StateValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Flag(value) => write!(f, "{value}"),
            Self::Label(value) => f.write_str(value),
        }
    }
}

/// The fixed attribute map published alongside the state.
///
/// Field names are the canonical attribute names; temperature-valued fields
/// are already in the presentation unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attributes {
    /// Dew point in the presentation temperature unit
    pub dewpoint: Option<f64>,
    /// Current specific humidity (mg/g)
    pub specific_humidity: Option<f64>,
    /// Recommended RH (%)
    pub optimal_humidity: Option<f64>,
    /// RH at the critical temperature (%)
    pub critical_humidity: Option<f64>,
    /// Condensation/mold risk flag
    pub mold_warning: Option<bool>,
    /// Humidex in the presentation temperature unit
    pub humidex: Option<f64>,
    /// Comfort bracket label of the current humidex
    pub humidex_comfort: Option<&'static str>,
    /// Specific-humidity comfort target (mg/g)
    pub comfortable_specific_humidity: Option<f64>,
    /// Humidex at the optimal humidity, presentation temperature unit
    pub optimal_humidex: Option<f64>,
    /// RH reaching the comfort target (%)
    pub comfortable_humidity: Option<f64>,
}

fn present_temperature(celsius: Option<f64>, unit_system: UnitSystem) -> Option<f64> {
    match unit_system {
        UnitSystem::Metric => celsius,
        UnitSystem::Imperial => celsius.map(units::celsius_to_fahrenheit),
    }
}

impl Derived {
    /// The selected quantity as a publishable value, in presentation units.
    ///
    /// `None` means the published value is unavailable.
    pub fn state(&self, kind: OutputKind, unit_system: UnitSystem) -> Option<StateValue> {
        match kind {
            OutputKind::DewPoint => {
                present_temperature(self.dew_point_c, unit_system).map(StateValue::Number)
            }
            OutputKind::SpecificHumidity => self.specific_humidity.map(StateValue::Number),
            OutputKind::CriticalHumidity => self.critical_humidity.map(StateValue::Number),
            OutputKind::OptimalHumidity => self.optimal_humidity.map(StateValue::Number),
            OutputKind::MoldWarning => self.mold_warning.map(StateValue::Flag),
            OutputKind::Humidex => {
                present_temperature(self.humidex_c, unit_system).map(StateValue::Number)
            }
            OutputKind::OptimalHumidex => {
                present_temperature(self.optimal_humidex_c, unit_system).map(StateValue::Number)
            }
            OutputKind::HumidexComfort => self
                .humidex_comfort
                .map(|comfort| StateValue::Label(comfort.label())),
            OutputKind::ComfortableSpecificHumidity => {
                self.comfortable_specific_humidity.map(StateValue::Number)
            }
            OutputKind::ComfortableHumidity => self.comfortable_humidity.map(StateValue::Number),
        }
    }

    /// Whether the selected quantity is known.
    pub fn is_available(&self, kind: OutputKind) -> bool {
        // presentation conversion cannot change knownness
        self.state(kind, UnitSystem::Metric).is_some()
    }

    /// The full attribute map in presentation units.
    pub fn attributes(&self, unit_system: UnitSystem) -> Attributes {
        Attributes {
            dewpoint: present_temperature(self.dew_point_c, unit_system),
            specific_humidity: self.specific_humidity,
            optimal_humidity: self.optimal_humidity,
            critical_humidity: self.critical_humidity,
            mold_warning: self.mold_warning,
            humidex: present_temperature(self.humidex_c, unit_system),
            humidex_comfort: self.humidex_comfort.map(|comfort| comfort.label()),
            comfortable_specific_humidity: self.comfortable_specific_humidity,
            optimal_humidex: present_temperature(self.optimal_humidex_c, unit_system),
            comfortable_humidity: self.comfortable_humidity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::HumidexComfort;

    fn sample() -> Derived {
        Derived {
            dew_point_c: Some(8.6),
            specific_humidity: Some(6.89),
            critical_humidity: Some(91.0),
            comfortable_specific_humidity: Some(6.9),
            comfortable_humidity: Some(45.0),
            optimal_humidity: Some(29.6),
            optimal_humidex_c: Some(18.5),
            humidex_c: Some(21.66),
            humidex_comfort: Some(HumidexComfort::NoDiscomfort),
            mold_warning: Some(true),
        }
    }

    #[test]
    fn state_selection() {
        let derived = sample();
        assert_eq!(
            derived.state(OutputKind::OptimalHumidity, UnitSystem::Metric),
            Some(StateValue::Number(29.6))
        );
        assert_eq!(
            derived.state(OutputKind::MoldWarning, UnitSystem::Metric),
            Some(StateValue::Flag(true))
        );
        assert_eq!(
            derived.state(OutputKind::HumidexComfort, UnitSystem::Metric),
            Some(StateValue::Label("Little or no discomfort"))
        );
    }

    #[test]
    fn availability_follows_selection() {
        let mut derived = sample();
        derived.optimal_humidity = None;

        assert!(!derived.is_available(OutputKind::OptimalHumidity));
        assert!(derived.is_available(OutputKind::DewPoint));
        assert!(derived.is_available(OutputKind::MoldWarning));
    }

    #[test]
    fn imperial_converts_temperatures_only() {
        let derived = sample();
        let metric = derived.attributes(UnitSystem::Metric);
        let imperial = derived.attributes(UnitSystem::Imperial);

        assert_eq!(metric.dewpoint, Some(8.6));
        assert!((imperial.dewpoint.unwrap() - 47.48).abs() < 0.01);
        assert!((imperial.humidex.unwrap() - 70.988).abs() < 0.01);
        assert!((imperial.optimal_humidex.unwrap() - 65.3).abs() < 0.01);

        // non-temperature attributes are untouched
        assert_eq!(imperial.optimal_humidity, metric.optimal_humidity);
        assert_eq!(imperial.specific_humidity, metric.specific_humidity);
        assert_eq!(imperial.humidex_comfort, metric.humidex_comfort);
    }

    #[test]
    fn state_conversion_matches_attribute_conversion() {
        let derived = sample();
        let state = derived.state(OutputKind::DewPoint, UnitSystem::Imperial);
        let attributes = derived.attributes(UnitSystem::Imperial);
        assert_eq!(state, attributes.dewpoint.map(StateValue::Number));
    }

    #[test]
    fn units_per_kind() {
        assert_eq!(OutputKind::DewPoint.unit(UnitSystem::Metric), "°C");
        assert_eq!(OutputKind::DewPoint.unit(UnitSystem::Imperial), "°F");
        assert_eq!(OutputKind::OptimalHumidity.unit(UnitSystem::Imperial), "%");
        assert_eq!(OutputKind::SpecificHumidity.unit(UnitSystem::Metric), "mg/g");
        assert_eq!(OutputKind::MoldWarning.unit(UnitSystem::Metric), "");
    }

    #[test]
    fn kind_names_are_canonical() {
        assert_eq!(OutputKind::DewPoint.name(), "dewpoint");
        assert_eq!(
            OutputKind::ComfortableSpecificHumidity.name(),
            "comfortable_specific_humidity"
        );
        assert!(OutputKind::OptimalHumidex.is_temperature());
        assert!(!OutputKind::CriticalHumidity.is_temperature());
    }
}
