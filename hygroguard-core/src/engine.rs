//! The Derivation Engine
//!
//! ## Overview
//!
//! One engine instance owns the latest validated reading per tracked source
//! and the outputs of the last derivation pass. The host adapter drives it
//! through three entry points:
//!
//! ```text
//! Change Notifier ──► apply_update(source, state) ──► bool ("recompute?")
//!                          │
//!                          ▼
//!                     recompute()  (full pipeline pass)
//!                          │
//!                          ▼
//! Output Sink    ◄── state() / attributes() / is_available()
//! ```
//!
//! ## Concurrency contract
//!
//! Strictly single-threaded and reactive: the adapter handles one state
//! event to completion (parse → store → recompute → publish) before the
//! next. The engine has no interior mutability, no timers, and nothing to
//! lock; every computation is a bounded closed-form pass.
//!
//! ## Update semantics
//!
//! - An event carrying no state at all is ignored (no store, no recompute).
//! - An `"unknown"` state from a source that has never reported is a startup
//!   transient: ignored. From a source that has reported, it overwrites the
//!   stored value to unknown and requests a recompute.
//! - A parse failure stores unknown (the rejection is logged at the adapter
//!   boundary) and requests a recompute - dependent outputs go unknown
//!   rather than staying stale.
//!
//! During startup replay the host calls `apply_update` once per tracked
//! source and triggers the initial recompute only if every call returned
//! `true`.

use heapless::String;

use crate::adapter::{self, SensorState};
use crate::output::{Attributes, OutputKind, StateValue};
use crate::pipeline::{self, Derived, EngineInputs};
use crate::psychro;
use crate::units::UnitSystem;
use crate::{log_debug, log_warn};

/// Maximum length of a source reference or display name.
pub const MAX_REF_LEN: usize = 64;

/// Bounded string for source references and display names.
pub type SourceRef = String<MAX_REF_LEN>;

/// The tracked input quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SourceKey {
    /// Indoor dry-bulb temperature
    IndoorTemperature = 0,
    /// Indoor relative humidity
    IndoorHumidity = 1,
    /// Critical (coldest-surface) temperature
    CriticalTemperature = 2,
    /// Indoor barometric pressure
    IndoorPressure = 3,
}

impl SourceKey {
    /// Human-readable name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IndoorTemperature => "indoor temperature",
            Self::IndoorHumidity => "indoor humidity",
            Self::CriticalTemperature => "critical temperature",
            Self::IndoorPressure => "indoor pressure",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Upstream source references for the tracked quantities.
///
/// The three humidity-and-temperature sources are required; pressure is
/// optional (the standard atmosphere at the configured elevation stands in
/// for it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBindings {
    indoor_temp: SourceRef,
    critical_temp: SourceRef,
    indoor_humidity: SourceRef,
    indoor_pressure: Option<SourceRef>,
}

impl SourceBindings {
    /// Bind the three required sources. Returns `None` when a reference
    /// exceeds [`MAX_REF_LEN`].
    pub fn new(indoor_temp: &str, critical_temp: &str, indoor_humidity: &str) -> Option<Self> {
        Some(Self {
            indoor_temp: SourceRef::try_from(indoor_temp).ok()?,
            critical_temp: SourceRef::try_from(critical_temp).ok()?,
            indoor_humidity: SourceRef::try_from(indoor_humidity).ok()?,
            indoor_pressure: None,
        })
    }

    /// Additionally bind a live pressure source.
    pub fn with_pressure(mut self, indoor_pressure: &str) -> Option<Self> {
        self.indoor_pressure = Some(SourceRef::try_from(indoor_pressure).ok()?);
        Some(self)
    }

    /// Map a changed upstream reference to the tracked quantity it feeds.
    pub fn route(&self, reference: &str) -> Option<SourceKey> {
        if reference == self.indoor_temp.as_str() {
            Some(SourceKey::IndoorTemperature)
        } else if reference == self.critical_temp.as_str() {
            Some(SourceKey::CriticalTemperature)
        } else if reference == self.indoor_humidity.as_str() {
            Some(SourceKey::IndoorHumidity)
        } else if self.indoor_pressure.as_deref() == Some(reference) {
            Some(SourceKey::IndoorPressure)
        } else {
            None
        }
    }

    /// Reference bound to a tracked quantity, if any.
    pub fn get(&self, key: SourceKey) -> Option<&str> {
        match key {
            SourceKey::IndoorTemperature => Some(self.indoor_temp.as_str()),
            SourceKey::CriticalTemperature => Some(self.critical_temp.as_str()),
            SourceKey::IndoorHumidity => Some(self.indoor_humidity.as_str()),
            SourceKey::IndoorPressure => self.indoor_pressure.as_deref(),
        }
    }

    /// Whether a live pressure source is bound.
    pub fn has_pressure_source(&self) -> bool {
        self.indoor_pressure.is_some()
    }
}

/// Per-instance engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Upstream source bindings
    pub sources: SourceBindings,
    /// Optional display name for the published value
    pub name: Option<SourceRef>,
    /// Which derived quantity is published as the state
    pub output: OutputKind,
    /// Fixed comfortable-specific-humidity target (mg/g); wins over the
    /// computed target on every pass
    pub comfortable_specific_humidity: Option<f64>,
    /// Site elevation (m) for the default standard-atmosphere pressure
    pub elevation_m: f64,
}

impl EngineConfig {
    /// Configuration with defaults: optimal humidity output, sea level, no
    /// comfort override.
    pub fn new(sources: SourceBindings) -> Self {
        Self {
            sources,
            name: None,
            output: OutputKind::default(),
            comfortable_specific_humidity: None,
            elevation_m: 0.0,
        }
    }
}

/// Stateful psychrometric derivation engine.
///
/// See the [module docs](self) for the update contract.
pub struct DerivationEngine {
    config: EngineConfig,
    inputs: EngineInputs,
    /// Sources that have stored at least one reading (real or unknown)
    reported: [bool; 4],
    derived: Derived,
}

impl DerivationEngine {
    /// Create an engine; the indoor pressure starts at the standard
    /// atmosphere for the configured elevation.
    pub fn new(config: EngineConfig) -> Self {
        let default_pressure = psychro::standard_atmosphere_pressure(config.elevation_m);
        log_debug!(
            "Pressure at configured elevation of {} m is {} Pa",
            config.elevation_m,
            default_pressure
        );

        Self {
            config,
            inputs: EngineInputs {
                indoor_pressure_pa: Some(default_pressure),
                ..EngineInputs::default()
            },
            reported: [false; 4],
            derived: Derived::default(),
        }
    }

    /// The instance configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Map a changed upstream reference to its tracked quantity.
    pub fn route(&self, reference: &str) -> Option<SourceKey> {
        self.config.sources.route(reference)
    }

    /// The currently stored validated inputs.
    pub fn inputs(&self) -> &EngineInputs {
        &self.inputs
    }

    /// Outputs of the last [`recompute`](Self::recompute).
    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    /// Feed one state event for a tracked source.
    ///
    /// Returns whether anything relevant changed, i.e. whether the host
    /// should recompute and republish.
    pub fn apply_update(&mut self, source: SourceKey, state: Option<&SensorState<'_>>) -> bool {
        let Some(state) = state else {
            return false;
        };

        if state.is_unknown() && !self.reported[source.index()] {
            log_debug!("Ignoring startup-transient unknown from {}", source.name());
            return false;
        }

        let parsed = if state.is_unknown() {
            log_warn!("Source for {} reports unknown", source.name());
            None
        } else {
            match source {
                SourceKey::IndoorTemperature | SourceKey::CriticalTemperature => {
                    adapter::parse_temperature(state).ok()
                }
                SourceKey::IndoorHumidity => adapter::parse_humidity(state).ok(),
                SourceKey::IndoorPressure => adapter::parse_pressure(state).ok(),
            }
        };

        log_debug!("Stored {} = {:?}", source.name(), parsed);
        match source {
            SourceKey::IndoorTemperature => self.inputs.indoor_temp_c = parsed,
            SourceKey::IndoorHumidity => self.inputs.indoor_humidity = parsed,
            SourceKey::CriticalTemperature => self.inputs.critical_temp_c = parsed,
            SourceKey::IndoorPressure => self.inputs.indoor_pressure_pa = parsed,
        }
        self.reported[source.index()] = true;

        true
    }

    /// Re-derive every output from the currently stored inputs.
    pub fn recompute(&mut self) {
        self.derived = pipeline::derive(&self.inputs, self.config.comfortable_specific_humidity);
    }

    /// The configured quantity as a publishable value, in presentation units.
    pub fn state(&self, unit_system: UnitSystem) -> Option<StateValue> {
        self.derived.state(self.config.output, unit_system)
    }

    /// Whether the published value is currently available.
    pub fn is_available(&self) -> bool {
        self.derived.is_available(self.config.output)
    }

    /// The full attribute map in presentation units.
    pub fn attributes(&self, unit_system: UnitSystem) -> Attributes {
        self.derived.attributes(unit_system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DerivationEngine {
        let sources = SourceBindings::new(
            "sensor.indoor_temp",
            "sensor.window_temp",
            "sensor.indoor_humidity",
        )
        .unwrap()
        .with_pressure("sensor.pressure")
        .unwrap();
        DerivationEngine::new(EngineConfig::new(sources))
    }

    fn celsius(value: &str) -> SensorState<'_> {
        SensorState { value, unit: Some("°C") }
    }

    #[test]
    fn routing() {
        let engine = engine();
        assert_eq!(
            engine.route("sensor.indoor_temp"),
            Some(SourceKey::IndoorTemperature)
        );
        assert_eq!(
            engine.route("sensor.window_temp"),
            Some(SourceKey::CriticalTemperature)
        );
        assert_eq!(engine.route("sensor.pressure"), Some(SourceKey::IndoorPressure));
        assert_eq!(engine.route("sensor.someone_elses"), None);

        let sources = &engine.config().sources;
        assert!(sources.has_pressure_source());
        assert_eq!(sources.get(SourceKey::IndoorHumidity), Some("sensor.indoor_humidity"));
    }

    #[test]
    fn pressure_binding_is_optional() {
        let sources = SourceBindings::new("sensor.t", "sensor.ct", "sensor.h").unwrap();
        assert!(!sources.has_pressure_source());
        assert_eq!(sources.get(SourceKey::IndoorPressure), None);
        assert_eq!(sources.route("sensor.t"), Some(SourceKey::IndoorTemperature));
    }

    #[test]
    fn default_pressure_from_elevation() {
        let sources =
            SourceBindings::new("sensor.t", "sensor.ct", "sensor.h").unwrap();
        let mut config = EngineConfig::new(sources);
        config.elevation_m = 1000.0;
        let engine = DerivationEngine::new(config);

        let pressure = engine.inputs().indoor_pressure_pa.unwrap();
        assert!(pressure < 101_325.0);
        assert!((pressure - 89_875.0).abs() < 100.0);
    }

    #[test]
    fn missing_event_is_ignored() {
        let mut engine = engine();
        assert!(!engine.apply_update(SourceKey::IndoorTemperature, None));
        assert_eq!(engine.inputs().indoor_temp_c, None);
    }

    #[test]
    fn startup_transient_unknown_is_ignored() {
        let mut engine = engine();
        let unknown = SensorState { value: "unknown", unit: None };

        // never reported -> transient, no store, no recompute request
        assert!(!engine.apply_update(SourceKey::IndoorPressure, Some(&unknown)));
        // the elevation default survives
        assert!(engine.inputs().indoor_pressure_pa.is_some());
    }

    #[test]
    fn later_unknown_overwrites() {
        let mut engine = engine();
        assert!(engine.apply_update(SourceKey::IndoorTemperature, Some(&celsius("21.0"))));
        assert_eq!(engine.inputs().indoor_temp_c, Some(21.0));

        let unknown = SensorState { value: "unknown", unit: None };
        assert!(engine.apply_update(SourceKey::IndoorTemperature, Some(&unknown)));
        assert_eq!(engine.inputs().indoor_temp_c, None);
    }

    #[test]
    fn parse_failure_stores_unknown_and_requests_recompute() {
        let mut engine = engine();
        assert!(engine.apply_update(SourceKey::IndoorTemperature, Some(&celsius("21.0"))));

        let bad = SensorState { value: "21.0", unit: Some("K") };
        assert!(engine.apply_update(SourceKey::IndoorTemperature, Some(&bad)));
        assert_eq!(engine.inputs().indoor_temp_c, None);
    }

    #[test]
    fn full_update_cycle() {
        let mut engine = engine();
        let percent = SensorState { value: "45", unit: Some("%") };
        let pascals = SensorState { value: "101325", unit: Some("Pa") };

        assert!(engine.apply_update(SourceKey::IndoorTemperature, Some(&celsius("21.0"))));
        assert!(engine.apply_update(SourceKey::IndoorHumidity, Some(&percent)));
        assert!(engine.apply_update(SourceKey::CriticalTemperature, Some(&celsius("10.0"))));
        assert!(engine.apply_update(SourceKey::IndoorPressure, Some(&pascals)));
        engine.recompute();

        let derived = engine.derived();
        assert!(derived.dew_point_c.is_some());
        assert!(derived.optimal_humidity.is_some());
        assert_eq!(derived.mold_warning, Some(true));

        // default output kind is optimal humidity
        assert!(engine.derived().state(engine.config().output, UnitSystem::Metric).is_some());
    }

    #[test]
    fn fahrenheit_reading_matches_celsius_reading() {
        let mut a = engine();
        let mut b = engine();

        a.apply_update(SourceKey::IndoorTemperature, Some(&celsius("20.0")));
        let fahrenheit = SensorState { value: "68.0", unit: Some("°F") };
        b.apply_update(SourceKey::IndoorTemperature, Some(&fahrenheit));

        assert_eq!(a.inputs().indoor_temp_c, b.inputs().indoor_temp_c);
    }
}
