//! Property Tests for the Derivation Pipeline
//!
//! Physical invariants that must hold across the whole input space, not
//! just at hand-picked reference points.

use proptest::prelude::*;

use hygroguard_core::pipeline::{derive, EngineInputs};
use hygroguard_core::psychro;

fn arbitrary_inputs() -> impl Strategy<Value = EngineInputs> {
    (
        prop::option::weighted(0.9, -30.0f64..45.0),
        prop::option::weighted(0.9, 0.01f64..1.0),
        prop::option::weighted(0.9, -40.0f64..45.0),
        prop::option::weighted(0.9, 80_000.0f64..105_000.0),
    )
        .prop_map(|(temp, humidity, critical, pressure)| EngineInputs {
            indoor_temp_c: temp,
            indoor_humidity: humidity,
            critical_temp_c: critical,
            indoor_pressure_pa: pressure,
        })
}

proptest! {
    #[test]
    fn dew_point_never_exceeds_dry_bulb(
        temp in -40.0f64..50.0,
        rel_hum in 0.01f64..1.0,
    ) {
        let dew_point = psychro::dew_point_from_rel_hum(temp, rel_hum).unwrap();
        prop_assert!(dew_point <= temp + 1e-9);
    }

    #[test]
    fn dew_point_increases_with_humidity(
        temp in -10.0f64..40.0,
        rel_hum in 0.05f64..0.9,
    ) {
        let lower = psychro::dew_point_from_rel_hum(temp, rel_hum).unwrap();
        let higher = psychro::dew_point_from_rel_hum(temp, rel_hum + 0.05).unwrap();
        prop_assert!(higher > lower);
    }

    #[test]
    fn percentages_stay_physical(inputs in arbitrary_inputs()) {
        let out = derive(&inputs, None);

        if let Some(critical) = out.critical_humidity {
            prop_assert!((0.0..=100.0).contains(&critical), "critical {critical}");
        }
        if let Some(comfortable) = out.comfortable_humidity {
            prop_assert!((0.0..=100.0).contains(&comfortable), "comfortable {comfortable}");
        }
        if let Some(optimal) = out.optimal_humidity {
            prop_assert!((0.0..=60.0).contains(&optimal), "optimal {optimal}");
        }
    }

    #[test]
    fn mold_warning_matches_its_inputs(inputs in arbitrary_inputs()) {
        let out = derive(&inputs, None);

        match (inputs.indoor_humidity, out.critical_humidity) {
            (Some(indoor), Some(critical)) => {
                let expected = indoor > 0.60 || critical > 60.0;
                prop_assert_eq!(out.mold_warning, Some(expected));
            }
            _ => prop_assert_eq!(out.mold_warning, None),
        }
    }

    #[test]
    fn unknown_inputs_never_leak_values(inputs in arbitrary_inputs()) {
        let out = derive(&inputs, None);

        if inputs.indoor_temp_c.is_none() || inputs.indoor_humidity.is_none() {
            prop_assert!(out.dew_point_c.is_none());
            prop_assert!(out.humidex_c.is_none());
            prop_assert!(out.humidex_comfort.is_none());
        }
        if inputs.critical_temp_c.is_none() {
            prop_assert!(out.critical_humidity.is_none());
            prop_assert!(out.mold_warning.is_none());
            prop_assert!(out.optimal_humidity.is_none());
            prop_assert!(out.optimal_humidex_c.is_none());
        }
        if inputs.indoor_pressure_pa.is_none() {
            prop_assert!(out.specific_humidity.is_none());
            prop_assert!(out.comfortable_specific_humidity.is_none());
        }
    }

    #[test]
    fn derivation_is_idempotent(
        inputs in arbitrary_inputs(),
        comfort_override in prop::option::of(1.0f64..15.0),
    ) {
        prop_assert_eq!(
            derive(&inputs, comfort_override),
            derive(&inputs, comfort_override)
        );
    }

    #[test]
    fn standard_atmosphere_decreases_with_elevation(
        lower in -400.0f64..4_000.0,
        gap in 1.0f64..1_000.0,
    ) {
        let below = psychro::standard_atmosphere_pressure(lower);
        let above = psychro::standard_atmosphere_pressure(lower + gap);
        prop_assert!(above < below);
    }
}
