//! Basic Derivation Example
//!
//! Drives one engine instance the way a host adapter would: bind sources,
//! replay their current states, recompute, and read the published value
//! plus the attribute map.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_derivation
//! ```

use hygroguard_core::{
    adapter::SensorState,
    engine::SourceKey,
    DerivationEngine, EngineConfig, SourceBindings, UnitSystem,
};

fn main() {
    println!("HygroGuard Basic Derivation Example");
    println!("===================================\n");

    let sources = SourceBindings::new(
        "sensor.living_room_temp",
        "sensor.window_frame_temp",
        "sensor.living_room_humidity",
    )
    .expect("source references fit");

    // No pressure source bound: the engine starts from the standard
    // atmosphere at the configured elevation
    let mut config = EngineConfig::new(sources);
    config.elevation_m = 350.0;
    let mut engine = DerivationEngine::new(config);

    println!(
        "Default pressure at 350 m: {:.0} Pa\n",
        engine.inputs().indoor_pressure_pa.unwrap()
    );

    // Startup replay: one state per tracked source
    let readings = [
        (SourceKey::IndoorTemperature, SensorState { value: "21.4", unit: Some("°C") }),
        (SourceKey::IndoorHumidity, SensorState { value: "52", unit: Some("%") }),
        (SourceKey::CriticalTemperature, SensorState { value: "48.4", unit: Some("°F") }),
    ];

    let mut schedule_update = true;
    for (source, state) in &readings {
        println!("  {:?} <- {} {}", source, state.value, state.unit.unwrap());
        if !engine.apply_update(*source, Some(state)) {
            schedule_update = false;
        }
    }

    if schedule_update {
        engine.recompute();
    }

    println!("\nPublished state (optimal humidity):");
    match engine.state(UnitSystem::Metric) {
        Some(value) => println!("  {} %", value),
        None => println!("  unavailable"),
    }

    let attributes = engine.attributes(UnitSystem::Metric);
    println!("\nAttributes:");
    println!("  dewpoint:            {:?} °C", attributes.dewpoint);
    println!("  specific humidity:   {:?} mg/g", attributes.specific_humidity);
    println!("  critical humidity:   {:?} %", attributes.critical_humidity);
    println!("  comfortable humidity:{:?} %", attributes.comfortable_humidity);
    println!("  optimal humidity:    {:?} %", attributes.optimal_humidity);
    println!("  humidex:             {:?} °C", attributes.humidex);
    println!("  humidex comfort:     {:?}", attributes.humidex_comfort);
    println!("  mold warning:        {:?}", attributes.mold_warning);

    // A later unknown from the humidity source takes the output down with it
    let unknown = SensorState { value: "unknown", unit: None };
    if engine.apply_update(SourceKey::IndoorHumidity, Some(&unknown)) {
        engine.recompute();
    }
    println!(
        "\nAfter the humidity source goes unknown: available = {}",
        engine.is_available()
    );
}
