//! Psychrometric derivation engine for HygroGuard
//!
//! Derives indoor-air-quality metrics (dew point, specific humidity,
//! critical/optimal/comfortable relative humidity, humidex, mold risk) from
//! three or four raw sensor readings and exposes one selected value plus a
//! full attribute set to the host.
//!
//! Key constraints:
//! - All internal math in SI units (°C, Pa, fractional RH)
//! - Unknown inputs poison dependent outputs, never stale values
//! - No host-framework coupling: update-input, recompute, read-output
//!
//! ```
//! use hygroguard_core::{DerivationEngine, EngineConfig, SourceBindings};
//! use hygroguard_core::adapter::SensorState;
//! use hygroguard_core::engine::SourceKey;
//!
//! let sources = SourceBindings::new(
//!     "sensor.living_room_temp",
//!     "sensor.window_frame_temp",
//!     "sensor.living_room_humidity",
//! ).unwrap();
//! let mut engine = DerivationEngine::new(EngineConfig::new(sources));
//!
//! let state = SensorState { value: "21.0", unit: Some("°C") };
//! if engine.apply_update(SourceKey::IndoorTemperature, Some(&state)) {
//!     engine.recompute();
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod output;
pub mod pipeline;
pub mod psychro;
pub mod units;

// Public API
pub use engine::{DerivationEngine, EngineConfig, SourceBindings, SourceKey};
pub use errors::{ParseError, PsychroError};
pub use output::{Attributes, OutputKind, StateValue};
pub use pipeline::{Derived, EngineInputs, HumidexComfort};
pub use units::UnitSystem;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Optional logging macros - compile to nothing without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub(crate) use {log_debug, log_warn};
