//! The Derivation Pipeline
//!
//! ## Overview
//!
//! One ordered, total pass from validated SI inputs to every derived
//! quantity. The pass runs in full on every recompute - there is no
//! incremental invalidation - and each step guards on its own required
//! inputs:
//!
//! ```text
//! inputs:   T_in    RH_in    T_crit    P_in
//!             │       │        │        │
//!             ├───────┤        │        │
//!             ▼       ▼        │        │
//!          DewPoint ──────────►│        │
//!             │    CriticalHumidity     │
//!             │                │        ▼
//!             ├────────────────┼─► SpecificHumidity
//!             │                │   ComfortableSpecificHumidity
//!             │                │        │
//!             ▼                ▼        ▼
//!        ComfortableHumidity ─► OptimalHumidity ─► OptimalHumidex
//!             │                │
//!          Humidex          MoldWarning
//!             │
//!        HumidexComfort
//! ```
//!
//! An unknown input leaves every dependent quantity unknown; a known set of
//! inputs always produces the same outputs (the pass is a pure function of
//! the input struct).
//!
//! ## Clamping vs. unknown
//!
//! Range violations that come from model edge effects (a projected RH a
//! fraction over 100 %) are silently clamped to the physical bound.
//! Physically impossible targets (a mold-safe humidity that cannot exist at
//! the current temperatures) produce an unknown, with a warning - the
//! engine never publishes an extrapolated guess.

use crate::constants::comfort::{
    HUMIDEX_BASE_VAPOR_PRESSURE_MB, HUMIDEX_BREAK_POINTS_C, HUMIDEX_VAPOR_PRESSURE_COEFF,
    IDEAL_COMFORT_HUMIDITY, IDEAL_COMFORT_TEMP_C,
};
use crate::constants::physics::{MOLD_RISK_MAX_HUMIDITY_FRACTION, MOLD_RISK_MAX_HUMIDITY_PCT};
use crate::psychro;
use crate::units::MB_PER_PA;
use crate::{log_debug, log_warn};

use libm::{pow, round};

/// Validated SI inputs the engine stores between recomputes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineInputs {
    /// Indoor dry-bulb temperature (°C)
    pub indoor_temp_c: Option<f64>,
    /// Indoor relative humidity (fraction [0, 1])
    pub indoor_humidity: Option<f64>,
    /// Critical (coldest-surface) temperature (°C)
    pub critical_temp_c: Option<f64>,
    /// Indoor barometric pressure (Pa)
    pub indoor_pressure_pa: Option<f64>,
}

/// Every quantity the pipeline derives, `None` = unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Derived {
    /// Dew point of the indoor air (°C, 2 decimals)
    pub dew_point_c: Option<f64>,
    /// Current specific humidity (mg water / g air, 2 decimals)
    pub specific_humidity: Option<f64>,
    /// RH at the critical temperature consistent with the dew point (%, 1 decimal)
    pub critical_humidity: Option<f64>,
    /// Specific humidity target for comfort (mg/g, 2 decimals)
    pub comfortable_specific_humidity: Option<f64>,
    /// RH at indoor temperature reaching the comfort target (%, 2 decimals)
    pub comfortable_humidity: Option<f64>,
    /// Recommended RH balancing comfort against mold risk (%, 1 decimal, ≤ 60)
    pub optimal_humidity: Option<f64>,
    /// Humidex if RH were the optimal humidity (°C, 2 decimals)
    pub optimal_humidex_c: Option<f64>,
    /// Humidex at actual current conditions (°C, 2 decimals)
    pub humidex_c: Option<f64>,
    /// Comfort bracket of the current humidex
    pub humidex_comfort: Option<HumidexComfort>,
    /// Condensation/mold risk flag
    pub mold_warning: Option<bool>,
}

/// Discrete comfort bracket of a humidex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HumidexComfort {
    /// Humidex up to 30
    NoDiscomfort = 0,
    /// Humidex above 30
    NoticeableDiscomfort = 1,
    /// Humidex above 35
    EvidentDiscomfort = 2,
    /// Humidex above 40
    IntenseDiscomfort = 3,
    /// Humidex above 46
    DangerousDiscomfort = 4,
    /// Humidex above 55
    HeatStrokeProbable = 5,
}

impl HumidexComfort {
    /// Classify a humidex value into its comfort bracket.
    pub fn from_humidex(humidex_c: f64) -> Self {
        let shifted = humidex_c - 1.0;
        let bracket = HUMIDEX_BREAK_POINTS_C
            .iter()
            .filter(|point| shifted >= **point)
            .count();

        match bracket {
            0 => Self::NoDiscomfort,
            1 => Self::NoticeableDiscomfort,
            2 => Self::EvidentDiscomfort,
            3 => Self::IntenseDiscomfort,
            4 => Self::DangerousDiscomfort,
            _ => Self::HeatStrokeProbable,
        }
    }

    /// Human-readable label for this bracket.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoDiscomfort => "Little or no discomfort",
            Self::NoticeableDiscomfort => "Noticeable discomfort",
            Self::EvidentDiscomfort => "Evident discomfort",
            Self::IntenseDiscomfort => "Intense discomfort; avoid exertion",
            Self::DangerousDiscomfort => "Dangerous discomfort",
            Self::HeatStrokeProbable => "Heat stroke probable",
        }
    }
}

impl core::fmt::Display for HumidexComfort {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Run the full derivation pass.
///
/// `comfort_override` is the configured comfortable-specific-humidity
/// constant (mg/g); when present it wins over the computed target on every
/// pass.
pub fn derive(inputs: &EngineInputs, comfort_override: Option<f64>) -> Derived {
    let dew_point_c = dew_point(inputs);
    let critical_humidity = critical_humidity(dew_point_c, inputs.critical_temp_c);
    let specific_humidity = specific_humidity(dew_point_c, inputs.indoor_pressure_pa);
    let comfortable_specific_humidity =
        comfortable_specific_humidity(inputs.indoor_pressure_pa, comfort_override);
    let comfortable_humidity = comfortable_humidity(inputs, comfortable_specific_humidity);
    let optimal_humidity =
        optimal_humidity(inputs, comfortable_specific_humidity, comfortable_humidity);
    let optimal_humidex_c = optimal_humidex(inputs.indoor_temp_c, optimal_humidity);
    let mold_warning = mold_warning(inputs.indoor_humidity, critical_humidity);
    let humidex_c = indoor_humidex(inputs);
    let humidex_comfort = humidex_c.map(HumidexComfort::from_humidex);

    Derived {
        dew_point_c,
        specific_humidity,
        critical_humidity,
        comfortable_specific_humidity,
        comfortable_humidity,
        optimal_humidity,
        optimal_humidex_c,
        humidex_c,
        humidex_comfort,
        mold_warning,
    }
}

/// Step 1: dew point from indoor temperature and humidity.
fn dew_point(inputs: &EngineInputs) -> Option<f64> {
    let t = inputs.indoor_temp_c?;
    let rh = inputs.indoor_humidity?;

    match psychro::dew_point_from_rel_hum(t, rh) {
        Ok(dp) => {
            let dp = round_to(dp, 2);
            log_debug!("Dew point: {} °C", dp);
            Some(dp)
        }
        Err(e) => {
            log_warn!("Dew point not computable: {}", e);
            None
        }
    }
}

/// Step 2: RH at the critical surface consistent with the current dew point.
///
/// A dew point above the surface temperature means condensation: 100 %.
fn critical_humidity(dew_point_c: Option<f64>, critical_temp_c: Option<f64>) -> Option<f64> {
    let dp = dew_point_c?;
    let t_crit = critical_temp_c?;

    let rh_pct = if dp > t_crit {
        log_debug!("Dew point is above the critical surface temperature");
        100.0
    } else {
        psychro::rel_hum_from_dew_point(t_crit, dp).ok()? * 100.0
    };

    Some(if rh_pct > 100.0 {
        100.0
    } else if rh_pct < 0.0 {
        0.0
    } else {
        round_to(rh_pct, 1)
    })
}

/// Step 3: specific humidity of the air right now, in mass terms.
fn specific_humidity(dew_point_c: Option<f64>, pressure_pa: Option<f64>) -> Option<f64> {
    let dp = dew_point_c?;
    let p = pressure_pa?;

    let hum_ratio = psychro::hum_ratio_from_dew_point(dp, p).ok()?;
    let specific = psychro::specific_hum_from_hum_ratio(hum_ratio).ok()? * 1000.0;
    Some(round_to(specific, 2))
}

/// Step 4: the comfort target in mass terms. Config override wins verbatim.
fn comfortable_specific_humidity(
    pressure_pa: Option<f64>,
    comfort_override: Option<f64>,
) -> Option<f64> {
    if comfort_override.is_some() {
        return comfort_override;
    }

    let p = pressure_pa?;
    let hum_ratio =
        psychro::hum_ratio_from_rel_hum(IDEAL_COMFORT_TEMP_C, IDEAL_COMFORT_HUMIDITY, p).ok()?;
    let specific = psychro::specific_hum_from_hum_ratio(hum_ratio).ok()? * 1000.0;

    let specific = round_to(specific, 2);
    log_debug!("Comfortable specific humidity set to {} mg/g", specific);
    Some(specific)
}

/// Step 5: RH at the indoor temperature that reaches the comfort target.
fn comfortable_humidity(inputs: &EngineInputs, comfortable_specific: Option<f64>) -> Option<f64> {
    let t = inputs.indoor_temp_c?;
    let p = inputs.indoor_pressure_pa?;
    let target = comfortable_specific?;

    let hum_ratio = psychro::hum_ratio_from_specific_hum(target / 1000.0).ok()?;
    let mut rh_pct = psychro::rel_hum_from_hum_ratio(t, hum_ratio, p).ok()? * 100.0;

    if rh_pct > 100.0 {
        log_warn!(
            "Not possible to reach a comfortable humidity at {} °C, will feel dry",
            t
        );
        rh_pct = 100.0;
    }

    Some(round_to(rh_pct, 2))
}

/// Step 6: the primary output - comfort target bounded by mold risk.
///
/// Projects the comfortable dew point onto the critical surface; if that
/// side would exceed the mold threshold, back-solves the dew point pinned
/// at the threshold and re-projects it onto the indoor temperature.
fn optimal_humidity(
    inputs: &EngineInputs,
    comfortable_specific: Option<f64>,
    comfortable_humidity: Option<f64>,
) -> Option<f64> {
    let t = inputs.indoor_temp_c?;
    let t_crit = inputs.critical_temp_c?;
    let _ = comfortable_specific?;
    let comfort_rh_pct = comfortable_humidity?;

    let comfortable_dew = psychro::dew_point_from_rel_hum(t, comfort_rh_pct / 100.0).ok()?;

    let critical_side_rh = if comfortable_dew > t_crit {
        log_debug!("Comfortable dew point is above the critical surface temperature");
        1.0
    } else {
        psychro::rel_hum_from_dew_point(t_crit, comfortable_dew).ok()?
    };

    let optimal_pct = if critical_side_rh > MOLD_RISK_MAX_HUMIDITY_FRACTION {
        // Comfort target breaches the mold threshold at the critical surface.
        // Pin the surface at the threshold and see what that allows indoors.
        let bounded_dew =
            psychro::dew_point_from_rel_hum(t_crit, MOLD_RISK_MAX_HUMIDITY_FRACTION).ok()?;

        if bounded_dew > t {
            log_warn!(
                "Not possible to reach a mold-free humidity at {} °C indoors with a critical surface at {} °C",
                t,
                t_crit
            );
            return None;
        }

        psychro::rel_hum_from_dew_point(t, bounded_dew).ok()? * 100.0
    } else {
        comfort_rh_pct
    };

    Some(if optimal_pct > MOLD_RISK_MAX_HUMIDITY_PCT {
        MOLD_RISK_MAX_HUMIDITY_PCT
    } else if optimal_pct < 0.0 {
        0.0
    } else {
        round_to(optimal_pct, 1)
    })
}

/// Step 7: humidex the room would have at the optimal humidity.
fn optimal_humidex(indoor_temp_c: Option<f64>, optimal_humidity: Option<f64>) -> Option<f64> {
    let t = indoor_temp_c?;
    let optimal = optimal_humidity?;

    humidex(t, optimal / 100.0).map(|h| round_to(h, 2))
}

/// Step 8: condensation/mold risk, from either side of the room envelope.
fn mold_warning(indoor_humidity: Option<f64>, critical_humidity: Option<f64>) -> Option<bool> {
    let indoor = indoor_humidity?;
    let critical = critical_humidity?;

    let risk = indoor > MOLD_RISK_MAX_HUMIDITY_FRACTION || critical > MOLD_RISK_MAX_HUMIDITY_PCT;
    log_debug!("Risk of mold: {}", risk);
    Some(risk)
}

/// Step 9: humidex at actual current conditions.
fn indoor_humidex(inputs: &EngineInputs) -> Option<f64> {
    let t = inputs.indoor_temp_c?;
    let rh = inputs.indoor_humidity?;

    humidex(t, rh).map(|h| round_to(h, 2))
}

/// Humidex: temperature plus the vapor-pressure excess over 10 mb.
fn humidex(temp_c: f64, rel_hum: f64) -> Option<f64> {
    let vapor_pressure_mb = psychro::vapor_pressure_from_rel_hum(temp_c, rel_hum).ok()? * MB_PER_PA;
    Some(temp_c + HUMIDEX_VAPOR_PRESSURE_COEFF * (vapor_pressure_mb - HUMIDEX_BASE_VAPOR_PRESSURE_MB))
}

/// Round to a fixed number of decimals for presentation.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = pow(10.0, f64::from(decimals));
    round(value * factor) / factor
}
