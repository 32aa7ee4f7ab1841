//! Psychrometric Primitives (SI)
//!
//! ## Physics Background
//!
//! Everything the derivation pipeline needs reduces to one curve: the
//! saturation pressure of water vapor over a flat surface of ice or liquid
//! water as a function of temperature. Relative humidity, dew point,
//! humidity ratio and specific humidity are all ratios or inversions of
//! points on that curve:
//!
//! ```text
//! RH      = pv / pws(T)                  (fraction of saturation)
//! Td      = pws⁻¹(pv)                    (temperature where pv saturates)
//! W       = 0.621945 · pv / (P − pv)     (kg water per kg dry air)
//! q       = W / (1 + W)                  (kg water per kg moist air)
//! ```
//!
//! ## Formulation
//!
//! The saturation curve is the Hyland–Wexler correlation of the ASHRAE
//! Handbook - Fundamentals (2017), Chapter 1, equations 5 (over ice, below
//! the triple point) and 6 (over liquid water). The dew point is recovered
//! from a vapor pressure by Newton iteration on the log of that curve with
//! its analytic derivative - the same scheme the reference psychrometric
//! libraries use - converging to 0.001 °C in a handful of steps.
//!
//! ## Conventions
//!
//! - Temperatures in °C at the API, Kelvin internally
//! - Pressures in Pa, relative humidity as a fraction [0, 1]
//! - Inputs outside a correlation's validity region are errors, not clamps;
//!   callers decide whether that means "unknown" (see [`crate::pipeline`])
//! - All transcendental math goes through `libm`, keeping the module
//!   available without `std`

use libm::{exp, fabs, log as ln, pow};

use crate::constants::physics::{
    DEW_POINT_MAX_ITERATIONS, DEW_POINT_TOLERANCE_C, KELVIN_OFFSET, MIN_HUM_RATIO,
    PSYCHRO_TEMP_MAX_C, PSYCHRO_TEMP_MIN_C, STANDARD_ATMOSPHERE_PA, TRIPLE_POINT_WATER_C,
    WATER_AIR_MOLAR_MASS_RATIO,
};
use crate::errors::{PsychroError, PsychroResult};

// Hyland-Wexler coefficients, saturation over ice (ASHRAE 2017 ch. 1 eq. 5)
const ICE_C1: f64 = -5.674_535_9e3;
const ICE_C2: f64 = 6.392_524_7;
const ICE_C3: f64 = -9.677_843e-3;
const ICE_C4: f64 = 6.221_570_1e-7;
const ICE_C5: f64 = 2.074_782_5e-9;
const ICE_C6: f64 = -9.484_024e-13;
const ICE_C7: f64 = 4.163_501_9;

// Hyland-Wexler coefficients, saturation over liquid water (eq. 6)
const WATER_C8: f64 = -5.800_220_6e3;
const WATER_C9: f64 = 1.391_499_3;
const WATER_C10: f64 = -4.864_023_9e-2;
const WATER_C11: f64 = 4.176_476_8e-5;
const WATER_C12: f64 = -1.445_209_3e-8;
const WATER_C13: f64 = 6.545_967_3;

// Standard-atmosphere model (ASHRAE 2017 ch. 1 eq. 3)
const STD_ATM_LAPSE_PER_M: f64 = 2.255_77e-5;
const STD_ATM_EXPONENT: f64 = 5.2559;

fn check_temperature(t_celsius: f64) -> PsychroResult<()> {
    if t_celsius < PSYCHRO_TEMP_MIN_C || t_celsius > PSYCHRO_TEMP_MAX_C {
        return Err(PsychroError::TemperatureOutOfBounds {
            value: t_celsius,
            min: PSYCHRO_TEMP_MIN_C,
            max: PSYCHRO_TEMP_MAX_C,
        });
    }
    Ok(())
}

/// Saturation pressure of water vapor at a dry-bulb temperature (Pa).
///
/// Uses the over-ice correlation at and below the triple point, the
/// over-water correlation above it. Valid for [-100, 200] °C.
pub fn saturation_vapor_pressure(t_celsius: f64) -> PsychroResult<f64> {
    check_temperature(t_celsius)?;

    let t = t_celsius + KELVIN_OFFSET;
    let ln_pws = if t_celsius <= TRIPLE_POINT_WATER_C {
        ICE_C1 / t
            + ICE_C2
            + t * (ICE_C3 + t * (ICE_C4 + t * (ICE_C5 + t * ICE_C6)))
            + ICE_C7 * ln(t)
    } else {
        WATER_C8 / t
            + WATER_C9
            + t * (WATER_C10 + t * (WATER_C11 + t * WATER_C12))
            + WATER_C13 * ln(t)
    };

    Ok(exp(ln_pws))
}

/// Analytic derivative of ln(pws) with respect to temperature (1/K).
///
/// Drives the Newton step of the dew-point solve.
fn d_ln_saturation_vapor_pressure(t_celsius: f64) -> f64 {
    let t = t_celsius + KELVIN_OFFSET;
    if t_celsius <= TRIPLE_POINT_WATER_C {
        -ICE_C1 / (t * t)
            + ICE_C3
            + 2.0 * ICE_C4 * t
            + 3.0 * ICE_C5 * t * t
            + 4.0 * ICE_C6 * t * t * t
            + ICE_C7 / t
    } else {
        -WATER_C8 / (t * t)
            + WATER_C10
            + 2.0 * WATER_C11 * t
            + 3.0 * WATER_C12 * t * t
            + WATER_C13 / t
    }
}

/// Partial pressure of water vapor from dry-bulb temperature and RH (Pa).
pub fn vapor_pressure_from_rel_hum(t_celsius: f64, rel_hum: f64) -> PsychroResult<f64> {
    if !(0.0..=1.0).contains(&rel_hum) {
        return Err(PsychroError::HumidityOutOfBounds(rel_hum));
    }
    Ok(rel_hum * saturation_vapor_pressure(t_celsius)?)
}

/// Dew point from dry-bulb temperature and vapor pressure (°C).
///
/// Inverts the saturation curve by Newton iteration on ln(pws), starting
/// from the dry-bulb temperature. The result is capped at the dry bulb:
/// a vapor pressure at or above saturation means the air is condensing,
/// and the dew point cannot exceed the air temperature.
pub fn dew_point_from_vapor_pressure(
    t_dry_bulb_c: f64,
    vapor_pressure_pa: f64,
) -> PsychroResult<f64> {
    check_temperature(t_dry_bulb_c)?;
    if vapor_pressure_pa <= 0.0 {
        return Err(PsychroError::VaporPressureOutOfBounds(vapor_pressure_pa));
    }

    let ln_vp = ln(vapor_pressure_pa);
    let mut t_dew = t_dry_bulb_c;

    for _ in 0..DEW_POINT_MAX_ITERATIONS {
        let t_iter = t_dew;
        let ln_vp_iter = ln(saturation_vapor_pressure(t_iter)?);

        // Newton step on the log curve
        t_dew = t_iter - (ln_vp_iter - ln_vp) / d_ln_saturation_vapor_pressure(t_iter);
        t_dew = t_dew.clamp(PSYCHRO_TEMP_MIN_C, PSYCHRO_TEMP_MAX_C);

        if fabs(t_dew - t_iter) <= DEW_POINT_TOLERANCE_C {
            return Ok(t_dew.min(t_dry_bulb_c));
        }
    }

    Err(PsychroError::NonConvergence)
}

/// Dew point from dry-bulb temperature and relative humidity (°C).
pub fn dew_point_from_rel_hum(t_celsius: f64, rel_hum: f64) -> PsychroResult<f64> {
    let vapor_pressure = vapor_pressure_from_rel_hum(t_celsius, rel_hum)?;
    dew_point_from_vapor_pressure(t_celsius, vapor_pressure)
}

/// Relative humidity at a dry-bulb temperature consistent with a dew point.
///
/// Returns a fraction [0, 1]. The dew point must not exceed the dry bulb.
pub fn rel_hum_from_dew_point(t_celsius: f64, t_dew_point_c: f64) -> PsychroResult<f64> {
    if t_dew_point_c > t_celsius {
        return Err(PsychroError::DewPointAboveDryBulb {
            dew_point: t_dew_point_c,
            dry_bulb: t_celsius,
        });
    }
    let vapor_pressure = saturation_vapor_pressure(t_dew_point_c)?;
    let saturation_pressure = saturation_vapor_pressure(t_celsius)?;
    Ok(vapor_pressure / saturation_pressure)
}

/// Humidity ratio from vapor pressure and total pressure (kg water / kg dry air).
pub fn hum_ratio_from_vapor_pressure(
    vapor_pressure_pa: f64,
    pressure_pa: f64,
) -> PsychroResult<f64> {
    if vapor_pressure_pa < 0.0 {
        return Err(PsychroError::VaporPressureOutOfBounds(vapor_pressure_pa));
    }
    let hum_ratio =
        WATER_AIR_MOLAR_MASS_RATIO * vapor_pressure_pa / (pressure_pa - vapor_pressure_pa);
    Ok(hum_ratio.max(MIN_HUM_RATIO))
}

/// Humidity ratio of saturated air at a dew point and total pressure.
pub fn hum_ratio_from_dew_point(t_dew_point_c: f64, pressure_pa: f64) -> PsychroResult<f64> {
    let vapor_pressure = saturation_vapor_pressure(t_dew_point_c)?;
    hum_ratio_from_vapor_pressure(vapor_pressure, pressure_pa)
}

/// Humidity ratio from dry-bulb temperature, RH and total pressure.
pub fn hum_ratio_from_rel_hum(
    t_celsius: f64,
    rel_hum: f64,
    pressure_pa: f64,
) -> PsychroResult<f64> {
    let vapor_pressure = vapor_pressure_from_rel_hum(t_celsius, rel_hum)?;
    hum_ratio_from_vapor_pressure(vapor_pressure, pressure_pa)
}

/// Relative humidity from dry-bulb temperature, humidity ratio and pressure.
///
/// Returns a fraction; values above 1 mean the requested moisture content
/// exceeds saturation at this temperature (callers clamp and log).
pub fn rel_hum_from_hum_ratio(
    t_celsius: f64,
    hum_ratio: f64,
    pressure_pa: f64,
) -> PsychroResult<f64> {
    if hum_ratio < 0.0 {
        return Err(PsychroError::HumidityRatioOutOfBounds(hum_ratio));
    }
    let bounded = hum_ratio.max(MIN_HUM_RATIO);
    let vapor_pressure =
        pressure_pa * bounded / (WATER_AIR_MOLAR_MASS_RATIO + bounded);
    Ok(vapor_pressure / saturation_vapor_pressure(t_celsius)?)
}

/// Specific humidity from humidity ratio (kg water / kg moist air).
pub fn specific_hum_from_hum_ratio(hum_ratio: f64) -> PsychroResult<f64> {
    if hum_ratio < 0.0 {
        return Err(PsychroError::HumidityRatioOutOfBounds(hum_ratio));
    }
    let bounded = hum_ratio.max(MIN_HUM_RATIO);
    Ok(bounded / (1.0 + bounded))
}

/// Humidity ratio from specific humidity.
pub fn hum_ratio_from_specific_hum(specific_hum: f64) -> PsychroResult<f64> {
    if specific_hum < 0.0 || specific_hum >= 1.0 {
        return Err(PsychroError::SpecificHumidityOutOfBounds(specific_hum));
    }
    let bounded = specific_hum.max(MIN_HUM_RATIO);
    Ok(bounded / (1.0 - bounded))
}

/// Standard-atmosphere pressure at a site elevation (Pa).
///
/// Monotonically decreasing in elevation; 101325 Pa at sea level.
pub fn standard_atmosphere_pressure(elevation_m: f64) -> f64 {
    STANDARD_ATMOSPHERE_PA * pow(1.0 - STD_ATM_LAPSE_PER_M * elevation_m, STD_ATM_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_pressure_reference_points() {
        // Pinned against the reference psychrometric library (SI):
        // 2339 Pa at 20°C, 611 Pa at the freezing point, 103 Pa at -20°C
        assert!((saturation_vapor_pressure(20.0).unwrap() - 2339.0).abs() < 5.0);
        assert!((saturation_vapor_pressure(0.0).unwrap() - 611.0).abs() < 2.0);
        assert!((saturation_vapor_pressure(-20.0).unwrap() - 103.0).abs() < 2.0);
    }

    #[test]
    fn saturation_pressure_bounds() {
        assert!(saturation_vapor_pressure(-150.0).is_err());
        assert!(saturation_vapor_pressure(250.0).is_err());
    }

    #[test]
    fn dew_point_reference_points() {
        // 21°C at 45% RH sits near 8.6°C; 25°C at 50% near 13.9°C
        let dp = dew_point_from_rel_hum(21.0, 0.45).unwrap();
        assert!((dp - 8.6).abs() < 0.2, "dew point {dp}");

        let dp = dew_point_from_rel_hum(25.0, 0.50).unwrap();
        assert!((dp - 13.9).abs() < 0.2, "dew point {dp}");
    }

    #[test]
    fn dew_point_saturated_air_equals_dry_bulb() {
        let dp = dew_point_from_rel_hum(15.0, 1.0).unwrap();
        assert!((dp - 15.0).abs() < 0.01);
    }

    #[test]
    fn dew_point_rejects_dry_air() {
        assert!(matches!(
            dew_point_from_rel_hum(20.0, 0.0),
            Err(PsychroError::VaporPressureOutOfBounds(_))
        ));
    }

    #[test]
    fn rel_hum_round_trip() {
        for &(t, rh) in &[(21.0, 0.45), (5.0, 0.80), (-5.0, 0.30), (30.0, 0.65)] {
            let dp = dew_point_from_rel_hum(t, rh).unwrap();
            let back = rel_hum_from_dew_point(t, dp).unwrap();
            assert!((back - rh).abs() < 0.005, "({t}, {rh}) -> {dp} -> {back}");
        }
    }

    #[test]
    fn rel_hum_rejects_impossible_dew_point() {
        assert!(matches!(
            rel_hum_from_dew_point(10.0, 12.0),
            Err(PsychroError::DewPointAboveDryBulb { .. })
        ));
    }

    #[test]
    fn humidity_ratio_reference_point() {
        // 21°C, 45% RH at one atmosphere: W ≈ 0.00695 kg/kg
        let w = hum_ratio_from_rel_hum(21.0, 0.45, STANDARD_ATMOSPHERE_PA).unwrap();
        assert!((w - 0.006_95).abs() < 1e-4, "humidity ratio {w}");
    }

    #[test]
    fn humidity_ratio_floor() {
        let w = hum_ratio_from_vapor_pressure(0.0, STANDARD_ATMOSPHERE_PA).unwrap();
        assert_eq!(w, MIN_HUM_RATIO);
    }

    #[test]
    fn specific_humidity_round_trip() {
        let w = 0.007;
        let q = specific_hum_from_hum_ratio(w).unwrap();
        assert!(q < w); // moist-air denominator is larger
        let back = hum_ratio_from_specific_hum(q).unwrap();
        assert!((back - w).abs() < 1e-12);
    }

    #[test]
    fn standard_atmosphere_reference_points() {
        assert_eq!(standard_atmosphere_pressure(0.0), STANDARD_ATMOSPHERE_PA);
        // ISA: ~89875 Pa at 1000 m
        assert!((standard_atmosphere_pressure(1000.0) - 89_875.0).abs() < 100.0);
    }

    #[test]
    fn standard_atmosphere_monotonic() {
        let mut previous = standard_atmosphere_pressure(-400.0);
        for step in 0..20 {
            let pressure = standard_atmosphere_pressure(-400.0 + 250.0 * f64::from(step + 1));
            assert!(pressure < previous);
            previous = pressure;
        }
    }
}
