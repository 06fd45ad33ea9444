//! Energy expenditure equations
//!
//! # References
//!
//! Weir, J. B. de V. (1949). New methods for calculating metabolic rate with special reference
//! to protein metabolism. *The Journal of Physiology*, 109(1-2), 1-9.
//!
//! Keytel, L. R., et al. (2005). Prediction of energy expenditure from heart rate monitoring
//! during submaximal exercise. *Journal of Sports Sciences*, 23(3), 289-297.

/// Kilocalories to kilojoules
const KCAL_TO_KJ: f64 = 4.186;

/// Energy expenditure from gas exchange (Weir), kJ/min
///
/// # Arguments
///
/// * `vo2` - Oxygen uptake in ml/min
/// * `vco2` - Carbon dioxide output in ml/min
pub fn weir_ee(vo2: f64, vco2: f64) -> f64 {
    (3.9 * vo2 / 1000.0 + 1.1 * vco2 / 1000.0) * KCAL_TO_KJ
}

/// Energy expenditure from heart rate (Keytel, VO2max model), kJ/min
///
/// # Arguments
///
/// * `sex` - 1.0 for male, 0.0 for female
/// * `age` - Age in years
/// * `weight` - Body weight in kg
/// * `vo2_max` - Maximum oxygen uptake in ml/kg/min
/// * `hr` - Heart rate in beats per minute
pub fn keytel_ee(sex: f64, age: f64, weight: f64, vo2_max: f64, hr: f64) -> f64 {
    let male = -36.3781 + 0.271 * age + 0.394 * weight + 0.404 * vo2_max + 0.634 * hr;
    let female = 0.274 * age + 0.103 * weight + 0.380 * vo2_max + 0.450 * hr;
    -59.3954 + sex * male + (1.0 - sex) * female
}
