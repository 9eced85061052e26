//! # BRE Bearing Capacity Formulas
//!
//! Closed-form equations of the BRE unreinforced working platform method.
//! A granular platform of thickness D spreads a track or outrigger pressure
//! onto a cohesive subgrade; the thickness is found algebraically, never by
//! iteration.
//!
//! ```text
//!            q (bearing pressure)
//!        ↓ ↓ ↓ ↓ ↓ ↓ ↓ ↓
//!      ┌─────── b ───────┐
//!  ════╧═════════════════╧════   ← platform surface
//!       \     φ, γ      /         D (platform thickness)
//!  ══════\═════════════/══════   ← subgrade surface
//!         cu (undrained)
//! ```
//!
//! ## Notation
//!
//! - `b`, `L1` = Loaded area width and length (m)
//! - `r` = Aspect ratio b/L1
//! - `φ` = Platform friction angle (degrees)
//! - `γ` = Platform unit weight (kN/m³)
//! - `cu` = Subgrade undrained shear strength (kPa)
//! - `Nc`, `Nγ` = Bearing capacity factors
//! - `sc`, `sγ`, `sp` = Shape factors
//! - `KpTanΔ` = Punching shear coefficient
//!
//! ## References
//!
//! - BRE BR470: Working platforms for tracked plant (2004)

use std::f64::consts::PI;

use crate::units::{Degrees, Radians};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Bearing capacity factor for undrained clay, Nc = 2 + π
pub const NC: f64 = 2.0 + PI;

/// Minimum constructible platform thickness (m)
pub const MIN_PLATFORM_THICKNESS_M: f64 = 0.3;

/// Maximum validated platform thickness as a multiple of b
pub const MAX_THICKNESS_RATIO: f64 = 1.5;

/// Lower bound of the friction angles the KpTanΔ curve was fitted to (degrees)
pub const FIT_RANGE_MIN_DEG: f64 = 20.0;

/// Upper bound of the friction angles the KpTanΔ curve was fitted to (degrees)
pub const FIT_RANGE_MAX_DEG: f64 = 55.0;

/// KpTanΔ curve fit: lower asymptote
pub const KP_A1: f64 = 2.20708;
/// KpTanΔ curve fit: upper asymptote
pub const KP_A2: f64 = 38.39484;
/// KpTanΔ curve fit: centre of the first logistic term (degrees)
pub const KP_LOG_X01: f64 = 40.54451;
/// KpTanΔ curve fit: centre of the second logistic term (degrees)
pub const KP_LOG_X02: f64 = 51.09954;
/// KpTanΔ curve fit: slope of the first logistic term
pub const KP_H1: f64 = 0.14165;
/// KpTanΔ curve fit: slope of the second logistic term
pub const KP_H2: f64 = 0.16232;
/// KpTanΔ curve fit: share of the span carried by the first term
pub const KP_P: f64 = 0.16927;

// =============================================================================
// SHAPE FACTORS
// =============================================================================

/// Shape factors for a rectangular loaded area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFactors {
    /// Aspect ratio r = b/L1
    pub aspect_ratio: f64,
    /// Cohesion shape factor sc = 1 + 0.2r
    pub sc: f64,
    /// Self-weight shape factor sγ = 1 - 0.3r
    pub s_gamma: f64,
    /// Punching shape factor sp = 1 + r
    pub sp: f64,
}

/// Calculate shape factors from the loaded area dimensions
///
/// # Formulas
/// - r = b / L1
/// - sc = 1 + 0.2r
/// - sγ = 1 - 0.3r
/// - sp = 1 + r
///
/// The caller guarantees `l1 != 0`.
#[inline]
pub fn shape_factors(b: f64, l1: f64) -> ShapeFactors {
    let r = b / l1;
    ShapeFactors {
        aspect_ratio: r,
        sc: 1.0 + 0.2 * r,
        s_gamma: 1.0 - 0.3 * r,
        sp: 1.0 + r,
    }
}

// =============================================================================
// BEARING CAPACITY FACTORS
// =============================================================================

/// Bearing capacity factor Nγ for a friction angle in degrees
///
/// # Formula
/// ```text
/// Nγ = 2·tan φ · (1 + e^(π·tan φ) · tan²(45° + φ/2))
/// ```
///
/// Strictly increasing on (0°, 90°) and unbounded as φ → 90°.
/// Nγ(0°) = 0.
#[inline]
pub fn n_gamma(phi_deg: f64) -> f64 {
    let phi = Degrees(phi_deg);
    let tan_phi = Radians::from(phi).tan();
    let wedge: Radians = (Degrees(45.0) + phi / 2.0).into();
    2.0 * tan_phi * (1.0 + (PI * tan_phi).exp() * wedge.tan().powi(2))
}

/// Punching shear coefficient KpTanΔ for a friction angle in degrees
///
/// Sum of two logistic terms fitted to the tabulated BRE curve:
///
/// ```text
/// span = A2 - A1
/// KpTanΔ = A1 + span·p / (1 + 10^((x01 - φ)·h1))
///             + span·(1-p) / (1 + 10^((x02 - φ)·h2))
/// ```
///
/// Continuous and strictly increasing. The fit is only validated between
/// [`FIT_RANGE_MIN_DEG`] and [`FIT_RANGE_MAX_DEG`]; outside that band the
/// value is an extrapolation (see [`in_fit_range`]).
#[inline]
pub fn kp_tan_delta(phi_deg: f64) -> f64 {
    let span = KP_A2 - KP_A1;
    let term1 = span * KP_P / (1.0 + 10f64.powf((KP_LOG_X01 - phi_deg) * KP_H1));
    let term2 = span * (1.0 - KP_P) / (1.0 + 10f64.powf((KP_LOG_X02 - phi_deg) * KP_H2));
    KP_A1 + term1 + term2
}

/// Whether a friction angle lies inside the band the KpTanΔ fit covers
#[inline]
pub fn in_fit_range(phi_deg: f64) -> bool {
    (FIT_RANGE_MIN_DEG..=FIT_RANGE_MAX_DEG).contains(&phi_deg)
}

// =============================================================================
// RESISTANCES AND DEMANDS
// =============================================================================

/// Design subgrade resistance without a platform, Rd = cu·Nc·sc (kPa)
#[inline]
pub fn subgrade_resistance(cu_kpa: f64, sc: f64) -> f64 {
    cu_kpa * NC * sc
}

/// Design bearing pressure, q_d = γ_factor·qu (kPa)
#[inline]
pub fn design_pressure(partial_factor: f64, qu_kpa: f64) -> f64 {
    partial_factor * qu_kpa
}

/// Bearing strength of the platform material itself (kPa)
///
/// # Formula
/// ```text
/// R_platform = 0.5 · γ · b · Nγ · sγ
/// ```
#[inline]
pub fn platform_strength(gamma_kn_m3: f64, b: f64, n_gamma: f64, s_gamma: f64) -> f64 {
    0.5 * gamma_kn_m3 * b * n_gamma * s_gamma
}

// =============================================================================
// THICKNESS
// =============================================================================

/// Required platform thickness D (m)
///
/// # Formula
/// ```text
/// D = sqrt( b·(q_dP - cu·Nc·sc) / (γ·KpTanΔ·sp) )
/// ```
///
/// When the numerator is not positive the subgrade alone carries the
/// factored demand and no root is needed; the result is then the minimum
/// thickness. The result is never below [`MIN_PLATFORM_THICKNESS_M`].
///
/// # Arguments
/// * `b` - Loaded area width (m)
/// * `q_dp` - Design pressure with platform (kPa)
/// * `rd` - Subgrade resistance cu·Nc·sc (kPa)
/// * `gamma_kn_m3` - Platform unit weight (kN/m³)
/// * `kp_tan_delta` - Punching shear coefficient
/// * `sp` - Punching shape factor
#[inline]
pub fn required_thickness(b: f64, q_dp: f64, rd: f64, gamma_kn_m3: f64, kp_tan_delta: f64, sp: f64) -> f64 {
    let numerator = b * (q_dp - rd);
    let denominator = gamma_kn_m3 * kp_tan_delta * sp;
    let d = if numerator > 0.0 {
        (numerator / denominator).sqrt()
    } else {
        MIN_PLATFORM_THICKNESS_M
    };
    d.max(MIN_PLATFORM_THICKNESS_M)
}

/// Largest thickness the method is validated for, 1.5·b (m)
#[inline]
pub fn max_allowed_thickness(b: f64) -> f64 {
    MAX_THICKNESS_RATIO * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_nc_constant() {
        assert_relative_eq!(NC, 5.141592653589793, epsilon = 1e-15);
    }

    #[test]
    fn test_shape_factors_square() {
        let sf = shape_factors(1.0, 1.0);
        assert_eq!(sf.aspect_ratio, 1.0);
        assert_relative_eq!(sf.sc, 1.2, epsilon = 1e-12);
        assert_relative_eq!(sf.s_gamma, 0.7, epsilon = 1e-12);
        assert_relative_eq!(sf.sp, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shape_factors_long_track() {
        // 0.9 m pad under a 4.5 m track: r = 0.2
        let sf = shape_factors(0.9, 4.5);
        assert_relative_eq!(sf.aspect_ratio, 0.2, epsilon = 1e-12);
        assert_relative_eq!(sf.sc, 1.04, epsilon = 1e-12);
        assert_relative_eq!(sf.s_gamma, 0.94, epsilon = 1e-12);
        assert_relative_eq!(sf.sp, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_n_gamma_zero() {
        assert_eq!(n_gamma(0.0), 0.0);
    }

    #[test]
    fn test_n_gamma_reference_values() {
        assert_relative_eq!(n_gamma(30.0), 22.402486271104557, max_relative = 1e-9);
        assert_relative_eq!(n_gamma(40.0), 109.41054727101564, max_relative = 1e-9);
        assert_relative_eq!(n_gamma(50.0), 762.8588729066776, max_relative = 1e-9);
    }

    #[test]
    fn test_kp_tan_delta_reference_values() {
        assert_relative_eq!(kp_tan_delta(50.0), 20.049744789251825, max_relative = 1e-9);
        assert_relative_eq!(kp_tan_delta(40.0), 5.465815735081686, max_relative = 1e-9);
        assert_relative_eq!(kp_tan_delta(20.0), 2.2148736234007105, max_relative = 1e-9);
    }

    #[test]
    fn test_kp_tan_delta_asymptotes() {
        // Approaches A1 at low angles and A2 at high angles
        assert!((kp_tan_delta(0.0) - KP_A1).abs() < 0.01);
        assert!((kp_tan_delta(89.9) - KP_A2).abs() < 0.01);
    }

    #[test]
    fn test_fit_range() {
        assert!(in_fit_range(20.0));
        assert!(in_fit_range(55.0));
        assert!(!in_fit_range(19.9));
        assert!(!in_fit_range(60.0));
    }

    #[test]
    fn test_required_thickness_formula() {
        // b=1, q_dP=180, cu=10 on a square pad, φ=50, γ=20
        let rd = subgrade_resistance(10.0, 1.2);
        let d = required_thickness(1.0, 180.0, rd, 20.0, kp_tan_delta(50.0), 2.0);
        assert_relative_eq!(d, 0.3840692899002142, max_relative = 1e-9);
    }

    #[test]
    fn test_required_thickness_floor() {
        // Numerator negative: subgrade already carries q_dP
        let d = required_thickness(1.0, 100.0, 150.0, 20.0, 20.0, 2.0);
        assert_eq!(d, MIN_PLATFORM_THICKNESS_M);
        // Positive but tiny root is clamped up
        let d = required_thickness(1.0, 100.1, 100.0, 20.0, 20.0, 2.0);
        assert_eq!(d, MIN_PLATFORM_THICKNESS_M);
    }

    #[test]
    fn test_max_allowed_thickness() {
        assert_relative_eq!(max_allowed_thickness(2.0), 3.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn test_n_gamma_strictly_increasing(phi in 0.5f64..85.0, delta in 0.01f64..4.0) {
            prop_assert!(n_gamma(phi + delta) > n_gamma(phi));
        }

        #[test]
        fn test_kp_tan_delta_strictly_increasing(phi in 0.5f64..85.0, delta in 0.01f64..4.0) {
            prop_assert!(kp_tan_delta(phi + delta) > kp_tan_delta(phi));
        }

        #[test]
        fn test_required_thickness_never_below_floor(
            b in 0.1f64..5.0,
            q_dp in 0.0f64..2000.0,
            rd in 0.0f64..2000.0,
            phi in 20.0f64..55.0,
        ) {
            let d = required_thickness(b, q_dp, rd, 20.0, kp_tan_delta(phi), 1.5);
            prop_assert!(d >= MIN_PLATFORM_THICKNESS_M);
        }
    }
}
