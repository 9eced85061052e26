//! # Unit Types
//!
//! Lightweight newtype wrappers for the metric units used at input
//! boundaries. The solver works in plain `f64` with unit-suffixed field
//! names; these types exist where conversions happen (machine data in
//! millimetres, friction angles in degrees).
//!
//! ## Units
//!
//! - Length: metres (m), millimetres (mm)
//! - Angle: degrees (°), radians (rad)
//! - Pressure and unit weight stay as `f64` in kPa and kN/m³
//!
//! ## Example
//!
//! ```rust
//! use platform_core::units::{Degrees, Meters, Millimeters, Radians};
//!
//! let track_width: Meters = Millimeters(850.0).into();
//! assert_eq!(track_width.0, 0.85);
//!
//! let phi: Radians = Degrees(180.0).into();
//! assert!((phi.0 - std::f64::consts::PI).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Radians {
    /// Tangent of the angle
    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeters_to_meters() {
        let m: Meters = Millimeters(1250.0).into();
        assert_eq!(m.0, 1.25);
        let back: Millimeters = m.into();
        assert_eq!(back.0, 1250.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(45.0).into();
        assert!((rad.tan() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_half_angle_arithmetic() {
        // 45° + φ/2 as used by the Nγ passive wedge term
        let phi = Degrees(50.0);
        let wedge = Degrees(45.0) + phi / 2.0;
        assert_eq!(wedge.value(), 70.0);
        assert_eq!((wedge - Degrees(10.0)).0, 60.0);
        assert_eq!((phi * 2.0).0, 100.0);
    }

    #[test]
    fn test_serialization() {
        let b = Meters(1.5);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "1.5");
        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(b, roundtrip);
    }
}
