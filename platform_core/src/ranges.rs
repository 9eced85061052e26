//! # Value Ranges
//!
//! Subgrade strengths and friction angles to sweep. A range is written in a
//! scenario file either as an explicit list, a stepped range, or a linear
//! range with a fixed count:
//!
//! ```json
//! { "friction_angles": [40, 45, 50],
//!   "subgrade_strengths": { "min": 20, "max": 60, "step": 5 } }
//! ```
//!
//! ```json
//! { "friction_angles": [50],
//!   "subgrade_strengths": { "start": 20, "end": 60, "count": 101 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Largest number of values a single range may expand to
pub const MAX_RANGE_VALUES: usize = 100_000;

/// Slack for floating point when deciding whether `max` is reached
const STEP_TOLERANCE: f64 = 1e-9;

/// A set of values given as a list or a generating rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueRange {
    /// Explicit values, used as given
    List(Vec<f64>),
    /// `min, min+step, …` up to and including `max`
    Stepped { min: f64, max: f64, step: f64 },
    /// `count` evenly spaced values from `start` to `end` inclusive
    Linear { start: f64, end: f64, count: usize },
}

impl ValueRange {
    /// Expand into the list of values.
    ///
    /// ```rust
    /// use platform_core::ranges::ValueRange;
    ///
    /// let range = ValueRange::Stepped { min: 20.0, max: 40.0, step: 10.0 };
    /// assert_eq!(range.values().unwrap(), vec![20.0, 30.0, 40.0]);
    /// ```
    pub fn values(&self) -> CalcResult<Vec<f64>> {
        let values = match self {
            ValueRange::List(values) => {
                if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                    return Err(CalcError::invalid_range(format!("value {} is not finite", bad)));
                }
                values.clone()
            }
            ValueRange::Stepped { min, max, step } => stepped(*min, *max, *step)?,
            ValueRange::Linear { start, end, count } => linear(*start, *end, *count)?,
        };

        if values.is_empty() {
            return Err(CalcError::invalid_range("range produces no values"));
        }
        Ok(values)
    }
}

fn stepped(min: f64, max: f64, step: f64) -> CalcResult<Vec<f64>> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) {
        return Err(CalcError::invalid_range("min, max and step must be finite"));
    }
    if step <= 0.0 {
        return Err(CalcError::invalid_range(format!("step must be positive (got {})", step)));
    }
    if max < min {
        return Err(CalcError::invalid_range(format!("max {} is below min {}", max, min)));
    }

    let intervals = ((max - min) / step + STEP_TOLERANCE).floor();
    if intervals >= MAX_RANGE_VALUES as f64 {
        return Err(CalcError::invalid_range(format!(
            "range expands to more than {} values",
            MAX_RANGE_VALUES
        )));
    }

    let n = intervals as usize;
    Ok((0..=n).map(|i| min + i as f64 * step).collect())
}

fn linear(start: f64, end: f64, count: usize) -> CalcResult<Vec<f64>> {
    if !(start.is_finite() && end.is_finite()) {
        return Err(CalcError::invalid_range("start and end must be finite"));
    }
    if count == 0 {
        return Err(CalcError::invalid_range("count must be at least 1"));
    }
    if count > MAX_RANGE_VALUES {
        return Err(CalcError::invalid_range(format!(
            "count {} exceeds {}",
            count, MAX_RANGE_VALUES
        )));
    }
    if count == 1 {
        return Ok(vec![start]);
    }

    let delta = (end - start) / (count - 1) as f64;
    Ok((0..count)
        .map(|i| if i == count - 1 { end } else { start + i as f64 * delta })
        .collect())
}

/// Friction angles and subgrade strengths to evaluate together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilRanges {
    /// Platform friction angles (degrees)
    pub friction_angles: ValueRange,
    /// Subgrade undrained shear strengths (kPa)
    pub subgrade_strengths: ValueRange,
}

impl SoilRanges {
    /// φ = 40, 45, 50°; cu = 20, 30, 40 kPa
    pub fn default_ranges() -> Self {
        SoilRanges {
            friction_angles: ValueRange::List(vec![40.0, 45.0, 50.0]),
            subgrade_strengths: ValueRange::List(vec![20.0, 30.0, 40.0]),
        }
    }

    /// φ = 50°; cu from 20 to 60 kPa in 101 steps
    pub fn machine_sweep() -> Self {
        SoilRanges {
            friction_angles: ValueRange::List(vec![50.0]),
            subgrade_strengths: ValueRange::Linear {
                start: 20.0,
                end: 60.0,
                count: 101,
            },
        }
    }

    /// Expanded friction angles
    pub fn friction_angle_values(&self) -> CalcResult<Vec<f64>> {
        self.friction_angles.values()
    }

    /// Expanded subgrade strengths
    pub fn strength_values(&self) -> CalcResult<Vec<f64>> {
        self.subgrade_strengths.values()
    }
}

impl Default for SoilRanges {
    fn default() -> Self {
        SoilRanges::default_ranges()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stepped_includes_max() {
        let values = ValueRange::Stepped { min: 20.0, max: 60.0, step: 5.0 }.values().unwrap();
        assert_eq!(values.len(), 9);
        assert_eq!(values[0], 20.0);
        assert_eq!(values[8], 60.0);
    }

    #[test]
    fn test_stepped_stops_before_overshoot() {
        let values = ValueRange::Stepped { min: 20.0, max: 40.0, step: 3.0 }.values().unwrap();
        assert_eq!(values, vec![20.0, 23.0, 26.0, 29.0, 32.0, 35.0, 38.0]);
    }

    #[test]
    fn test_stepped_fractional_step_no_drift() {
        let values = ValueRange::Stepped { min: 0.0, max: 1.0, step: 0.1 }.values().unwrap();
        assert_eq!(values.len(), 11);
        assert_relative_eq!(values[10], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stepped_errors() {
        assert!(ValueRange::Stepped { min: 0.0, max: 1.0, step: 0.0 }.values().is_err());
        assert!(ValueRange::Stepped { min: 2.0, max: 1.0, step: 0.5 }.values().is_err());
        assert!(ValueRange::Stepped { min: 0.0, max: 1e9, step: 1.0 }.values().is_err());
        let err = ValueRange::Stepped { min: 0.0, max: f64::NAN, step: 1.0 }.values().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RANGE");
    }

    #[test]
    fn test_linear_machine_sweep() {
        let values = SoilRanges::machine_sweep().strength_values().unwrap();
        assert_eq!(values.len(), 101);
        assert_eq!(values[0], 20.0);
        assert_relative_eq!(values[1], 20.4, epsilon = 1e-12);
        assert_eq!(values[100], 60.0);
    }

    #[test]
    fn test_linear_single_and_zero() {
        assert_eq!(ValueRange::Linear { start: 5.0, end: 9.0, count: 1 }.values().unwrap(), vec![5.0]);
        assert!(ValueRange::Linear { start: 5.0, end: 9.0, count: 0 }.values().is_err());
    }

    #[test]
    fn test_list_validation() {
        assert!(ValueRange::List(vec![]).values().is_err());
        assert!(ValueRange::List(vec![1.0, f64::INFINITY]).values().is_err());
        assert_eq!(ValueRange::List(vec![3.0, 1.0]).values().unwrap(), vec![3.0, 1.0]);
    }

    #[test]
    fn test_default_ranges() {
        let ranges = SoilRanges::default();
        assert_eq!(ranges.friction_angle_values().unwrap(), vec![40.0, 45.0, 50.0]);
        assert_eq!(ranges.strength_values().unwrap(), vec![20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_untagged_deserialization() {
        let json = r#"{
            "friction_angles": [40, 45],
            "subgrade_strengths": { "min": 20, "max": 30, "step": 5 }
        }"#;
        let ranges: SoilRanges = serde_json::from_str(json).unwrap();
        assert_eq!(ranges.friction_angles, ValueRange::List(vec![40.0, 45.0]));
        assert_eq!(ranges.strength_values().unwrap(), vec![20.0, 25.0, 30.0]);

        let json = r#"{
            "friction_angles": [50],
            "subgrade_strengths": { "start": 20, "end": 60, "count": 101 }
        }"#;
        let ranges: SoilRanges = serde_json::from_str(json).unwrap();
        assert_eq!(ranges, SoilRanges::machine_sweep());
    }
}
