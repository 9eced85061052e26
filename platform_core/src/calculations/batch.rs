//! # Batch Evaluation
//!
//! Maps the thickness solver over many inputs. Every entry is independent;
//! no aggregation, filtering or deduplication happens here.
//!
//! Order is φ outer, cu inner:
//!
//! ```text
//! φ1: cu1, cu2, cu3
//! φ2: cu1, cu2, cu3
//! ```
//!
//! ## Example
//!
//! ```rust
//! use platform_core::calculations::batch::evaluate;
//! use platform_core::calculations::platform::PlatformConfig;
//!
//! let config = PlatformConfig::new(1.0, 1.0, 150.0);
//! let entries = evaluate(&config, &[20.0, 30.0, 40.0], &[40.0, 45.0, 50.0]);
//!
//! assert_eq!(entries.len(), 9);
//! assert_eq!(entries[1].platform_phi_k_deg, 40.0);
//! assert_eq!(entries[1].subgrade_cu_k_kpa, 30.0);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::platform::{solve, solve_tracked, PlatformConfig, ThicknessResult};
use crate::equations::registry::EquationTracker;

/// One (φ, cu) pair and its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Platform friction angle used for this entry (degrees)
    pub platform_phi_k_deg: f64,
    /// Subgrade undrained shear strength (kPa)
    pub subgrade_cu_k_kpa: f64,
    /// Solver result
    pub result: ThicknessResult,
}

/// φ outer, cu inner
fn pairs<'a>(cu_k_values: &'a [f64], phi_values: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    phi_values
        .iter()
        .flat_map(move |&phi| cu_k_values.iter().map(move |&cu| (phi, cu)))
}

fn evaluate_pair(config: &PlatformConfig, phi: f64, cu: f64, tracker: Option<&mut EquationTracker>) -> BatchEntry {
    let cfg = config.with_friction_angle(phi);
    let result = match tracker {
        Some(tracker) => solve_tracked(cu, &cfg, tracker),
        None => solve(cu, &cfg),
    };
    BatchEntry {
        platform_phi_k_deg: phi,
        subgrade_cu_k_kpa: cu,
        result,
    }
}

/// Evaluate every (φ, cu) pair of the cross product.
///
/// The configuration's own `platform_phi_k_deg` is ignored; each φ in
/// `phi_values` is applied to a fresh copy. The output has
/// `phi_values.len() * cu_k_values.len()` entries, φ outer and cu inner.
pub fn evaluate(config: &PlatformConfig, cu_k_values: &[f64], phi_values: &[f64]) -> Vec<BatchEntry> {
    info!(
        friction_angles = phi_values.len(),
        strengths = cu_k_values.len(),
        "evaluating platform thickness batch"
    );
    pairs(cu_k_values, phi_values)
        .map(|(phi, cu)| evaluate_pair(config, phi, cu, None))
        .collect()
}

/// [`evaluate`], recording every equation reached in `tracker`.
pub fn evaluate_tracked(
    config: &PlatformConfig,
    cu_k_values: &[f64],
    phi_values: &[f64],
    tracker: &mut EquationTracker,
) -> Vec<BatchEntry> {
    info!(
        friction_angles = phi_values.len(),
        strengths = cu_k_values.len(),
        "evaluating platform thickness batch with equation tracking"
    );
    pairs(cu_k_values, phi_values)
        .map(|(phi, cu)| evaluate_pair(config, phi, cu, Some(&mut *tracker)))
        .collect()
}

/// [`evaluate`] across the rayon thread pool.
///
/// Returns the same entries in the same order as [`evaluate`].
pub fn evaluate_parallel(config: &PlatformConfig, cu_k_values: &[f64], phi_values: &[f64]) -> Vec<BatchEntry> {
    info!(
        friction_angles = phi_values.len(),
        strengths = cu_k_values.len(),
        threads = rayon::current_num_threads(),
        "evaluating platform thickness batch in parallel"
    );
    pairs(cu_k_values, phi_values)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(phi, cu)| evaluate_pair(config, phi, cu, None))
        .collect()
}

/// Evaluate a list of strengths at the configuration's own friction angle.
pub fn evaluate_strengths(config: &PlatformConfig, cu_k_values: &[f64]) -> Vec<ThicknessResult> {
    cu_k_values.iter().map(|&cu| solve(cu, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::platform::PlatformCase;
    use crate::equations::registry::Equation;
    use proptest::prelude::*;

    fn test_config() -> PlatformConfig {
        PlatformConfig::new(1.0, 1.0, 150.0)
    }

    #[test]
    fn test_order_phi_outer_cu_inner() {
        let entries = evaluate(&test_config(), &[20.0, 30.0, 40.0], &[40.0, 45.0, 50.0]);
        let keys: Vec<(f64, f64)> = entries
            .iter()
            .map(|e| (e.platform_phi_k_deg, e.subgrade_cu_k_kpa))
            .collect();
        assert_eq!(
            keys,
            vec![
                (40.0, 20.0), (40.0, 30.0), (40.0, 40.0),
                (45.0, 20.0), (45.0, 30.0), (45.0, 40.0),
                (50.0, 20.0), (50.0, 30.0), (50.0, 40.0),
            ]
        );
    }

    #[test]
    fn test_default_ranges_reference_results() {
        let entries = evaluate(&test_config(), &[20.0, 30.0, 40.0], &[40.0, 45.0, 50.0]);

        // cu = 40 carries 150 kPa without a platform at every φ
        for entry in entries.iter().filter(|e| e.subgrade_cu_k_kpa == 40.0) {
            assert_eq!(entry.result.case, PlatformCase::GroundStable);
        }

        assert!((entries[0].result.thickness_m - 0.5088).abs() < 1e-4);
        assert!((entries[3].result.thickness_m - 0.3769).abs() < 1e-4);
        assert_eq!(entries[6].result.thickness_m, 0.3);
    }

    #[test]
    fn test_override_does_not_touch_config() {
        let config = test_config();
        let entries = evaluate(&config, &[10.0], &[35.0]);
        assert_eq!(config.platform_phi_k_deg, 50.0);
        assert_eq!(entries[0].platform_phi_k_deg, 35.0);
        // Same as solving directly at 35°
        assert_eq!(entries[0].result, solve(10.0, &config.with_friction_angle(35.0)));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(evaluate(&test_config(), &[], &[40.0]).is_empty());
        assert!(evaluate(&test_config(), &[20.0], &[]).is_empty());
        assert!(evaluate_parallel(&test_config(), &[], &[]).is_empty());
    }

    #[test]
    fn test_invalid_config_does_not_abort() {
        let config = PlatformConfig { l1_m: 0.0, ..test_config() };
        let entries = evaluate(&config, &[10.0, 20.0], &[45.0, 50.0]);
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.result.diagnostic() == "L1 cannot be zero"));
    }

    #[test]
    fn test_tracked_matches_untracked() {
        let mut tracker = EquationTracker::new();
        let tracked = evaluate_tracked(&test_config(), &[10.0, 40.0], &[45.0, 50.0], &mut tracker);
        assert_eq!(tracked, evaluate(&test_config(), &[10.0, 40.0], &[45.0, 50.0]));

        let used = tracker.unique_equations();
        assert!(used.contains(&Equation::RequiredThickness));
        assert!(used.contains(&Equation::SubgradeResistance));
    }

    #[test]
    fn test_strength_sweep() {
        let results = evaluate_strengths(&test_config(), &[10.0, 30.0, 40.0]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].case, PlatformCase::GroundStable);
        assert_eq!(results[0], solve(10.0, &test_config()));
    }

    proptest! {
        #[test]
        fn test_batch_idempotent_and_parallel_identical(
            cu in proptest::collection::vec(0.0f64..100.0, 0..12),
            phi in proptest::collection::vec(20.0f64..55.0, 0..6),
            qu in 50.0f64..800.0,
        ) {
            let config = PlatformConfig::new(1.2, 3.0, qu);
            let first = evaluate(&config, &cu, &phi);
            let second = evaluate(&config, &cu, &phi);
            prop_assert_eq!(first.len(), cu.len() * phi.len());
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&first, &evaluate_parallel(&config, &cu, &phi));
        }
    }
}
