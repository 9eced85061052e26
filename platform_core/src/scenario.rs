//! # Design Scenarios
//!
//! A `Scenario` bundles one platform configuration with the ranges of
//! friction angles and subgrade strengths to evaluate it over. Scenarios
//! serialize to JSON or TOML files (see [`file_io`](crate::file_io)).
//!
//! ## Structure
//!
//! ```text
//! Scenario
//! ├── meta: ScenarioMetadata (version, engineer, job, machine, timestamps)
//! ├── config: PlatformConfig (b, L1, γk, φk, qu, partial factors)
//! └── ranges: SoilRanges (friction angles, subgrade strengths)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use platform_core::calculations::PlatformConfig;
//! use platform_core::scenario::Scenario;
//!
//! let config = PlatformConfig::new(0.9, 4.5, 180.0);
//! let scenario = Scenario::new("Jane Engineer", "25-042", "Crawler crane pad", config);
//! let entries = scenario.evaluate().unwrap();
//! assert_eq!(entries.len(), 9);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::batch::{self, BatchEntry};
use crate::calculations::platform::PlatformConfig;
use crate::errors::CalcResult;
use crate::ranges::SoilRanges;

/// Current schema version for scenario files
pub const SCHEMA_VERSION: &str = "0.1.0";

fn current_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Root scenario container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario metadata
    pub meta: ScenarioMetadata,

    /// Platform configuration
    pub config: PlatformConfig,

    /// Values to sweep; defaults to φ {40, 45, 50}, cu {20, 30, 40}
    #[serde(default)]
    pub ranges: SoilRanges,
}

impl Scenario {
    /// Create a new scenario with the default soil ranges.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job number (e.g., "25-001")
    /// * `description` - Free-text description of the platform
    /// * `config` - Platform configuration
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        description: impl Into<String>,
        config: PlatformConfig,
    ) -> Self {
        let now = Utc::now();
        Scenario {
            meta: ScenarioMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                description: description.into(),
                machine: None,
                created: now,
                modified: now,
            },
            config,
            ranges: SoilRanges::default_ranges(),
        }
    }

    /// Replace the soil ranges
    pub fn with_ranges(mut self, ranges: SoilRanges) -> Self {
        self.ranges = ranges;
        self.touch();
        self
    }

    /// Name the machine this platform is designed for
    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.meta.machine = Some(machine.into());
        self.touch();
        self
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Evaluate the configuration over the scenario's ranges.
    ///
    /// Fails only when a range cannot be expanded; every (φ, cu) pair
    /// produces an entry.
    pub fn evaluate(&self) -> CalcResult<Vec<BatchEntry>> {
        let phi = self.ranges.friction_angle_values()?;
        let cu = self.ranges.strength_values()?;
        Ok(batch::evaluate(&self.config, &cu, &phi))
    }

    /// [`evaluate`](Self::evaluate) across the rayon thread pool.
    pub fn evaluate_parallel(&self) -> CalcResult<Vec<BatchEntry>> {
        let phi = self.ranges.friction_angle_values()?;
        let cu = self.ranges.strength_values()?;
        Ok(batch::evaluate_parallel(&self.config, &cu, &phi))
    }
}

/// Scenario metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    /// Schema version (for migration compatibility)
    #[serde(default = "current_version")]
    pub version: String,

    /// Name of the responsible engineer
    #[serde(default)]
    pub engineer: String,

    /// Job/project number
    #[serde(default)]
    pub job_id: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Machine the platform supports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,

    /// When the scenario was created
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,

    /// When the scenario was last modified
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::PlatformCase;
    use crate::ranges::ValueRange;

    fn test_scenario() -> Scenario {
        Scenario::new("Jane Engineer", "25-042", "Test pad", PlatformConfig::new(1.0, 1.0, 150.0))
    }

    #[test]
    fn test_scenario_creation() {
        let scenario = test_scenario();
        assert_eq!(scenario.meta.engineer, "Jane Engineer");
        assert_eq!(scenario.meta.version, SCHEMA_VERSION);
        assert_eq!(scenario.ranges, SoilRanges::default_ranges());
        assert!(scenario.meta.machine.is_none());
    }

    #[test]
    fn test_scenario_evaluate() {
        let entries = test_scenario().evaluate().unwrap();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[2].result.case, PlatformCase::GroundStable);
        assert_eq!(entries, test_scenario().evaluate_parallel().unwrap());
    }

    #[test]
    fn test_scenario_bad_range() {
        let scenario = test_scenario().with_ranges(SoilRanges {
            friction_angles: ValueRange::List(vec![]),
            subgrade_strengths: ValueRange::List(vec![20.0]),
        });
        assert!(scenario.evaluate().is_err());
    }

    #[test]
    fn test_scenario_serialization() {
        let scenario = test_scenario().with_machine("LR 1300");
        let json = serde_json::to_string_pretty(&scenario).unwrap();
        assert!(json.contains("LR 1300"));
        assert!(json.contains("\"b_m\": 1.0"));

        let roundtrip: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.machine.as_deref(), Some("LR 1300"));
        assert_eq!(roundtrip.config, scenario.config);
    }

    #[test]
    fn test_minimal_scenario_defaults() {
        let json = r#"{ "meta": {}, "config": { "b": 1.0, "L1": 2.0, "qu": 200 } }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.meta.version, SCHEMA_VERSION);
        assert_eq!(scenario.config.platform_gamma_k, 20.0);
        assert_eq!(scenario.ranges, SoilRanges::default_ranges());
    }
}
