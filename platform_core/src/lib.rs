//! # platform_core - Working Platform Thickness Engine
//!
//! `platform_core` sizes unreinforced granular working platforms for tracked
//! plant following BRE BR470. Given a track geometry, a bearing pressure and
//! the subgrade's undrained shear strength, it returns the required platform
//! thickness or the reason no thickness applies. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Total solver**: Every input yields a [`ThicknessResult`]; invalid input is a case, not a panic
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Auditable**: Every formula is listed in the [`equations`] registry
//!
//! ## Quick Start
//!
//! ```rust
//! use platform_core::calculations::{solve, PlatformCase, PlatformConfig};
//!
//! // 1 m × 1 m track, 150 kPa, φ = 50°, γ = 20 kN/m³
//! let config = PlatformConfig::new(1.0, 1.0, 150.0);
//!
//! let result = solve(10.0, &config);
//! assert_eq!(result.case, PlatformCase::WithinLimits);
//! assert!((result.thickness_m - 0.384).abs() < 1e-3);
//!
//! // Strong enough subgrade needs no platform
//! assert_eq!(solve(40.0, &config).case, PlatformCase::GroundStable);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Thickness solver and batch evaluation
//! - [`equations`] - Bearing formulas and the equation registry
//! - [`ranges`] - Value ranges for parameter sweeps
//! - [`scenario`] - Scenario container and metadata
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Scenario and report files with atomic saves

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod ranges;
pub mod scenario;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{solve, BatchEntry, PlatformCase, PlatformConfig, ThicknessResult};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_scenario, save_report, save_scenario, ResultsReport};
pub use ranges::{SoilRanges, ValueRange};
pub use scenario::{Scenario, ScenarioMetadata};
