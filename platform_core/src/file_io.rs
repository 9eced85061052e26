//! # File I/O Module
//!
//! Scenario and report files:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Two formats**: `.json` or `.toml`, chosen by extension
//! - **Validation**: Schema version, configuration and ranges are checked on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use platform_core::calculations::PlatformConfig;
//! use platform_core::file_io::{load_scenario, save_scenario};
//! use platform_core::scenario::Scenario;
//! use std::path::Path;
//!
//! let scenario = Scenario::new("Engineer", "25-001", "Piling rig pad", PlatformConfig::new(1.0, 1.0, 150.0));
//! let path = Path::new("pad.toml");
//!
//! save_scenario(&scenario, path).unwrap();
//! let loaded = load_scenario(path).unwrap();
//! assert_eq!(loaded.config, scenario.config);
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::batch::BatchEntry;
use crate::calculations::platform::PlatformConfig;
use crate::errors::{CalcError, CalcResult};
use crate::scenario::{Scenario, ScenarioMetadata, SCHEMA_VERSION};

/// On-disk format of a scenario file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Json,
    Toml,
}

impl ScenarioFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(ScenarioFormat::Json),
            Some("toml") => Ok(ScenarioFormat::Toml),
            _ => Err(CalcError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Evaluated entries together with the scenario they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsReport {
    /// When the report was produced
    pub generated: DateTime<Utc>,
    /// Metadata of the source scenario
    pub meta: ScenarioMetadata,
    /// Configuration the entries were evaluated with
    pub config: PlatformConfig,
    /// One entry per (φ, cu) pair
    pub entries: Vec<BatchEntry>,
}

impl ResultsReport {
    /// Bundle a scenario with its evaluated entries.
    pub fn new(scenario: &Scenario, entries: Vec<BatchEntry>) -> Self {
        ResultsReport {
            generated: Utc::now(),
            meta: scenario.meta.clone(),
            config: scenario.config,
            entries,
        }
    }
}

/// Write `contents` next to `path` as .tmp, sync it, then rename over `path`.
fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let tmp_path = path.with_extension(format!("{}.tmp", ext));

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Save a scenario with atomic write semantics.
///
/// The format follows the extension of `path` (`.json` or `.toml`).
///
/// # Example
///
/// ```rust,no_run
/// use platform_core::calculations::PlatformConfig;
/// use platform_core::file_io::save_scenario;
/// use platform_core::scenario::Scenario;
/// use std::path::Path;
///
/// let scenario = Scenario::new("Engineer", "25-001", "", PlatformConfig::new(1.0, 1.0, 150.0));
/// save_scenario(&scenario, Path::new("pad.json"))?;
/// # Ok::<(), platform_core::errors::CalcError>(())
/// ```
pub fn save_scenario(scenario: &Scenario, path: &Path) -> CalcResult<()> {
    let contents = match ScenarioFormat::from_path(path)? {
        ScenarioFormat::Json => serde_json::to_string_pretty(scenario)
            .map_err(|e| CalcError::serialization(e.to_string()))?,
        ScenarioFormat::Toml => {
            toml::to_string_pretty(scenario).map_err(|e| CalcError::serialization(e.to_string()))?
        }
    };

    write_atomic(path, &contents)?;
    info!(path = %path.display(), job_id = %scenario.meta.job_id, "saved scenario");
    Ok(())
}

/// Load and validate a scenario file.
///
/// # Returns
///
/// * `Ok(Scenario)` - Loaded scenario with a valid configuration and ranges
/// * `Err(CalcError::UnsupportedFormat)` - Extension is neither .json nor .toml
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Malformed file
/// * `Err(CalcError::InvalidInput)` - Configuration fails validation
/// * `Err(CalcError::InvalidRange)` - A range cannot be expanded
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_scenario(path: &Path) -> CalcResult<Scenario> {
    let format = ScenarioFormat::from_path(path)?;

    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let scenario: Scenario = match format {
        ScenarioFormat::Json => serde_json::from_str(&contents)
            .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?,
        ScenarioFormat::Toml => toml::from_str(&contents)
            .map_err(|e| CalcError::serialization(format!("Invalid TOML in {}: {}", path.display(), e)))?,
    };

    validate_version(&scenario.meta.version)?;
    scenario.config.validate()?;
    scenario.ranges.friction_angle_values()?;
    scenario.ranges.strength_values()?;

    debug!(config = ?scenario.config, "scenario configuration");
    info!(path = %path.display(), job_id = %scenario.meta.job_id, "loaded scenario");
    Ok(scenario)
}

/// Save a results report as pretty JSON (atomic).
///
/// `path` must end in `.json`; anything else is `UnsupportedFormat`.
pub fn save_report(report: &ResultsReport, path: &Path) -> CalcResult<()> {
    if ScenarioFormat::from_path(path)? != ScenarioFormat::Json {
        return Err(CalcError::UnsupportedFormat {
            path: path.display().to_string(),
        });
    }
    let json = serde_json::to_string_pretty(report).map_err(|e| CalcError::serialization(e.to_string()))?;
    write_atomic(path, &json)?;
    info!(path = %path.display(), entries = report.entries.len(), "saved results report");
    Ok(())
}

/// Load a results report written by [`save_report`].
pub fn load_report(path: &Path) -> CalcResult<ResultsReport> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let report: ResultsReport = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;
    validate_version(&report.meta.version)?;
    Ok(report)
}

/// Validate that a file version is compatible with the current schema.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.trim().parse().ok()).collect() };
    let (Some(file_parts), Some(current_parts)) = (parse(file_version), parse(SCHEMA_VERSION)) else {
        return Err(mismatch());
    };
    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // While at 0.x, a newer minor version may carry breaking changes
    if current_parts[0] == 0 {
        let file_minor = file_parts.get(1).copied().unwrap_or(0);
        let current_minor = current_parts.get(1).copied().unwrap_or(0);
        if file_minor > current_minor {
            return Err(mismatch());
        }
    }

    Ok(())
}
