//! Evaluate a scenario file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use platform_core::file_io::{load_scenario, save_report, ResultsReport};
use tracing::info;

use crate::output::{print_json, render_table};

/// Sweep arguments
#[derive(Args)]
pub struct SweepArgs {
    /// Scenario file (.json or .toml)
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Evaluate on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Write a JSON results report here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Run the sweep command
pub fn execute(args: SweepArgs) -> Result<()> {
    let scenario = load_scenario(&args.scenario)
        .with_context(|| format!("failed to load scenario {}", args.scenario.display()))?;

    let entries = if args.parallel {
        scenario.evaluate_parallel()?
    } else {
        scenario.evaluate()?
    };
    let buildable = entries.iter().filter(|e| e.result.has_thickness()).count();
    info!(entries = entries.len(), with_thickness = buildable, "scenario evaluated");

    if args.json {
        print_json(&entries)?;
    } else {
        if !scenario.meta.job_id.is_empty() || !scenario.meta.description.is_empty() {
            println!("{} {}", scenario.meta.job_id, scenario.meta.description);
        }
        if let Some(machine) = &scenario.meta.machine {
            println!("Machine: {}", machine);
        }
        print!("{}", render_table(&entries));
    }

    if let Some(path) = &args.output {
        let report = ResultsReport::new(&scenario, entries);
        save_report(&report, path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_core::calculations::PlatformConfig;
    use platform_core::file_io::{load_report, save_scenario};
    use platform_core::scenario::Scenario;
    use tempfile::tempdir;

    #[test]
    fn test_sweep_writes_report_in_order() {
        let dir = tempdir().unwrap();
        let scenario_path = dir.path().join("pad.toml");
        let report_path = dir.path().join("results.json");

        let scenario = Scenario::new("Engineer", "25-042", "Test pad", PlatformConfig::new(1.0, 1.0, 150.0))
            .with_machine("LR 1300");
        save_scenario(&scenario, &scenario_path).unwrap();

        execute(SweepArgs {
            scenario: scenario_path.clone(),
            parallel: true,
            output: Some(report_path.clone()),
            json: false,
        })
        .unwrap();

        let report = load_report(&report_path).unwrap();
        assert_eq!(report.meta.job_id, "25-042");
        assert_eq!(report.entries.len(), 9);
        let keys: Vec<(f64, f64)> = report
            .entries
            .iter()
            .map(|e| (e.platform_phi_k_deg, e.subgrade_cu_k_kpa))
            .collect();
        assert_eq!(keys[0], (40.0, 20.0));
        assert_eq!(keys[1], (40.0, 30.0));
        assert_eq!(keys[3], (45.0, 20.0));
        assert_eq!(keys[8], (50.0, 40.0));
    }

    #[test]
    fn test_sweep_json_without_report() {
        let dir = tempdir().unwrap();
        let scenario_path = dir.path().join("pad.json");
        let scenario = Scenario::new("Engineer", "25-043", "", PlatformConfig::new(1.0, 1.0, 150.0));
        save_scenario(&scenario, &scenario_path).unwrap();

        execute(SweepArgs {
            scenario: scenario_path,
            parallel: false,
            output: None,
            json: true,
        })
        .unwrap();
    }

    #[test]
    fn test_sweep_rejects_non_json_report() {
        let dir = tempdir().unwrap();
        let scenario_path = dir.path().join("pad.json");
        let report_path = dir.path().join("results.toml");
        let scenario = Scenario::new("Engineer", "25-044", "", PlatformConfig::new(1.0, 1.0, 150.0));
        save_scenario(&scenario, &scenario_path).unwrap();

        let result = execute(SweepArgs {
            scenario: scenario_path,
            parallel: false,
            output: Some(report_path.clone()),
            json: false,
        });
        assert!(result.is_err());
        assert!(!report_path.exists());
    }

    #[test]
    fn test_sweep_missing_scenario() {
        let dir = tempdir().unwrap();
        let result = execute(SweepArgs {
            scenario: dir.path().join("missing.json"),
            parallel: false,
            output: None,
            json: false,
        });
        assert!(result.is_err());
    }
}
