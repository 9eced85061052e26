//! Solve one platform configuration from the command line

use anyhow::{bail, Result};
use clap::Args;
use platform_core::calculations::{evaluate_tracked, BatchEntry, PlatformConfig};
use platform_core::equations::EquationTracker;
use serde::Serialize;
use tracing::{info, warn};

use crate::output::{print_json, render_table};

/// Solve arguments
#[derive(Args)]
pub struct SolveArgs {
    /// Track width b (m, or mm with --millimeters)
    #[arg(long)]
    pub b: f64,

    /// Track length L1 (m, or mm with --millimeters)
    #[arg(long)]
    pub l1: f64,

    /// Track bearing pressure qu (kPa)
    #[arg(long)]
    pub qu: f64,

    /// Platform friction angle (deg); repeat for several, defaults to 50
    #[arg(long, allow_negative_numbers = true)]
    pub phi: Vec<f64>,

    /// Subgrade undrained shear strength (kPa); repeat for several
    #[arg(long, required = true, allow_negative_numbers = true)]
    pub cu: Vec<f64>,

    /// Platform unit weight (kN/m³)
    #[arg(long)]
    pub gamma_k: Option<f64>,

    /// Partial factor on qu for the check without platform
    #[arg(long)]
    pub factor_no_platform: Option<f64>,

    /// Partial factor on qu for the check with platform
    #[arg(long)]
    pub factor_platform: Option<f64>,

    /// b and L1 are given in millimetres
    #[arg(long)]
    pub millimeters: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// List the equations used
    #[arg(long)]
    pub equations: bool,
}

#[derive(Serialize)]
struct SolveOutput<'a> {
    config: &'a PlatformConfig,
    entries: &'a [BatchEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    equations: Option<Vec<String>>,
}

impl SolveArgs {
    /// Build the configuration from the arguments
    pub fn config(&self) -> PlatformConfig {
        let mut config = if self.millimeters {
            PlatformConfig::from_millimeters(self.b, self.l1, self.qu)
        } else {
            PlatformConfig::new(self.b, self.l1, self.qu)
        };
        if let Some(gamma_k) = self.gamma_k {
            config = config.with_unit_weight(gamma_k);
        }
        if self.factor_no_platform.is_some() || self.factor_platform.is_some() {
            config = config.with_partial_factors(
                self.factor_no_platform.unwrap_or(config.gamma_no_platform),
                self.factor_platform.unwrap_or(config.gamma_platform),
            );
        }
        config
    }
}

/// Run the solve command
pub fn execute(args: SolveArgs) -> Result<()> {
    if args.cu.is_empty() {
        bail!("at least one --cu value is required");
    }

    let config = args.config();
    if let Err(e) = config.validate() {
        // The solver reports this per entry; keep going so the table shows it
        warn!("{}", e);
    }

    let phi_values = if args.phi.is_empty() {
        vec![config.platform_phi_k_deg]
    } else {
        args.phi.clone()
    };
    info!(
        b_m = config.b_m,
        l1_m = config.l1_m,
        qu_kpa = config.qu_kpa,
        "solving platform thickness"
    );

    let mut tracker = EquationTracker::new();
    let entries = evaluate_tracked(&config, &args.cu, &phi_values, &mut tracker);

    if args.json {
        let equations = args.equations.then(|| {
            tracker
                .unique_equations()
                .iter()
                .map(|eq| eq.metadata().name.to_string())
                .collect()
        });
        return print_json(&SolveOutput {
            config: &config,
            entries: &entries,
            equations,
        });
    }

    print!("{}", render_table(&entries));
    if args.equations {
        println!();
        println!("## Equations used");
        println!();
        print!("{}", tracker.summary_markdown());
    }
    Ok(())
}
