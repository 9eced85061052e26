//! # Groundwork CLI
//!
//! Command line front end for the working platform thickness calculation.
//!
//! ```text
//! platform_cli solve --b 1.0 --l1 1.0 --qu 150 --phi 40 --phi 50 --cu 20 --cu 30
//! platform_cli sweep --scenario pad.toml --output results.json
//! platform_cli equations
//! ```

mod commands;
mod output;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Working platform thickness for tracked plant (BRE BR470)
#[derive(Parser)]
#[command(name = "platform_cli")]
#[command(author = "Groundwork Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Working platform thickness for tracked plant", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one configuration for the given strengths and friction angles
    Solve(commands::solve::SolveArgs),
    /// Evaluate a scenario file
    Sweep(commands::sweep::SweepArgs),
    /// Print the equation reference
    Equations(commands::equations::EquationsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args),
        Commands::Sweep(args) => commands::sweep::execute(args),
        Commands::Equations(args) => commands::equations::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        let cli = Cli::try_parse_from(["platform_cli", "--log-level", "debug", "equations"]).unwrap();
        assert_eq!(cli.log_level, Level::DEBUG);

        let cli = Cli::try_parse_from(["platform_cli", "equations"]).unwrap();
        assert_eq!(cli.log_level, Level::INFO);
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        assert!(Cli::try_parse_from(["platform_cli", "--log-level", "debgu", "equations"]).is_err());
    }

    #[test]
    fn test_solve_repeated_flags() {
        let cli = Cli::try_parse_from([
            "platform_cli", "solve", "--b", "1", "--l1", "1", "--qu", "150",
            "--phi", "40", "--phi", "50", "--cu", "20", "--cu", "30",
        ])
        .unwrap();
        match cli.command {
            Commands::Solve(args) => {
                assert_eq!(args.phi, vec![40.0, 50.0]);
                assert_eq!(args.cu, vec![20.0, 30.0]);
            }
            _ => panic!("expected solve"),
        }
    }
}
