//! Print the equation reference

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use platform_core::equations::generate_equations_markdown;

/// Equations arguments
#[derive(Args)]
pub struct EquationsArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the equations command
pub fn execute(args: EquationsArgs) -> Result<()> {
    let markdown = generate_equations_markdown();
    match args.output {
        Some(path) => std::fs::write(&path, markdown)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", markdown),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_equations_written_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("EQUATIONS.md");

        execute(EquationsArgs {
            output: Some(path.clone()),
        })
        .unwrap();

        let markdown = std::fs::read_to_string(&path).unwrap();
        assert!(markdown.starts_with("# Groundwork Equations Reference"));
        assert!(markdown.contains("Shape Factors"));
    }

    #[test]
    fn test_equations_to_stdout() {
        assert!(execute(EquationsArgs { output: None }).is_ok());
    }
}
