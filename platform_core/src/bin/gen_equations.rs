//! Generate EQUATIONS.md from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations
//! ```
//!
//! The generated file is written to `platform_core/src/equations/EQUATIONS.md`.

use std::fs;
use std::path::Path;

use platform_core::equations::{generate_equations_markdown, ALL_EQUATIONS};

fn main() {
    println!("Generating EQUATIONS.md...");

    let markdown = generate_equations_markdown();

    // Relative to workspace root
    let output_path = Path::new("platform_core/src/equations/EQUATIONS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!(
                "Wrote {} equations ({} bytes) to {}",
                ALL_EQUATIONS.len(),
                markdown.len(),
                output_path.display()
            );
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            std::process::exit(1);
        }
    }
}
