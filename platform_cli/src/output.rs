//! Result table and JSON output

use anyhow::{Context, Result};
use platform_core::calculations::BatchEntry;
use serde::Serialize;

const HEADER: [&str; 4] = ["phi (deg)", "cu (kPa)", "D1 (m)", "comment"];

/// One formatted table row
fn row(entry: &BatchEntry) -> [String; 4] {
    let thickness = match entry.result.thickness() {
        Some(t) => format!("{:.2}", t),
        None => "-".to_string(),
    };
    let mut comment = entry.result.diagnostic();
    if entry.result.outside_fit_range {
        comment.push_str(" (phi outside KpTanΔ fit range)");
    }
    [
        format!("{}", entry.platform_phi_k_deg),
        format!("{}", entry.subgrade_cu_k_kpa),
        thickness,
        comment,
    ]
}

/// Render entries as a plain text table.
pub fn render_table(entries: &[BatchEntry]) -> String {
    let rows: Vec<[String; 4]> = entries.iter().map(row).collect();

    let mut widths = HEADER.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let line = |cells: [&str; 4], out: &mut String| {
        out.push_str(&format!(
            "{:>w0$}  {:>w1$}  {:>w2$}  {}\n",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    };

    line(HEADER, &mut out);
    out.push_str(&format!(
        "{}\n",
        "-".repeat(widths.iter().sum::<usize>() + 6)
    ));
    for r in &rows {
        line([&r[0], &r[1], &r[2], &r[3]], &mut out);
    }
    out
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize results")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_core::calculations::{evaluate, PlatformConfig};

    #[test]
    fn test_table_rows() {
        let config = PlatformConfig::new(1.0, 1.0, 150.0);
        let table = render_table(&evaluate(&config, &[10.0, 40.0], &[50.0]));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("D1 (m)"));
        assert!(lines[2].contains("0.38"));
        assert!(lines[3].contains(" - "));
    }

    #[test]
    fn test_table_flags_fit_range() {
        let config = PlatformConfig::new(1.0, 1.0, 150.0);
        let table = render_table(&evaluate(&config, &[10.0], &[60.0]));
        assert!(table.contains("fit range"));
    }
}
