//! The `okmatch match` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use okmatch_core::MatchBreakdown;

use crate::config::load_config_from;

/// JSON view of a match: the derived values next to the raw sums.
#[derive(Serialize)]
struct MatchOutput<'a> {
    score: f64,
    fraction_a: f64,
    fraction_b: f64,
    error_margin: f64,
    #[serde(flatten)]
    breakdown: &'a MatchBreakdown,
}

pub fn execute(
    a_path: PathBuf,
    b_path: PathBuf,
    format: Option<String>,
    breakdown: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = format.unwrap_or(config.format);

    let a = okmatch_core::load_answers(&a_path)?;
    let b = okmatch_core::load_answers(&b_path)?;

    let result = okmatch_core::compare(&a, &b);
    tracing::debug!(
        "{} vs {}: {} shared question(s)",
        a_path.display(),
        b_path.display(),
        result.shared_questions
    );

    match format.as_str() {
        "json" => {
            let output = MatchOutput {
                score: result.score(),
                fraction_a: result.fraction_a(),
                fraction_b: result.fraction_b(),
                error_margin: result.error_margin(),
                breakdown: &result,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            if breakdown {
                print_breakdown(&result, config.precision);
            }
            println!("{:.*}", config.precision, result.score());
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_breakdown(result: &MatchBreakdown, precision: usize) {
    use comfy_table::{Cell, Table};

    let mark = |accepted: bool| if accepted { "yes" } else { "no" };

    let mut table = Table::new();
    table.set_header(vec![
        "Question",
        "A importance",
        "A accepts B",
        "B importance",
        "B accepts A",
    ]);
    for s in &result.shared {
        table.add_row(vec![
            Cell::new(&s.prompt),
            Cell::new(s.a_importance),
            Cell::new(mark(s.a_accepts_b)),
            Cell::new(s.b_importance),
            Cell::new(mark(s.b_accepts_a)),
        ]);
    }

    println!("{table}");
    println!(
        "A satisfied: {}/{} ({:.*})",
        result.a_points,
        result.a_max,
        precision,
        result.fraction_a()
    );
    println!(
        "B satisfied: {}/{} ({:.*})",
        result.b_points,
        result.b_max,
        precision,
        result.fraction_b()
    );
    println!(
        "Shared questions: {} (error margin {:.*})",
        result.shared_questions,
        precision,
        result.error_margin()
    );
}
