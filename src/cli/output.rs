//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cli::args::{EmendArgs, OutputFormat};
use crate::document::Correction;
use crate::error::Result;
use crate::stats::EvaluationReport;

/// Result structure for a correction run.
#[derive(Debug, Serialize)]
pub struct CorrectionRun {
    /// Per-essay corrections, indexed by dataset order.
    pub essays: Vec<Vec<Correction>>,
    /// Total number of corrections across the dataset.
    pub total_corrections: usize,
}

impl CorrectionRun {
    /// Wrap raw corrector output.
    pub fn new(essays: Vec<Vec<Correction>>) -> Self {
        let total_corrections = essays.iter().map(Vec::len).sum();
        CorrectionRun {
            essays,
            total_corrections,
        }
    }
}

/// Result structure for rule learning.
#[derive(Debug, Serialize)]
pub struct RuleLearningResult {
    /// Misspelling -> correction rules.
    pub rules: BTreeMap<String, String>,
    /// Number of rules learned.
    pub rule_count: usize,
}

/// Print a correction run in the selected format.
pub fn output_corrections(run: &CorrectionRun, args: &EmendArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(run, args),
        OutputFormat::Human => {
            for (essay_index, corrections) in run.essays.iter().enumerate() {
                if corrections.is_empty() {
                    continue;
                }
                println!("Essay {essay_index}:");
                for correction in corrections {
                    println!("  {correction}");
                }
            }
            println!("{} corrections in total", run.total_corrections);
            Ok(())
        }
    }
}

/// Print a learned rule table in the selected format.
pub fn output_rules(result: &RuleLearningResult, args: &EmendArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Human => {
            for (word, correction) in &result.rules {
                println!("{word} -> {correction}");
            }
            println!("{} rules learned", result.rule_count);
            Ok(())
        }
    }
}

/// Print an evaluation report in the selected format.
pub fn output_evaluation(report: &EvaluationReport, args: &EmendArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            let names: Vec<&str> = report
                .correctors
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            for row in &report.rows {
                println!(
                    "essay {} index {}: {} (gold: {})",
                    row.essay, row.index, row.word, row.gold
                );
                for (name, output) in names.iter().zip(&row.outputs) {
                    println!("  {name}: {}", output.as_deref().unwrap_or("-"));
                }
            }
            println!();
            println!("{} gold corrections", report.gold_total);
            for corrector in &report.correctors {
                println!(
                    "{}: proposed {}, matched {} ({:.1}% agreement)",
                    corrector.name,
                    corrector.proposed,
                    corrector.matched,
                    corrector.agreement * 100.0
                );
            }
            Ok(())
        }
    }
}

/// Output any serializable value as JSON.
fn output_json<T: Serialize>(value: &T, args: &EmendArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
