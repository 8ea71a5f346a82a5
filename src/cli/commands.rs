//! Command implementations for the emend CLI.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corrector::cluster::{ClusterConfig, ClusterCorrector};
use crate::corrector::combined::CombinedCorrector;
use crate::corrector::edit_distance::{CorrectorConfig, EditDistanceCorrector};
use crate::dictionary::Lexicon;
use crate::document::{Correction, Corrector, Essay};
use crate::error::{EmendError, Result};
use crate::model::edit_error::EditErrorModel;
use crate::model::language::UnigramModel;
use crate::model::probability::ProbDist;
use crate::parse::{self, DigitizationParser, DEFAULT_COUNT_SEPARATOR};
use crate::stats;

/// Execute a CLI command.
pub fn execute_command(args: EmendArgs) -> Result<()> {
    match &args.command {
        Command::Correct(correct_args) => correct(correct_args.clone(), &args),
        Command::LearnRules(learn_args) => learn_rules(learn_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args.clone(), &args),
    }
}

/// Correct a dataset with the edit-distance corrector.
fn correct(args: CorrectArgs, cli_args: &EmendArgs) -> Result<()> {
    let (dataset, _) = load_dataset(&args.dataset, args.plain_text)?;
    if cli_args.verbosity() > 0 {
        println!("Correcting {} essays from {}", dataset.len(), args.dataset.display());
    }

    let lexicon = Arc::new(Lexicon::load_from_file(&args.dictionary)?);
    let corrector = build_edit_corrector(
        lexicon,
        &args.edit_counts,
        &args.word_counts,
        args.prob_spelling_error,
        CorrectorConfig {
            max_edits: args.max_edits,
            common_word_threshold: args.common_word_threshold,
        },
    )?;

    let corrections = corrector.spellcheck(&dataset)?;
    output_corrections(&CorrectionRun::new(corrections), cli_args)
}

/// Learn cluster correction rules from a dataset.
fn learn_rules(args: LearnRulesArgs, cli_args: &EmendArgs) -> Result<()> {
    let (dataset, _) = load_dataset(&args.dataset, args.plain_text)?;
    if cli_args.verbosity() > 0 {
        println!("Learning rules from {} essays", dataset.len());
    }

    let lexicon = Arc::new(Lexicon::load_from_file(&args.dictionary)?);
    let config = ClusterConfig {
        max_distance: args.max_distance,
        correct_capitalization: args.correct_capitalization,
        ..Default::default()
    };
    let mut corrector = ClusterCorrector::with_config(lexicon, config);
    corrector.learn(&dataset);

    if let Some(output) = &args.output {
        corrector.save_rules(output)?;
        if cli_args.verbosity() > 1 {
            println!("Saved rules to {}", output.display());
        }
    }

    let result = RuleLearningResult {
        rule_count: corrector.rules().len(),
        rules: corrector.rules().clone(),
    };
    output_rules(&result, cli_args)
}

/// Evaluate the edit-distance, cluster, and combined correctors against a
/// gold-annotated dataset.
fn evaluate(args: EvaluateArgs, cli_args: &EmendArgs) -> Result<()> {
    let (dataset, gold) = load_dataset(&args.dataset, false)?;
    if gold.iter().all(Vec::is_empty) {
        return Err(EmendError::resource(
            "evaluation dataset carries no gold corrections",
        ));
    }
    if cli_args.verbosity() > 0 {
        println!("Evaluating on {} essays", dataset.len());
    }

    let lexicon = Arc::new(Lexicon::load_from_file(&args.dictionary)?);
    let corrector_config = CorrectorConfig {
        max_edits: args.max_edits,
        ..Default::default()
    };
    let cluster_config = ClusterConfig {
        max_distance: args.max_distance,
        ..Default::default()
    };

    let edit_corrector = build_edit_corrector(
        lexicon.clone(),
        &args.edit_counts,
        &args.word_counts,
        args.prob_spelling_error,
        corrector_config.clone(),
    )?;

    let mut cluster_corrector = ClusterCorrector::with_config(lexicon.clone(), cluster_config.clone());
    cluster_corrector.learn(&dataset);

    // The combined corrector gets its own instances; priority order is
    // edit-distance first.
    let combined_edit = build_edit_corrector(
        lexicon.clone(),
        &args.edit_counts,
        &args.word_counts,
        args.prob_spelling_error,
        corrector_config,
    )?;
    let mut combined_cluster = ClusterCorrector::with_config(lexicon, cluster_config);
    combined_cluster.learn(&dataset);
    let combined = CombinedCorrector::new(vec![
        Box::new(combined_edit),
        Box::new(combined_cluster),
    ]);

    let report = stats::evaluate(
        &[&edit_corrector, &cluster_corrector, &combined],
        &dataset,
        &gold,
    )?;
    output_evaluation(&report, cli_args)
}

fn build_edit_corrector(
    lexicon: Arc<Lexicon>,
    edit_counts: &Path,
    word_counts: &Path,
    prob_spelling_error: f64,
    config: CorrectorConfig,
) -> Result<EditDistanceCorrector> {
    let edit_counts = parse::parse_counts(edit_counts, DEFAULT_COUNT_SEPARATOR)?;
    let error_model = EditErrorModel::new(ProbDist::from_counts(&edit_counts)?, prob_spelling_error);

    let word_counts = parse::parse_counts(word_counts, DEFAULT_COUNT_SEPARATOR)?;
    let language_model = UnigramModel::new(ProbDist::from_counts(&word_counts)?);

    Ok(EditDistanceCorrector::with_config(
        lexicon,
        error_model,
        Box::new(language_model),
        config,
    ))
}

fn load_dataset(path: &Path, plain_text: bool) -> Result<(Vec<Essay>, Vec<Vec<Correction>>)> {
    if plain_text {
        let data = fs::read_to_string(path).map_err(|e| {
            EmendError::resource(format!("cannot read dataset {}: {e}", path.display()))
        })?;
        let essays: Vec<Essay> = data
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse::essay_from_text)
            .collect();
        let gold = vec![Vec::new(); essays.len()];
        Ok((essays, gold))
    } else {
        let digitizations = DigitizationParser::new().parse_file(path)?;
        let essays = digitizations
            .iter()
            .map(|d| parse::essay_from_text(&d.text))
            .collect();
        let gold = digitizations.into_iter().map(|d| d.gold).collect();
        Ok((essays, gold))
    }
}
