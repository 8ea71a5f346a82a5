//! End-to-end scenarios for the edit-distance corrector.

use std::sync::Arc;

use ahash::AHashMap;

use emend::corrector::edit_distance::{CorrectorConfig, EditDistanceCorrector};
use emend::corrector::search::EditSearcher;
use emend::dictionary::Lexicon;
use emend::distance::damerau_levenshtein_threshold;
use emend::document::{Correction, Corrector, Essay, TaggedWord};
use emend::model::edit_error::EditErrorModel;
use emend::model::language::{NgramModel, UnigramModel};
use emend::model::probability::ProbDist;
use emend::parse::{self, DigitizationParser};
use emend::stats;

fn probs(pairs: &[(&str, f64)]) -> ProbDist {
    let map: AHashMap<String, f64> = pairs.iter().map(|(s, p)| (s.to_string(), *p)).collect();
    ProbDist::from_probs(map, 0.0)
}

fn error_model() -> EditErrorModel {
    EditErrorModel::new(
        probs(&[("u|o", 0.5), ("k|ke", 0.2), ("ai|a", 0.3), ("eh|he", 0.4)]),
        0.01,
    )
}

#[test]
fn test_context_sensitive_correction() {
    // "lik" is one insertion away from "like", and the bigram model makes
    // "like" overwhelmingly likely after "I".
    let lexicon = Arc::new(Lexicon::from_words(["like", "Python"]));
    let sentences = vec![vec![
        "I".to_string(),
        "like".to_string(),
        "Python".to_string(),
        ".".to_string(),
    ]];
    let language_model = NgramModel::from_sentences(&sentences, 2).unwrap();
    let corrector =
        EditDistanceCorrector::new(lexicon, error_model(), Box::new(language_model));

    let essay = Essay::new(vec![
        TaggedWord::new("I"),
        TaggedWord::new("lik"),
        TaggedWord::with_tag("Python", "NNP"),
    ]);
    let corrections = corrector.spellcheck(&[essay]).unwrap();

    assert_eq!(corrections.len(), 1);
    assert_eq!(
        corrections[0],
        vec![Correction::new(1, "lik", vec!["like".to_string()])]
    );
}

#[test]
fn test_dictionary_words_and_proper_nouns_are_untouched() {
    let lexicon = Arc::new(Lexicon::from_words(["like", "Python"]));
    let sentences = vec![vec!["I".to_string(), "like".to_string()]];
    let language_model = NgramModel::from_sentences(&sentences, 2).unwrap();
    let corrector =
        EditDistanceCorrector::new(lexicon, error_model(), Box::new(language_model));

    let essay = Essay::new(vec![
        TaggedWord::new("like"),
        TaggedWord::with_tag("Pythn", "NNP"),
    ]);
    let corrections = corrector.spellcheck(&[essay]).unwrap();

    assert!(corrections[0].is_empty());
}

#[test]
fn test_capitalized_misspelling_gets_capitalized_correction() {
    let lexicon = Arc::new(Lexicon::from_words(["the", "manor", "was", "large"]));
    let language_model = UnigramModel::new(probs(&[
        ("the", 0.4),
        ("manor", 0.0000005),
        ("was", 0.2),
        ("large", 0.0000005),
    ]));
    let corrector =
        EditDistanceCorrector::new(lexicon, error_model(), Box::new(language_model));

    let essay = Essay::new(vec![
        TaggedWord::new("Teh"),
        TaggedWord::new("manor"),
        TaggedWord::new("was"),
        TaggedWord::new("large"),
    ]);
    let corrections = corrector.spellcheck(&[essay]).unwrap();

    assert_eq!(
        corrections[0],
        vec![Correction::new(0, "Teh", vec!["The".to_string()])]
    );
}

#[test]
fn test_search_is_sound_and_within_budget() {
    let words = [
        "like", "liked", "likes", "alike", "lie", "lime", "line", "bike", "hike", "the",
    ];
    let lexicon = Arc::new(Lexicon::from_words(words));
    let searcher = EditSearcher::new(lexicon);
    let error_model = error_model();

    for budget in 1..=2 {
        let candidates = searcher.candidates("lik", budget, &error_model).unwrap();
        assert!(!candidates.is_empty());

        for (candidate, path) in &candidates {
            // Every candidate is a real dictionary word.
            assert!(words.contains(&candidate.as_str()), "{candidate} not in dictionary");

            // The path never charges more than the budget, and the charged
            // edits are enough to reach the candidate.
            let edits = if path.is_empty() {
                0
            } else {
                path.split('+').count()
            };
            assert!(edits <= budget);
            assert!(damerau_levenshtein_threshold("lik", candidate, edits).is_some());
        }
    }
}

#[test]
fn test_digitization_pipeline_matches_gold() {
    let data = "\
1
I <lik> Python.
1,lik,like
# # # # # # #
";
    let digitizations = DigitizationParser::new().parse_str(data).unwrap();
    let essays: Vec<Essay> = digitizations
        .iter()
        .map(|d| parse::essay_from_text(&d.text))
        .collect();
    let gold: Vec<Vec<Correction>> = digitizations.into_iter().map(|d| d.gold).collect();

    let lexicon = Arc::new(Lexicon::from_words(["like", "Python"]));
    let sentences = vec![vec![
        "I".to_string(),
        "like".to_string(),
        "Python".to_string(),
    ]];
    let language_model = NgramModel::from_sentences(&sentences, 2).unwrap();
    let corrector = EditDistanceCorrector::with_config(
        lexicon,
        error_model(),
        Box::new(language_model),
        CorrectorConfig::default(),
    );

    let report = stats::evaluate(&[&corrector], &essays, &gold).unwrap();

    assert_eq!(report.gold_total, 1);
    assert_eq!(report.correctors[0].matched, 1);
    assert!((report.correctors[0].agreement - 1.0).abs() < 1e-9);
}
