//! Noisy-channel corrector built on the bounded edit search.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corrector::search::EditSearcher;
use crate::dictionary::Lexicon;
use crate::document::{Correction, Corrector, Essay, TaggedWord};
use crate::error::Result;
use crate::model::edit_error::EditErrorModel;
use crate::model::language::LanguageModel;

/// Configuration for the edit-distance corrector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Maximum number of charged edit operations per candidate.
    pub max_edits: usize,
    /// Words with contextual probability above this are left alone.
    pub common_word_threshold: f64,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_edits: 1,
            common_word_threshold: 0.0001,
        }
    }
}

/// Corrects misspellings by searching the lexicon within a small edit
/// budget and ranking candidates by
/// `P(word | context) * P(edit path | error)`.
pub struct EditDistanceCorrector {
    lexicon: Arc<Lexicon>,
    searcher: EditSearcher,
    error_model: EditErrorModel,
    language_model: Box<dyn LanguageModel>,
    config: CorrectorConfig,
}

impl EditDistanceCorrector {
    /// Create a corrector with the default configuration.
    pub fn new(
        lexicon: Arc<Lexicon>,
        error_model: EditErrorModel,
        language_model: Box<dyn LanguageModel>,
    ) -> Self {
        Self::with_config(lexicon, error_model, language_model, CorrectorConfig::default())
    }

    /// Create a corrector with a custom configuration.
    pub fn with_config(
        lexicon: Arc<Lexicon>,
        error_model: EditErrorModel,
        language_model: Box<dyn LanguageModel>,
        config: CorrectorConfig,
    ) -> Self {
        let searcher = EditSearcher::new(lexicon.clone());
        EditDistanceCorrector {
            lexicon,
            searcher,
            error_model,
            language_model,
            config,
        }
    }

    /// The candidate set for a word: every lexicon word within the edit
    /// budget, plus the word itself with an empty path.
    pub fn candidates(&self, word: &str) -> Result<BTreeMap<String, String>> {
        let mut candidates =
            self.searcher
                .candidates(word, self.config.max_edits, &self.error_model)?;
        candidates.entry(word.to_string()).or_default();
        Ok(candidates)
    }

    /// Whether a token should be sent to the search at all.
    ///
    /// Proper nouns, recognized dictionary words, contextually common
    /// words, and badly formatted tokens (non-alphabetic, single
    /// characters, internal uppercase) are skipped.
    pub fn should_correct(&self, token: &TaggedWord, context: &[String]) -> bool {
        if token.is_proper_noun() {
            return false;
        }
        valid_format(&token.text)
            && !self.lexicon.contains(&token.text)
            && !self.common_word(&token.text, context)
    }

    fn common_word(&self, word: &str, context: &[String]) -> bool {
        self.language_model.probability(word, context) > self.config.common_word_threshold
    }

    /// Return the best correction for a lower-cased word.
    ///
    /// The word itself is always a candidate, so "no correction" stays an
    /// available outcome. For plural nouns ending in "s" the bare singular
    /// is removed from the candidate set before scoring.
    pub fn correct(&self, word: &str, tag: Option<&str>, context: &[String]) -> Result<String> {
        let mut candidates = self.candidates(word)?;

        if matches!(tag, Some("NNS") | Some("NNPS")) && word.ends_with('s') {
            candidates.remove(&word[..word.len() - 1]);
        }

        let mut best: Option<&str> = None;
        let mut best_score = f64::NEG_INFINITY;
        for (candidate, path) in &candidates {
            let score = self.language_model.probability(candidate, context)
                * self.error_model.probability(path)?;
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        Ok(best.unwrap_or(word).to_string())
    }

    /// Correct a word preserving its original capitalization: scoring runs
    /// on the lower-cased form and the chosen correction is re-capitalized
    /// if the input was.
    pub fn correct_with_capitalization(
        &self,
        word: &str,
        tag: Option<&str>,
        context: &[String],
    ) -> Result<String> {
        let correction = self.correct(&word.to_lowercase(), tag, context)?;
        if is_capitalized(word) {
            Ok(capitalize(&correction))
        } else {
            Ok(correction)
        }
    }

    fn check_essay(&self, essay: &Essay) -> Result<Vec<Correction>> {
        let mut corrections = Vec::new();
        let mut context = vec![String::new(); self.language_model.order().saturating_sub(1)];

        for (index, token) in essay.tokens.iter().enumerate() {
            if self.should_correct(token, &context) {
                let corrected =
                    self.correct_with_capitalization(&token.text, token.tag.as_deref(), &context)?;
                if corrected != token.text {
                    corrections.push(Correction::new(index, token.text.clone(), vec![corrected]));
                }
            }
            if !context.is_empty() {
                context.remove(0);
                context.push(token.text.clone());
            }
        }

        Ok(corrections)
    }
}

impl Corrector for EditDistanceCorrector {
    fn name(&self) -> &str {
        "EditDistanceCorrector"
    }

    fn spellcheck(&self, dataset: &[Essay]) -> Result<Vec<Vec<Correction>>> {
        // Essays are independent; the models are read-only.
        dataset.par_iter().map(|essay| self.check_essay(essay)).collect()
    }
}

fn valid_format(word: &str) -> bool {
    word.chars().count() > 1
        && word.chars().all(|c| c.is_alphabetic())
        && !word.chars().skip(1).any(|c| c.is_uppercase())
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
