//! Rule learning by clustering word forms over pairwise edit distances.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::corrector::matrix::DistanceMatrix;
use crate::dictionary::Lexicon;
use crate::distance::damerau_levenshtein_distance;
use crate::document::{Correction, Corrector, Essay};
use crate::error::{EmendError, Result};

/// Configuration for cluster rule learning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Maximum edit distance for a word to count as a neighbor.
    pub max_distance: usize,
    /// Minimum share of the neighborhood frequency mass a neighbor needs
    /// to become a correction rule.
    pub majority_threshold: f64,
    /// Keep rules that only change capitalization.
    pub correct_capitalization: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            max_distance: 1,
            majority_threshold: 0.5,
            correct_capitalization: false,
        }
    }
}

/// Learns static correction rules from a dataset and applies them as a
/// table lookup.
///
/// For every out-of-dictionary vocabulary word, neighbors within the
/// distance threshold are scanned in vocabulary order; the first
/// in-dictionary neighbor holding at least the majority share of the
/// neighborhood's frequency mass (the word itself included) becomes the
/// rule target. Words with no qualifying neighbor are left unmapped. No
/// search happens at correction time.
pub struct ClusterCorrector {
    lexicon: Arc<Lexicon>,
    config: ClusterConfig,
    rules: BTreeMap<String, String>,
}

impl ClusterCorrector {
    /// Create a rule learner with the default configuration.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self::with_config(lexicon, ClusterConfig::default())
    }

    /// Create a rule learner with a custom configuration.
    pub fn with_config(lexicon: Arc<Lexicon>, config: ClusterConfig) -> Self {
        ClusterCorrector {
            lexicon,
            config,
            rules: BTreeMap::new(),
        }
    }

    /// Learn rules from a dataset of essays.
    ///
    /// Tokens that are not purely alphabetic or carry internal uppercase
    /// are excluded from the vocabulary.
    pub fn learn(&mut self, dataset: &[Essay]) -> &BTreeMap<String, String> {
        let words: Vec<String> = dataset
            .iter()
            .flat_map(|essay| essay.tokens.iter())
            .map(|token| token.text.clone())
            .filter(|word| valid_word(word))
            .collect();
        self.learn_from_words(&words)
    }

    /// Learn rules from a raw word sequence (duplicates carry frequency).
    pub fn learn_from_words(&mut self, words: &[String]) -> &BTreeMap<String, String> {
        let matrix = DistanceMatrix::build(words, damerau_levenshtein_distance);

        for word in matrix.words() {
            if self.lexicon.contains(word) {
                continue;
            }
            let close = matrix.close_words(word, self.config.max_distance);
            let total: u64 = close.iter().map(|(_, count)| count).sum();
            if total == 0 {
                continue;
            }
            for (neighbor, count) in &close {
                if *neighbor != word.as_str()
                    && self.lexicon.contains(neighbor)
                    && *count as f64 / total as f64 >= self.config.majority_threshold
                {
                    if self.valid_correction(word, neighbor) {
                        debug!("rule: {word} -> {neighbor}");
                        self.rules.insert(word.clone(), neighbor.to_string());
                    }
                    break;
                }
            }
        }

        info!("learned {} correction rules", self.rules.len());
        &self.rules
    }

    /// The learned rule table.
    pub fn rules(&self) -> &BTreeMap<String, String> {
        &self.rules
    }

    /// Discard all learned rules.
    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Save the rule table as JSON.
    pub fn save_rules<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.rules)?;
        Ok(())
    }

    /// Load a rule table previously saved as JSON, replacing any learned
    /// rules.
    pub fn load_rules<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(&path).map_err(|e| {
            EmendError::resource(format!(
                "cannot open rule table {}: {e}",
                path.as_ref().display()
            ))
        })?;
        self.rules = serde_json::from_reader(BufReader::new(file))?;
        Ok(())
    }

    fn valid_correction(&self, word: &str, correction: &str) -> bool {
        self.config.correct_capitalization
            || !(capitalize(correction) == word || capitalize(word) == correction)
    }
}

impl Corrector for ClusterCorrector {
    fn name(&self) -> &str {
        "ClusterCorrector"
    }

    fn spellcheck(&self, dataset: &[Essay]) -> Result<Vec<Vec<Correction>>> {
        Ok(dataset
            .iter()
            .map(|essay| {
                essay
                    .tokens
                    .iter()
                    .enumerate()
                    .filter_map(|(index, token)| {
                        self.rules.get(&token.text).map(|correction| {
                            Correction::new(index, token.text.clone(), vec![correction.clone()])
                        })
                    })
                    .collect()
            })
            .collect())
    }
}

fn valid_word(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|c| c.is_alphabetic())
        && !word.chars().skip(1).any(|c| c.is_uppercase())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;
    use crate::document::TaggedWord;

    fn repeated(pairs: &[(&str, usize)]) -> Vec<String> {
        pairs
            .iter()
            .flat_map(|(word, count)| std::iter::repeat_n(word.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_majority_vote_rules() {
        let lexicon = Arc::new(Lexicon::from_words(["beach", "beautiful"]));
        let config = ClusterConfig {
            max_distance: 2,
            ..Default::default()
        };
        let mut corrector = ClusterCorrector::with_config(lexicon, config);

        let words = repeated(&[("beach", 5), ("beeich", 1), ("beautiful", 3), ("butiful", 1)]);
        let rules = corrector.learn_from_words(&words);

        assert_eq!(rules.get("beeich"), Some(&"beach".to_string()));
        assert_eq!(rules.get("butiful"), Some(&"beautiful".to_string()));
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_no_rule_without_majority() {
        // "hel" sits between two equally frequent dictionary words, but
        // its own occurrences hold half the neighborhood mass, so neither
        // neighbor reaches the 50% share.
        let lexicon = Arc::new(Lexicon::from_words(["hell", "help"]));
        let mut corrector = ClusterCorrector::new(lexicon);

        let words = repeated(&[("hel", 2), ("hell", 1), ("help", 1)]);
        let rules = corrector.learn_from_words(&words);

        assert!(rules.is_empty());
    }

    #[test]
    fn test_no_rule_with_zero_neighbors() {
        let lexicon = Arc::new(Lexicon::from_words(["parliament"]));
        let mut corrector = ClusterCorrector::new(lexicon);

        let words = repeated(&[("zzqq", 3)]);
        // The word's own mass is 100% but it is not a dictionary word, so
        // it never becomes its own rule target.
        let rules = corrector.learn_from_words(&words);

        assert!(rules.is_empty());
    }

    #[test]
    fn test_capitalization_rules_filtered_by_default() {
        // "london" is not a valid form of the proper noun, so it clusters
        // onto "London"; that rule only changes capitalization and is
        // dropped unless explicitly enabled.
        let lexicon = Arc::new(Lexicon::from_words(["London"]));
        let words = repeated(&[("london", 1), ("London", 3)]);

        let mut corrector = ClusterCorrector::new(lexicon.clone());
        assert!(corrector.learn_from_words(&words).is_empty());

        let config = ClusterConfig {
            correct_capitalization: true,
            ..Default::default()
        };
        let mut corrector = ClusterCorrector::with_config(lexicon, config);
        let rules = corrector.learn_from_words(&words);
        assert_eq!(rules.get("london"), Some(&"London".to_string()));
    }

    #[test]
    fn test_learning_is_idempotent() {
        let lexicon = Arc::new(Lexicon::from_words(["beach", "beautiful"]));
        let config = ClusterConfig {
            max_distance: 2,
            ..Default::default()
        };
        let words = repeated(&[("beach", 5), ("beeich", 1), ("beautiful", 3), ("butiful", 1)]);

        let mut first = ClusterCorrector::with_config(lexicon.clone(), config.clone());
        first.learn_from_words(&words);

        let mut second = ClusterCorrector::with_config(lexicon, config);
        second.learn_from_words(&words);
        second.learn_from_words(&words);

        assert_eq!(first.rules(), second.rules());
    }

    #[test]
    fn test_spellcheck_is_a_table_lookup() {
        let lexicon = Arc::new(Lexicon::from_words(["beach", "beautiful"]));
        let config = ClusterConfig {
            max_distance: 2,
            ..Default::default()
        };
        let mut corrector = ClusterCorrector::with_config(lexicon, config);
        corrector.learn_from_words(&repeated(&[("beach", 5), ("beeich", 1)]));

        let essay = Essay::new(vec![
            TaggedWord::new("the"),
            TaggedWord::new("beeich"),
            TaggedWord::new("beach"),
        ]);
        let corrections = corrector.spellcheck(&[essay]).unwrap();

        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].len(), 1);
        assert_eq!(corrections[0][0].index, 1);
        assert_eq!(corrections[0][0].word, "beeich");
        assert_eq!(corrections[0][0].best_correction(), Some("beach"));
    }

    #[test]
    fn test_rules_round_trip_through_json() {
        let lexicon = Arc::new(Lexicon::from_words(["beach"]));
        let config = ClusterConfig {
            max_distance: 2,
            ..Default::default()
        };
        let mut corrector = ClusterCorrector::with_config(lexicon.clone(), config);
        corrector.learn_from_words(&repeated(&[("beach", 5), ("beeich", 1)]));

        let temp_file = NamedTempFile::new().unwrap();
        corrector.save_rules(temp_file.path()).unwrap();

        let mut loaded = ClusterCorrector::new(lexicon);
        loaded.load_rules(temp_file.path()).unwrap();
        assert_eq!(loaded.rules(), corrector.rules());

        loaded.clear_rules();
        assert!(loaded.rules().is_empty());
    }
}
