//! Priority merge of multiple correctors.

use ahash::AHashSet;

use crate::document::{Correction, Corrector, Essay};
use crate::error::Result;

/// Runs several correctors and merges their corrections.
///
/// Correctors are consulted in the order given (descending priority) and
/// results are deduplicated by `(essay, token position, original word)`,
/// so a higher-priority corrector's decision for a token always wins and
/// no token is corrected twice.
pub struct CombinedCorrector {
    correctors: Vec<Box<dyn Corrector>>,
}

impl CombinedCorrector {
    /// Create a combined corrector from parts in descending priority.
    pub fn new(correctors: Vec<Box<dyn Corrector>>) -> Self {
        CombinedCorrector { correctors }
    }
}

impl Corrector for CombinedCorrector {
    fn name(&self) -> &str {
        "CombinedCorrector"
    }

    fn spellcheck(&self, dataset: &[Essay]) -> Result<Vec<Vec<Correction>>> {
        let mut merged: Vec<Vec<Correction>> = vec![Vec::new(); dataset.len()];
        let mut seen: AHashSet<(usize, usize, String)> = AHashSet::new();

        for corrector in &self.correctors {
            let corrections = corrector.spellcheck(dataset)?;
            for (essay_index, essay_corrections) in corrections.into_iter().enumerate() {
                for correction in essay_corrections {
                    let key = (essay_index, correction.index, correction.word.clone());
                    if seen.insert(key) {
                        merged[essay_index].push(correction);
                    }
                }
            }
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCorrector {
        name: &'static str,
        corrections: Vec<Vec<Correction>>,
    }

    impl Corrector for FixedCorrector {
        fn name(&self) -> &str {
            self.name
        }

        fn spellcheck(&self, _dataset: &[Essay]) -> Result<Vec<Vec<Correction>>> {
            Ok(self.corrections.clone())
        }
    }

    #[test]
    fn test_higher_priority_wins() {
        let first = FixedCorrector {
            name: "first",
            corrections: vec![vec![Correction::new(2, "lik", vec!["like".to_string()])]],
        };
        let second = FixedCorrector {
            name: "second",
            corrections: vec![vec![
                Correction::new(2, "lik", vec!["liked".to_string()]),
                Correction::new(5, "teh", vec!["the".to_string()]),
            ]],
        };

        let combined = CombinedCorrector::new(vec![Box::new(first), Box::new(second)]);
        let merged = combined.spellcheck(&[Essay::default()]).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len(), 2);
        assert_eq!(merged[0][0].index, 2);
        assert_eq!(merged[0][0].best_correction(), Some("like"));
        assert_eq!(merged[0][1].index, 5);
        assert_eq!(merged[0][1].best_correction(), Some("the"));
    }

    #[test]
    fn test_corrections_stay_with_their_essay() {
        let corrector = FixedCorrector {
            name: "only",
            corrections: vec![
                vec![],
                vec![Correction::new(0, "whlist", vec!["whilst".to_string()])],
            ],
        };

        let combined = CombinedCorrector::new(vec![Box::new(corrector)]);
        let merged = combined
            .spellcheck(&[Essay::default(), Essay::default()])
            .unwrap();

        assert!(merged[0].is_empty());
        assert_eq!(merged[1].len(), 1);
        assert_eq!(merged[1][0].word, "whlist");
    }
}
