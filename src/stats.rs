//! Evaluation of correctors against gold-annotated corrections.

use ahash::AHashMap;
use serde::Serialize;

use crate::document::{Correction, Corrector, Essay};
use crate::error::Result;

/// Per-corrector agreement with the gold corrections.
#[derive(Debug, Clone, Serialize)]
pub struct CorrectorReport {
    /// Corrector name.
    pub name: String,
    /// Total corrections the corrector proposed across the dataset.
    pub proposed: usize,
    /// Proposed corrections whose token and top candidate match gold.
    pub matched: usize,
    /// `matched / gold_total`, or 0 when there are no gold corrections.
    pub agreement: f64,
}

/// One gold correction with what each corrector said about that token.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRow {
    /// Essay index in the dataset.
    pub essay: usize,
    /// Token position within the essay.
    pub index: usize,
    /// The misspelled word.
    pub word: String,
    /// The gold correction.
    pub gold: String,
    /// Each corrector's top candidate for this token, in corrector order;
    /// `None` when a corrector proposed nothing.
    pub outputs: Vec<Option<String>>,
}

/// Full evaluation of a set of correctors against gold corrections.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// Number of gold corrections in the dataset.
    pub gold_total: usize,
    /// Per-corrector summaries, in corrector order.
    pub correctors: Vec<CorrectorReport>,
    /// Gold corrections with per-corrector outputs.
    pub rows: Vec<EvaluationRow>,
}

type CorrectionKey = (usize, usize, String);

fn corrections_to_map(all: &[Vec<Correction>]) -> AHashMap<CorrectionKey, String> {
    let mut map = AHashMap::new();
    for (essay_index, corrections) in all.iter().enumerate() {
        for correction in corrections {
            if let Some(best) = correction.best_correction() {
                map.insert(
                    (essay_index, correction.index, correction.word.clone()),
                    best.to_string(),
                );
            }
        }
    }
    map
}

/// Run every corrector over the dataset and compare against gold.
pub fn evaluate(
    correctors: &[&dyn Corrector],
    dataset: &[Essay],
    gold: &[Vec<Correction>],
) -> Result<EvaluationReport> {
    let gold_map = corrections_to_map(gold);
    let gold_total = gold_map.len();

    let mut reports = Vec::with_capacity(correctors.len());
    let mut outputs: Vec<AHashMap<CorrectionKey, String>> = Vec::with_capacity(correctors.len());

    for corrector in correctors {
        let corrections = corrector.spellcheck(dataset)?;
        let proposed = corrections.iter().map(Vec::len).sum();
        let map = corrections_to_map(&corrections);
        let matched = gold_map
            .iter()
            .filter(|(key, best)| map.get(*key) == Some(*best))
            .count();
        let agreement = if gold_total == 0 {
            0.0
        } else {
            matched as f64 / gold_total as f64
        };
        reports.push(CorrectorReport {
            name: corrector.name().to_string(),
            proposed,
            matched,
            agreement,
        });
        outputs.push(map);
    }

    let mut rows = Vec::with_capacity(gold_total);
    for (essay_index, corrections) in gold.iter().enumerate() {
        for correction in corrections {
            let Some(best) = correction.best_correction() else {
                continue;
            };
            let key = (essay_index, correction.index, correction.word.clone());
            rows.push(EvaluationRow {
                essay: essay_index,
                index: correction.index,
                word: correction.word.clone(),
                gold: best.to_string(),
                outputs: outputs.iter().map(|map| map.get(&key).cloned()).collect(),
            });
        }
    }

    Ok(EvaluationReport {
        gold_total,
        correctors: reports,
        rows,
    })
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
    fn test_evaluate_agreement() {
        let gold = vec![vec![
            Correction::new(1, "lik", vec!["like".to_string()]),
            Correction::new(4, "teh", vec!["the".to_string()]),
        ]];

        let right = FixedCorrector {
            name: "right",
            corrections: vec![vec![Correction::new(1, "lik", vec!["like".to_string()])]],
        };
        let wrong = FixedCorrector {
            name: "wrong",
            corrections: vec![vec![Correction::new(1, "lik", vec!["liked".to_string()])]],
        };

        let dataset = vec![Essay::default()];
        let report = evaluate(&[&right, &wrong], &dataset, &gold).unwrap();

        assert_eq!(report.gold_total, 2);
        assert_eq!(report.correctors.len(), 2);

        assert_eq!(report.correctors[0].name, "right");
        assert_eq!(report.correctors[0].proposed, 1);
        assert_eq!(report.correctors[0].matched, 1);
        assert!((report.correctors[0].agreement - 0.5).abs() < 1e-9);

        assert_eq!(report.correctors[1].matched, 0);

        assert_eq!(report.rows.len(), 2);
        let lik_row = report.rows.iter().find(|r| r.word == "lik").unwrap();
        assert_eq!(lik_row.outputs[0].as_deref(), Some("like"));
        assert_eq!(lik_row.outputs[1].as_deref(), Some("liked"));
        let teh_row = report.rows.iter().find(|r| r.word == "teh").unwrap();
        assert!(teh_row.outputs[0].is_none());
    }
}
