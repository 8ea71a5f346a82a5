//! Source model: the probability of a word given its preceding context.

use ahash::AHashMap;

use crate::error::{EmendError, Result};
use crate::model::probability::ProbDist;

/// A contextual word-probability oracle.
///
/// `order` is the context length plus one: an order-1 model ignores context
/// entirely, an order-2 model conditions on the single preceding word, and
/// so on. Callers pad short contexts with empty strings.
pub trait LanguageModel: Send + Sync {
    /// `P(word | context)`. The context holds the words preceding `word`,
    /// oldest first; only the trailing `order() - 1` entries are used.
    fn probability(&self, word: &str, context: &[String]) -> f64;

    /// Context length plus one.
    fn order(&self) -> usize;
}

/// Maximum-likelihood n-gram model estimated from tokenized sentences.
#[derive(Debug, Clone)]
pub struct NgramModel {
    order: usize,
    probs: AHashMap<Vec<String>, AHashMap<String, f64>>,
}

impl NgramModel {
    /// Estimate an n-gram model of the given order from sentences.
    ///
    /// Sentences are padded on the left with empty strings so that the
    /// first words of a sentence condition on start-of-sentence context.
    pub fn from_sentences(sentences: &[Vec<String>], order: usize) -> Result<Self> {
        if order == 0 {
            return Err(EmendError::model("language model order must be >= 1"));
        }

        let mut context_counts: AHashMap<Vec<String>, u64> = AHashMap::new();
        let mut ngram_counts: AHashMap<Vec<String>, AHashMap<String, u64>> = AHashMap::new();

        for sentence in sentences {
            let mut context = vec![String::new(); order - 1];
            for word in sentence {
                *context_counts.entry(context.clone()).or_default() += 1;
                *ngram_counts
                    .entry(context.clone())
                    .or_default()
                    .entry(word.clone())
                    .or_default() += 1;
                if order > 1 {
                    context.remove(0);
                    context.push(word.clone());
                }
            }
        }

        let probs = ngram_counts
            .into_iter()
            .map(|(context, words)| {
                let total = context_counts[&context] as f64;
                let word_probs = words
                    .into_iter()
                    .map(|(word, count)| (word, count as f64 / total))
                    .collect();
                (context, word_probs)
            })
            .collect();

        Ok(NgramModel { order, probs })
    }

    fn trimmed_context(&self, context: &[String]) -> Vec<String> {
        let wanted = self.order - 1;
        let mut trimmed: Vec<String> = context
            .iter()
            .rev()
            .take(wanted)
            .rev()
            .cloned()
            .collect();
        while trimmed.len() < wanted {
            trimmed.insert(0, String::new());
        }
        trimmed
    }
}

impl LanguageModel for NgramModel {
    fn probability(&self, word: &str, context: &[String]) -> f64 {
        let context = self.trimmed_context(context);
        self.probs
            .get(&context)
            .and_then(|words| words.get(word))
            .copied()
            .unwrap_or(0.0)
    }

    fn order(&self) -> usize {
        self.order
    }
}

/// Context-free word model backed by a [`ProbDist`].
#[derive(Debug, Clone)]
pub struct UnigramModel {
    dist: ProbDist,
}

impl UnigramModel {
    /// Wrap a word-probability distribution as an order-1 language model.
    pub fn new(dist: ProbDist) -> Self {
        UnigramModel { dist }
    }
}

impl LanguageModel for UnigramModel {
    fn probability(&self, word: &str, _context: &[String]) -> f64 {
        self.dist.probability(word)
    }

    fn order(&self) -> usize {
        1
    }
}

/// Weighted mixture of language models.
///
/// The mixture's order is the maximum order of its parts, so callers carry
/// enough context for the longest-range part.
pub struct InterpolatedModel {
    parts: Vec<(Box<dyn LanguageModel>, f64)>,
}

impl InterpolatedModel {
    /// Combine models with the given mixture weights.
    pub fn new(parts: Vec<(Box<dyn LanguageModel>, f64)>) -> Result<Self> {
        if parts.is_empty() {
            return Err(EmendError::model("interpolated model needs parts"));
        }
        Ok(InterpolatedModel { parts })
    }
}

impl LanguageModel for InterpolatedModel {
    fn probability(&self, word: &str, context: &[String]) -> f64 {
        self.parts
            .iter()
            .map(|(model, weight)| weight * model.probability(word, context))
            .sum()
    }

    fn order(&self) -> usize {
        self.parts
            .iter()
            .map(|(model, _)| model.order())
            .max()
            .unwrap_or(1)
    }
}

/// Fixed-probability model, useful as a neutral oracle in tests.
#[derive(Debug, Clone)]
pub struct ConstantModel {
    probability: f64,
    order: usize,
}

impl ConstantModel {
    /// A model returning `probability` for every word.
    pub fn new(probability: f64, order: usize) -> Self {
        ConstantModel { probability, order }
    }
}

impl LanguageModel for ConstantModel {
    fn probability(&self, _word: &str, _context: &[String]) -> f64 {
        self.probability
    }

    fn order(&self) -> usize {
        self.order
    }
}
