//! Empirical probability distributions over discrete symbols.

use ahash::AHashMap;

use crate::error::{EmendError, Result};

/// An estimated probability distribution over string symbols.
///
/// Unseen symbols fall back to a default probability instead of failing;
/// the correction engine probes many edit tokens that never occurred in
/// training data. When built from counts the default is `1 / total_count`.
#[derive(Debug, Clone)]
pub struct ProbDist {
    probs: AHashMap<String, f64>,
    default: f64,
}

impl ProbDist {
    /// Estimate a distribution from symbol counts.
    ///
    /// Each symbol gets probability `count / total`; unseen symbols get
    /// `1 / total`. Fails on an empty count table.
    pub fn from_counts(counts: &AHashMap<String, u64>) -> Result<Self> {
        let total: u64 = counts.values().sum();
        if total == 0 {
            return Err(EmendError::model("cannot estimate from empty counts"));
        }
        let default = 1.0 / total as f64;
        Self::from_counts_with_default(counts, default)
    }

    /// Estimate a distribution from symbol counts with an explicit default
    /// probability for unseen symbols.
    pub fn from_counts_with_default(counts: &AHashMap<String, u64>, default: f64) -> Result<Self> {
        let total: u64 = counts.values().sum();
        if total == 0 {
            return Err(EmendError::model("cannot estimate from empty counts"));
        }

        let probs = counts
            .iter()
            .map(|(symbol, &count)| (symbol.clone(), count as f64 / total as f64))
            .collect();

        Ok(ProbDist { probs, default })
    }

    /// Build a distribution from ready probabilities.
    pub fn from_probs(probs: AHashMap<String, f64>, default: f64) -> Self {
        ProbDist { probs, default }
    }

    /// The probability of a symbol. Never fails; unseen symbols return the
    /// default.
    pub fn probability(&self, symbol: &str) -> f64 {
        self.probs.get(symbol).copied().unwrap_or(self.default)
    }

    /// The default probability returned for unseen symbols.
    pub fn default_probability(&self) -> f64 {
        self.default
    }

    /// Number of symbols seen in training data.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Whether no symbols were seen in training data.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> AHashMap<String, u64> {
        pairs.iter().map(|(s, c)| (s.to_string(), *c)).collect()
    }

    #[test]
    fn test_from_counts() {
        let dist = ProbDist::from_counts(&counts(&[("e|i", 6), ("u|o", 4)])).unwrap();

        assert!((dist.probability("e|i") - 0.6).abs() < 1e-9);
        assert!((dist.probability("u|o") - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_unseen_symbols_use_default() {
        let dist = ProbDist::from_counts(&counts(&[("e|i", 6), ("u|o", 4)])).unwrap();

        // Laplace-like default of 1/total, never a failure.
        assert!((dist.default_probability() - 0.1).abs() < 1e-9);
        assert!((dist.probability("x|y") - 0.1).abs() < 1e-9);
        assert!((dist.probability("") - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_empty_counts_are_fatal() {
        let result = ProbDist::from_counts(&AHashMap::new());
        assert!(matches!(result, Err(EmendError::Model(_))));
    }

    #[test]
    fn test_from_probs() {
        let mut probs = AHashMap::new();
        probs.insert("e|i".to_string(), 0.5);
        let dist = ProbDist::from_probs(probs, 0.0);

        assert!((dist.probability("e|i") - 0.5).abs() < 1e-9);
        assert_eq!(dist.probability("unseen"), 0.0);
        assert_eq!(dist.len(), 1);
    }
}
