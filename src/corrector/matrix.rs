//! All-pairs edit distances over a dataset vocabulary.

use ahash::AHashMap;
use log::debug;
use rayon::prelude::*;

/// Symmetric pairwise distances over the deduplicated vocabulary of a
/// dataset.
///
/// Distances are computed once for every unordered pair (upper-triangle
/// storage, O(V^2) space and time) and queried afterwards; the pair sweep
/// is the dominant cost of rule learning and runs in parallel. Word order
/// is first-occurrence order, so repeated builds over the same dataset are
/// identical.
pub struct DistanceMatrix {
    words: Vec<String>,
    index: AHashMap<String, usize>,
    counts: AHashMap<String, u64>,
    dists: Vec<u32>,
}

impl DistanceMatrix {
    /// Build the matrix from a word sequence (duplicates contribute to
    /// frequency counts) and a distance metric.
    pub fn build<F>(words: &[String], distance: F) -> Self
    where
        F: Fn(&str, &str) -> usize + Sync,
    {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        let mut index: AHashMap<String, usize> = AHashMap::new();
        let mut unique: Vec<String> = Vec::new();

        for word in words {
            *counts.entry(word.clone()).or_insert(0) += 1;
            if !index.contains_key(word) {
                index.insert(word.clone(), unique.len());
                unique.push(word.clone());
            }
        }

        let n = unique.len();
        let mut pairs = Vec::with_capacity(n.saturating_sub(1) * n / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push((i, j));
            }
        }

        let dists: Vec<u32> = pairs
            .par_iter()
            .map(|&(i, j)| distance(&unique[i], &unique[j]) as u32)
            .collect();

        debug!(
            "built distance matrix over {} words ({} pairs)",
            n,
            dists.len()
        );

        DistanceMatrix {
            words: unique,
            index,
            counts,
            dists,
        }
    }

    // Upper-triangle offset for i < j.
    fn pair_offset(&self, i: usize, j: usize) -> usize {
        let n = self.words.len();
        i * (2 * n - i - 1) / 2 + (j - i - 1)
    }

    /// The distance between two vocabulary words, in either order.
    /// `None` if either word is not in the vocabulary.
    pub fn distance(&self, w1: &str, w2: &str) -> Option<usize> {
        let &i = self.index.get(w1)?;
        let &j = self.index.get(w2)?;
        if i == j {
            return Some(0);
        }
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        Some(self.dists[self.pair_offset(a, b)] as usize)
    }

    /// The deduplicated vocabulary in first-occurrence order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of occurrences of a word in the dataset.
    pub fn frequency(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// All vocabulary words within `max_dist` of `word`, paired with their
    /// dataset frequencies. The word itself leads the list; the rest follow
    /// in vocabulary order. Unknown words yield an empty list.
    pub fn close_words(&self, word: &str, max_dist: usize) -> Vec<(&str, u64)> {
        let Some(&i) = self.index.get(word) else {
            return Vec::new();
        };

        let mut close = vec![(self.words[i].as_str(), self.frequency(word))];
        for (j, other) in self.words.iter().enumerate() {
            if j == i {
                continue;
            }
            let (a, b) = if i < j { (i, j) } else { (j, i) };
            if self.dists[self.pair_offset(a, b)] as usize <= max_dist {
                close.push((other.as_str(), self.frequency(other)));
            }
        }
        close
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::damerau_levenshtein_distance;

    fn matrix() -> DistanceMatrix {
        let words: Vec<String> = [
            "hello", "ello", "great", "walk", "bye", "hell", "hello", "but", "but",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect();
        DistanceMatrix::build(&words, damerau_levenshtein_distance)
    }

    #[test]
    fn test_distance_lookup() {
        let matrix = matrix();

        assert_eq!(matrix.distance("hello", "ello"), Some(1));
        assert_eq!(matrix.distance("ello", "hello"), Some(1));
        assert_eq!(matrix.distance("ello", "walk"), Some(3));
        assert_eq!(matrix.distance("hello", "hello"), Some(0));
        assert_eq!(matrix.distance("hello", "unknown"), None);
    }

    #[test]
    fn test_vocabulary_is_deduplicated_in_first_occurrence_order() {
        let matrix = matrix();

        assert_eq!(matrix.len(), 7);
        assert_eq!(
            matrix.words(),
            &["hello", "ello", "great", "walk", "bye", "hell", "but"]
        );
        assert_eq!(matrix.frequency("hello"), 2);
        assert_eq!(matrix.frequency("but"), 2);
        assert_eq!(matrix.frequency("walk"), 1);
        assert_eq!(matrix.frequency("unknown"), 0);
    }

    #[test]
    fn test_close_words() {
        let matrix = matrix();

        let close = matrix.close_words("hello", 1);
        assert_eq!(close, vec![("hello", 2), ("ello", 1), ("hell", 1)]);

        let close = matrix.close_words("bye", 2);
        assert_eq!(close, vec![("bye", 1), ("but", 2)]);

        assert!(matrix.close_words("unknown", 1).is_empty());
    }
}
