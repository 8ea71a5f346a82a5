//! Bounded recursive search for dictionary words near a misspelling.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dictionary::Lexicon;
use crate::error::Result;
use crate::model::edit_error::EditErrorModel;

/// Sentinel standing in for the character before the start of a word in
/// edit-token context.
pub const WORD_START: char = '<';

/// One atomic character-level change at a point in the alignment between a
/// misspelling and a candidate. Serialized as `misspelled|correct`, e.g.
/// `"u|o"` for a substitution or `"k|ke"` for an insertion after `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditToken {
    /// The misspelled fragment.
    pub source: String,
    /// The corrected fragment.
    pub target: String,
}

impl EditToken {
    /// Create an edit token.
    pub fn new<S: Into<String>, T: Into<String>>(source: S, target: T) -> Self {
        EditToken {
            source: source.into(),
            target: target.into(),
        }
    }

    /// The stable string key used for probability lookup.
    pub fn encode(&self) -> String {
        format!("{}|{}", self.source, self.target)
    }
}

/// Serialize an edit path as its `'+'`-joined token keys. An empty path
/// encodes as the empty string, meaning "no edit".
pub fn encode_path(tokens: &[EditToken]) -> String {
    tokens
        .iter()
        .map(EditToken::encode)
        .collect::<Vec<_>>()
        .join("+")
}

/// Enumerates every lexicon word reachable from a misspelling within an
/// edit budget, each annotated with the most probable edit path found.
///
/// Insertions and substitutions are only attempted along strings that are
/// still prefixes of some lexicon word, which keeps the branching factor
/// from exploding.
pub struct EditSearcher {
    lexicon: Arc<Lexicon>,
    alphabet: Vec<char>,
}

impl EditSearcher {
    /// Create a searcher over the given lexicon with the default alphabet
    /// (ASCII lowercase plus apostrophe, for contractions).
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        let alphabet = ('a'..='z').chain(std::iter::once('\'')).collect();
        EditSearcher { lexicon, alphabet }
    }

    /// Create a searcher with a custom extension alphabet.
    pub fn with_alphabet(lexicon: Arc<Lexicon>, alphabet: Vec<char>) -> Self {
        EditSearcher { lexicon, alphabet }
    }

    /// Return a map of `{candidate word: edit path}` for every lexicon word
    /// within `max_edits` single-character operations of `word`.
    ///
    /// When two paths reach the same candidate, the one with the higher
    /// error-model probability is kept; an exact tie keeps the path found
    /// first. The map is ordered, so iteration is deterministic.
    pub fn candidates(
        &self,
        word: &str,
        max_edits: usize,
        error_model: &EditErrorModel,
    ) -> Result<BTreeMap<String, String>> {
        let tail: Vec<char> = word.chars().collect();
        let mut head = String::with_capacity(word.len() + max_edits);
        let mut path = Vec::new();
        let mut results = BTreeMap::new();
        self.search(
            &mut head,
            &tail,
            max_edits,
            &mut path,
            error_model,
            &mut results,
        )?;
        Ok(results)
    }

    fn search(
        &self,
        head: &mut String,
        tail: &[char],
        budget: usize,
        path: &mut Vec<EditToken>,
        error_model: &EditErrorModel,
        results: &mut BTreeMap<String, String>,
    ) -> Result<()> {
        let mut candidate = head.clone();
        candidate.extend(tail.iter());
        if self.lexicon.contains(&candidate) {
            let encoded = encode_path(path);
            let keep_new = match results.get(&candidate) {
                None => true,
                Some(existing) => {
                    error_model.probability(&encoded)? > error_model.probability(existing)?
                }
            };
            if keep_new {
                results.insert(candidate, encoded);
            }
        }

        if budget == 0 {
            return Ok(());
        }

        let prev = head.chars().last().unwrap_or(WORD_START);
        // Extensions that are still prefixes of some lexicon word.
        let extensions: Vec<char> = self
            .alphabet
            .iter()
            .copied()
            .filter(|&c| {
                head.push(c);
                let ok = self.lexicon.is_prefix(head);
                head.pop();
                ok
            })
            .collect();

        // Insertion
        for &c in &extensions {
            path.push(EditToken::new(prev.to_string(), format!("{prev}{c}")));
            head.push(c);
            self.search(head, tail, budget - 1, path, error_model, results)?;
            head.pop();
            path.pop();
        }

        let Some(&first) = tail.first() else {
            return Ok(());
        };

        // Deletion
        path.push(EditToken::new(format!("{prev}{first}"), prev.to_string()));
        self.search(head, &tail[1..], budget - 1, path, error_model, results)?;
        path.pop();

        // Match or substitution
        for &c in &extensions {
            if c == first {
                head.push(c);
                self.search(head, &tail[1..], budget, path, error_model, results)?;
                head.pop();
            } else {
                path.push(EditToken::new(first.to_string(), c.to_string()));
                head.push(c);
                self.search(head, &tail[1..], budget - 1, path, error_model, results)?;
                head.pop();
                path.pop();
            }
        }

        // Transposition of two differing adjacent characters. The second
        // character moves into the decided prefix; the first stays at the
        // front of the suffix so the match branch can consume it.
        if tail.len() >= 2 && tail[0] != tail[1] {
            head.push(tail[1]);
            if self.lexicon.is_prefix(head) {
                let mut swapped_tail = Vec::with_capacity(tail.len() - 1);
                swapped_tail.push(tail[0]);
                swapped_tail.extend_from_slice(&tail[2..]);
                path.push(EditToken::new(
                    format!("{}{}", tail[0], tail[1]),
                    format!("{}{}", tail[1], tail[0]),
                ));
                self.search(head, &swapped_tail, budget - 1, path, error_model, results)?;
                path.pop();
            }
            head.pop();
        }

        Ok(())
    }
}
