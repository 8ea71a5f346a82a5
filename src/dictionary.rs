//! Word-membership oracle for spelling correction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashSet;
use log::info;

use crate::error::{EmendError, Result};

/// An immutable dictionary of valid word forms.
///
/// Besides plain membership, a `Lexicon` answers prefix queries over its
/// vocabulary. The candidate search relies on prefix queries to prune
/// insertions and substitutions to strings that can still reach a valid
/// word.
///
/// Membership is case-asymmetric: a stored lowercase word also validates
/// its capitalized and all-caps renderings ("the" accepts "The" and
/// "THE"), but a stored capitalized word does not validate its lowercase
/// form ("London" rejects "london"). Prefix queries run over lowercase
/// forms, matching the search alphabet.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: AHashSet<String>,
    prefixes: AHashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from an iterator of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Lexicon {
            words: AHashSet::new(),
            prefixes: AHashSet::new(),
        };

        for word in words {
            lexicon.insert(word.as_ref());
        }

        lexicon
    }

    /// Load a lexicon from a text file with one word per line.
    ///
    /// Blank lines are skipped. An unreadable file is a fatal error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path).map_err(|e| {
            EmendError::resource(format!(
                "cannot open dictionary {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let reader = BufReader::new(file);

        let mut lexicon = Lexicon::default();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                lexicon.insert(word);
            }
        }

        info!(
            "loaded lexicon from {}: {} words",
            path.as_ref().display(),
            lexicon.len()
        );
        Ok(lexicon)
    }

    fn insert(&mut self, word: &str) {
        let normalized = word.to_lowercase();
        for (i, _) in normalized.char_indices() {
            self.prefixes.insert(normalized[..i].to_string());
        }
        self.prefixes.insert(normalized);
        self.words.insert(word.to_string());
    }

    /// Check whether a word form is valid.
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        if word != lower && self.words.contains(&lower) {
            return word == capitalize(&lower) || word == lower.to_uppercase();
        }
        false
    }

    /// Check whether `prefix` is a prefix of at least one lexicon word.
    ///
    /// The empty string is a prefix of every word, and every full word is a
    /// prefix of itself.
    pub fn is_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains(&prefix.to_lowercase())
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
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
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_membership_case_rules() {
        let lexicon = Lexicon::from_words(["like", "London"]);

        assert!(lexicon.contains("like"));
        // Capitalized and all-caps renderings of a lowercase word are valid.
        assert!(lexicon.contains("Like"));
        assert!(lexicon.contains("LIKE"));
        // A capitalized entry does not validate its lowercase form.
        assert!(lexicon.contains("London"));
        assert!(!lexicon.contains("london"));
        assert!(!lexicon.contains("lik"));
        assert!(!lexicon.contains("LiKe"));
        assert!(!lexicon.contains(""));
    }

    #[test]
    fn test_prefixes() {
        let lexicon = Lexicon::from_words(["like"]);

        assert!(lexicon.is_prefix(""));
        assert!(lexicon.is_prefix("l"));
        assert!(lexicon.is_prefix("li"));
        assert!(lexicon.is_prefix("lik"));
        assert!(lexicon.is_prefix("like"));
        assert!(!lexicon.is_prefix("likes"));
        assert!(!lexicon.is_prefix("x"));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "whilst").unwrap();
        writeln!(temp_file, "Parliament").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "manor").unwrap();
        temp_file.flush().unwrap();

        let lexicon = Lexicon::load_from_file(temp_file.path()).unwrap();
        assert_eq!(lexicon.len(), 3);
        assert!(lexicon.contains("whilst"));
        assert!(lexicon.contains("Parliament"));
        assert!(!lexicon.contains("parliament"));
        assert!(lexicon.is_prefix("mano"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = Lexicon::load_from_file("/nonexistent/words.txt");
        assert!(matches!(result, Err(EmendError::Resource(_))));
    }
}
