//! Token streams, correction records, and the corrector interface.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A word with an optional part-of-speech tag supplied by an external
/// tagger (Penn treebank conventions: `NNP` proper noun, `NNS`/`NNPS`
/// plural noun).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    /// The token text, original casing preserved.
    pub text: String,
    /// Part-of-speech tag, if one was assigned.
    pub tag: Option<String>,
}

impl TaggedWord {
    /// Create an untagged word.
    pub fn new<S: Into<String>>(text: S) -> Self {
        TaggedWord {
            text: text.into(),
            tag: None,
        }
    }

    /// Create a tagged word.
    pub fn with_tag<S: Into<String>, T: Into<String>>(text: S, tag: T) -> Self {
        TaggedWord {
            text: text.into(),
            tag: Some(tag.into()),
        }
    }

    /// Whether the tag marks a proper noun.
    pub fn is_proper_noun(&self) -> bool {
        self.tag.as_deref() == Some("NNP")
    }

    /// Whether the tag marks a plural noun.
    pub fn is_plural_noun(&self) -> bool {
        matches!(self.tag.as_deref(), Some("NNS") | Some("NNPS"))
    }
}

/// One digitized essay as an ordered token stream.
///
/// Tokenization and tagging happen upstream; punctuation-only tokens are
/// expected to be filtered out already.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Essay {
    /// The tokens of the essay in document order.
    pub tokens: Vec<TaggedWord>,
}

impl Essay {
    /// Create an essay from a token stream.
    pub fn new(tokens: Vec<TaggedWord>) -> Self {
        Essay { tokens }
    }
}

/// A proposed correction for one token of an essay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    /// 0-based position of the token in its essay's token stream.
    pub index: usize,
    /// The misspelled word as it appeared.
    pub word: String,
    /// Candidate corrections, best first.
    pub corrections: Vec<String>,
}

impl Correction {
    /// Create a new correction record.
    pub fn new<S: Into<String>>(index: usize, word: S, corrections: Vec<String>) -> Self {
        Correction {
            index,
            word: word.into(),
            corrections,
        }
    }

    /// The highest-ranked correction, if any.
    pub fn best_correction(&self) -> Option<&str> {
        self.corrections.first().map(|s| s.as_str())
    }
}

// Two corrections are the same decision when they point at the same token
// and agree on the top candidate; lower-ranked candidates do not matter.
impl PartialEq for Correction {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.word == other.word
            && self.best_correction() == other.best_correction()
    }
}

impl Eq for Correction {}

impl Hash for Correction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.word.hash(state);
        self.best_correction().hash(state);
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Incorrect word: {} at index {}. Corrections: {:?}",
            self.word, self.index, self.corrections
        )
    }
}

/// A spelling corrector over a dataset of essays.
///
/// Implementations are immutable once constructed and safe to share across
/// threads; each essay is corrected independently.
pub trait Corrector: Send + Sync {
    /// Name used when reporting statistics.
    fn name(&self) -> &str;

    /// Check spelling of all essays, returning one list of corrections per
    /// essay, in token order of discovery.
    fn spellcheck(&self, dataset: &[Essay]) -> Result<Vec<Vec<Correction>>>;
}
