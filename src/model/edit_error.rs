//! Channel model: the probability of an edit path given a spelling error.

use crate::error::{EmendError, Result};
use crate::model::probability::ProbDist;

/// Predicate deciding whether an edit token is well-formed.
pub type EditValidator = dyn Fn(&str) -> bool + Send + Sync;

/// An estimated probability distribution for edit paths.
///
/// An edit path is a `'+'`-joined sequence of edit tokens such as
/// `"u|o+k|ke"`; the empty path means no edit was made. Tokens are assumed
/// conditionally independent given that an error occurred, so a path's
/// probability is the product of its token probabilities scaled by the
/// prior probability of an error. Multi-token paths are therefore penalized
/// relative to single edits.
pub struct EditErrorModel {
    edits: ProbDist,
    prob_spelling_error: f64,
    validator: Option<Box<EditValidator>>,
}

impl EditErrorModel {
    /// Create an error model over single-edit probabilities.
    pub fn new(edits: ProbDist, prob_spelling_error: f64) -> Self {
        EditErrorModel {
            edits,
            prob_spelling_error,
            validator: None,
        }
    }

    /// Attach a validity predicate for edit tokens. Without one, every
    /// token is accepted.
    pub fn with_validator(mut self, validator: Box<EditValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The prior probability that a word contains a spelling error.
    pub fn prob_spelling_error(&self) -> f64 {
        self.prob_spelling_error
    }

    /// The probability of a whole edit path.
    ///
    /// `probability("")` is exactly `1 - prob_spelling_error`. A token
    /// rejected by the validator fails with [`EmendError::InvalidEdit`],
    /// propagated to the caller.
    pub fn probability(&self, path: &str) -> Result<f64> {
        if path.is_empty() {
            return Ok(1.0 - self.prob_spelling_error);
        }

        let mut prob = self.prob_spelling_error;
        for token in path.split('+') {
            if !self.valid_edit(token) {
                return Err(EmendError::invalid_edit(token));
            }
            prob *= self.edits.probability(token);
        }
        Ok(prob)
    }

    fn valid_edit(&self, token: &str) -> bool {
        match &self.validator {
            Some(validator) => validator(token),
            None => true,
        }
    }
}
