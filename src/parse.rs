//! Parsing of count tables and annotated digitization transcripts.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use regex::Regex;

use crate::document::{Correction, Essay, TaggedWord};
use crate::error::{EmendError, Result};

/// Default field separator in frequency-count files.
pub const DEFAULT_COUNT_SEPARATOR: char = '\t';

/// Parse frequency counts from a file with lines of `<symbol><sep><count>`,
/// e.g. `e|i	917`.
///
/// Blank lines are skipped; any other malformed line is a fatal error.
pub fn parse_counts<P: AsRef<Path>>(path: P, sep: char) -> Result<AHashMap<String, u64>> {
    let data = fs::read_to_string(&path).map_err(|e| {
        EmendError::resource(format!(
            "cannot read count file {}: {e}",
            path.as_ref().display()
        ))
    })?;

    let mut counts = AHashMap::new();
    for (line_number, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (symbol, count) = line.split_once(sep).ok_or_else(|| {
            EmendError::resource(format!(
                "count file {}: line {} has no separator",
                path.as_ref().display(),
                line_number + 1
            ))
        })?;
        let count: u64 = count.trim().parse().map_err(|_| {
            EmendError::resource(format!(
                "count file {}: line {} has a bad count: {count:?}",
                path.as_ref().display(),
                line_number + 1
            ))
        })?;
        counts.insert(symbol.to_string(), count);
    }

    Ok(counts)
}

/// Split `text` into word tokens, dropping punctuation-only runs.
///
/// A token is a maximal run of alphanumeric characters and internal
/// apostrophes, so contractions survive as single tokens. Tags are left
/// unset; an external part-of-speech tagger can fill them in.
pub fn tokenize(text: &str) -> Vec<TaggedWord> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_alphanumeric() || c == '\'' {
            current.push(c);
        } else if !current.is_empty() {
            push_token(&mut tokens, &current);
            current.clear();
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, &current);
    }

    tokens
}

fn push_token(tokens: &mut Vec<TaggedWord>, raw: &str) {
    let trimmed = raw.trim_matches('\'');
    if !trimmed.is_empty() {
        tokens.push(TaggedWord::new(trimmed));
    }
}

/// Tokenize a transcript into an [`Essay`].
pub fn essay_from_text(text: &str) -> Essay {
    Essay::new(tokenize(text))
}

/// One parsed transcript: the essay text plus its gold corrections.
#[derive(Debug, Clone)]
pub struct Digitization {
    /// Essay text with digitization markup stripped.
    pub text: String,
    /// Hand-annotated corrections for the essay.
    pub gold: Vec<Correction>,
}

/// Parser for annotated digitization files.
///
/// A file holds a sequence of essay blocks, each terminated by a sentinel
/// line. A block's first line is the essay number, the second is the essay
/// text (with `<...>` markup around uncertain readings), and any further
/// lines are gold corrections formatted `index,word,correction`.
pub struct DigitizationParser {
    end_of_essay: String,
    markup: Regex,
}

impl DigitizationParser {
    /// Create a parser with the default essay sentinel.
    pub fn new() -> Self {
        Self::with_sentinel("# # # # # # #")
    }

    /// Create a parser with a custom essay sentinel line.
    pub fn with_sentinel<S: Into<String>>(end_of_essay: S) -> Self {
        DigitizationParser {
            end_of_essay: end_of_essay.into(),
            markup: Regex::new(r"<([^>]*)>").expect("markup pattern is valid"),
        }
    }

    /// Parse a digitization file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Digitization>> {
        let data = fs::read_to_string(&path).map_err(|e| {
            EmendError::resource(format!(
                "cannot read digitization {}: {e}",
                path.as_ref().display()
            ))
        })?;
        self.parse_str(&data)
    }

    /// Parse digitization data already in memory.
    pub fn parse_str(&self, data: &str) -> Result<Vec<Digitization>> {
        let mut blocks: Vec<Vec<&str>> = vec![Vec::new()];
        for line in data.lines() {
            if line == self.end_of_essay {
                blocks.push(Vec::new());
            } else {
                blocks.last_mut().expect("blocks is never empty").push(line);
            }
        }
        // Whatever trails the final sentinel is not an essay.
        blocks.pop();

        let mut essays = Vec::with_capacity(blocks.len());
        for block in blocks {
            if block.len() < 2 {
                return Err(EmendError::resource(
                    "digitization block is missing its essay text",
                ));
            }
            let text = self.markup.replace_all(block[1], "$1").into_owned();
            let gold = block[2..]
                .iter()
                .map(|line| parse_gold_correction(line))
                .collect::<Result<Vec<_>>>()?;
            essays.push(Digitization { text, gold });
        }

        Ok(essays)
    }
}

impl Default for DigitizationParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_gold_correction(line: &str) -> Result<Correction> {
    let mut fields = line.splitn(3, ',');
    let (Some(index), Some(word), Some(correction)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(EmendError::resource(format!(
            "bad gold correction line: {line:?}"
        )));
    };
    let index: usize = index.trim().parse().map_err(|_| {
        EmendError::resource(format!("bad gold correction index in line: {line:?}"))
    })?;
    Ok(Correction::new(
        index,
        word.to_string(),
        vec![correction.to_string()],
    ))
}
