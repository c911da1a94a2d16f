//! Argument and keyword tokenization for command remainders.

use regex::Regex;

use crate::result::{Argument, KeywordGroup};

/// Fixed separator vocabulary: tokens that split fragments without
/// switching buckets.
const SEPARATORS: &[&str] = &["and"];

/// Splits a command remainder into positional fragments and keyword
/// groups using a single pre-compiled alternation pattern.
///
/// The pattern covers the separator vocabulary plus the supplied keyword
/// phrases, each anchored to a leading space and matched case-sensitively.
/// Longer tokens are tried first so a multi-word keyword phrase wins over
/// a shorter prefix of itself.
#[derive(Debug, Clone)]
pub struct ArgumentsTokenizer {
    keywords: Vec<String>,
    pattern: Regex,
}

impl ArgumentsTokenizer {
    /// Build a tokenizer for a keyword vocabulary. Keyword phrases use
    /// spaces between words; underscores in registry keyword names are
    /// rendered as spaces before they reach this type.
    pub fn new<I>(keywords: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();

        let mut tokens: Vec<&str> = SEPARATORS
            .iter()
            .copied()
            .chain(keywords.iter().map(String::as_str))
            .collect();
        // Longest first, so " go to" is tried before " go".
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        tokens.dedup();

        let alternation = tokens
            .iter()
            .map(|token| format!(" {}", regex::escape(token)))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation)?;

        Ok(Self { keywords, pattern })
    }

    /// Tokenize a remainder into ordered fragments plus at most one
    /// trailing keyword group.
    pub fn tokenize(&self, remainder: &str) -> Vec<Argument> {
        if remainder.is_empty() {
            return Vec::new();
        }

        let mut positional: Vec<String> = Vec::new();
        let mut keywords = KeywordGroup::new();
        // The active bucket: None means positional, Some(key) means the
        // named fragment list inside the keyword group.
        let mut active: Option<String> = None;
        let mut cursor = 0;

        while let Some(found) = self.pattern.find(&remainder[cursor..]) {
            let fragment = remainder[cursor..cursor + found.start()].trim();
            if !fragment.is_empty() {
                push_fragment(&mut positional, &mut keywords, &active, fragment.to_string());
            }

            let token = found.as_str().trim_start();
            if self.keywords.iter().any(|kw| kw == token) {
                let key = token.replace(' ', "_");
                keywords.touch(&key);
                active = Some(key);
            }
            // Plain separators leave the active bucket unchanged.

            cursor += found.end();
        }

        // The trailing fragment is appended even when empty, so callers
        // can tell "keyword with no content" from "keyword absent".
        let trailing = remainder[cursor..].trim();
        push_fragment(&mut positional, &mut keywords, &active, trailing.to_string());

        let mut arguments: Vec<Argument> = positional.into_iter().map(Argument::Fragment).collect();
        if !keywords.is_empty() {
            arguments.push(Argument::Keywords(keywords));
        }

        arguments
    }
}

fn push_fragment(
    positional: &mut Vec<String>,
    keywords: &mut KeywordGroup,
    active: &Option<String>,
    fragment: String,
) {
    match active {
        Some(key) => keywords.push(key, fragment),
        None => positional.push(fragment),
    }
}
