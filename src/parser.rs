//! Command resolution: input line to `ParseResult`.

use serde_json::Value;
use thiserror::Error;

use crate::registry::CompiledRegistry;
use crate::result::ParseResult;
use crate::tokenizer::ArgumentsTokenizer;

/// Errors that can occur when parsing input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input must be text, but was {0}")]
    InvalidInputType(String),
}

/// Resolves one line of input against a compiled registry.
///
/// Resolution is a pure function of the input and the registry: no
/// state is kept between calls, and concurrent parses over the same
/// registry need no coordination.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    registry: &'a CompiledRegistry,
}

impl<'a> Parser<'a> {
    pub fn new(registry: &'a CompiledRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CompiledRegistry {
        self.registry
    }

    /// Parse a line of input. Absent or empty input yields the
    /// non-matching shape, as does input that matches no alias.
    pub fn parse(&self, input: Option<&str>) -> ParseResult {
        let Some(input) = input else {
            return ParseResult::no_match(None);
        };
        if input.is_empty() {
            return ParseResult::no_match(Some(input));
        }

        let Some((command, tokenizer, remainder)) = self.match_command(input) else {
            return ParseResult::no_match(Some(input));
        };

        let arguments = tokenizer.tokenize(remainder);

        ParseResult::matched(input, command, arguments)
    }

    /// Parse input delivered as JSON: `Null` is absent, a string is
    /// text, and anything else is a caller bug.
    pub fn parse_value(&self, value: &Value) -> Result<ParseResult, ParseError> {
        match value {
            Value::Null => Ok(self.parse(None)),
            Value::String(text) => Ok(self.parse(Some(text))),
            other => Err(ParseError::InvalidInputType(other.to_string())),
        }
    }

    /// Find the longest alias prefix matching the input. The comparison
    /// is case-insensitive; the returned remainder is taken verbatim
    /// from the input with surrounding whitespace stripped.
    fn match_command<'i>(
        &self,
        input: &'i str,
    ) -> Option<(&'a str, &'a ArgumentsTokenizer, &'i str)> {
        let insensitive = input.to_lowercase();

        for (alias, command, tokenizer) in self.registry.candidates() {
            if !alias_matches(&insensitive, alias) {
                continue;
            }
            // Lowercasing can shift byte offsets for non-ASCII input;
            // the alias length is only known to index the lowercased copy.
            let remainder = input.get(alias.len()..).unwrap_or("").trim();
            return Some((command.name.as_str(), tokenizer, remainder));
        }

        None
    }
}

/// An alias matches only at a separator boundary: the input is the alias
/// itself, or continues with a space ("dance" never matches "dancer").
fn alias_matches(insensitive_input: &str, alias: &str) -> bool {
    match insensitive_input.strip_prefix(alias) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}
