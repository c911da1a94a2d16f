//! Parse result types shared by the resolver and tokenizer.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Named fragment groups captured after keyword tokens.
///
/// Keys preserve first-use order and are unique: a keyword that fires a
/// second time extends its existing fragment list instead of creating a
/// duplicate entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordGroup {
    entries: Vec<(String, Vec<String>)>,
}

impl KeywordGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to the list for `keyword`, creating the list on
    /// first use.
    pub fn push(&mut self, keyword: &str, fragment: String) {
        match self.entries.iter_mut().find(|(k, _)| k == keyword) {
            Some((_, fragments)) => fragments.push(fragment),
            None => self.entries.push((keyword.to_string(), vec![fragment])),
        }
    }

    /// Ensure an entry exists for `keyword` without adding a fragment.
    pub fn touch(&mut self, keyword: &str) {
        if !self.entries.iter().any(|(k, _)| k == keyword) {
            self.entries.push((keyword.to_string(), Vec::new()));
        }
    }

    /// Get the fragments captured for a keyword.
    pub fn get(&self, keyword: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, fragments)| fragments.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in first-use order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, fragments)| (k.as_str(), fragments.as_slice()))
    }
}

impl Serialize for KeywordGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, fragments) in &self.entries {
            map.serialize_entry(key, fragments)?;
        }
        map.end()
    }
}

/// One element of a parsed argument sequence: either a positional text
/// fragment or the single trailing keyword group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Argument {
    Fragment(String),
    Keywords(KeywordGroup),
}

impl Argument {
    pub fn fragment(text: impl Into<String>) -> Self {
        Argument::Fragment(text.into())
    }

    /// The fragment text, if this is a positional fragment.
    pub fn as_fragment(&self) -> Option<&str> {
        match self {
            Argument::Fragment(text) => Some(text),
            Argument::Keywords(_) => None,
        }
    }

    /// The keyword group, if this is one.
    pub fn as_keywords(&self) -> Option<&KeywordGroup> {
        match self {
            Argument::Fragment(_) => None,
            Argument::Keywords(group) => Some(group),
        }
    }
}

/// The outcome of resolving one line of input.
///
/// `matched` is true iff `command` is present; `arguments` is always
/// present on a match (empty when the input had no remainder) and absent
/// on a non-match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub matched: bool,
    pub input: Option<String>,
    pub command: Option<String>,
    pub arguments: Option<Vec<Argument>>,
}

impl ParseResult {
    /// The non-matching shape: no command, no arguments, input preserved.
    pub fn no_match(input: Option<&str>) -> Self {
        Self {
            matched: false,
            input: input.map(String::from),
            command: None,
            arguments: None,
        }
    }

    /// The matching shape for a resolved command.
    pub fn matched(input: &str, command: &str, arguments: Vec<Argument>) -> Self {
        Self {
            matched: true,
            input: Some(input.to_string()),
            command: Some(command.to_string()),
            arguments: Some(arguments),
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched
    }
}
