//! Command registry: alias table, argument and keyword schemas.

use thiserror::Error;

use crate::tokenizer::ArgumentsTokenizer;

/// Errors that can occur when compiling a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to build keyword pattern for command '{command}': {source}")]
    Pattern {
        command: String,
        #[source]
        source: regex::Error,
    },
}

/// A positional argument declared by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDef {
    pub name: String,
    pub required: bool,
    pub description: Option<String>,
}

impl ArgumentDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A keyword declared by a command. Multi-word keywords use underscores
/// in the name ("on_top_of"); the matched phrase renders them as spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordDef {
    pub name: String,
    pub required: bool,
    pub description: Option<String>,
}

impl KeywordDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The phrase matched in input text: underscores become spaces.
    pub fn phrase(&self) -> String {
        self.name.replace('_', " ")
    }
}

/// A registered command: canonical name, alias phrases, and the argument
/// and keyword schema the external executor validates against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDef {
    pub name: String,
    pub aliases: Vec<String>,
    pub arguments: Vec<ArgumentDef>,
    pub keywords: Vec<KeywordDef>,
    pub description: Option<String>,
}

impl CommandDef {
    /// Create a command. The canonical alias is derived from the name
    /// with underscores rendered as spaces ("go_to" matches "go to").
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let canonical = name.replace('_', " ").to_lowercase();
        Self {
            name,
            aliases: vec![canonical],
            arguments: Vec::new(),
            keywords: Vec::new(),
            description: None,
        }
    }

    /// Add an extra alias phrase. Stored lowercased; matching is
    /// case-insensitive on input.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into().to_lowercase());
        self
    }

    pub fn argument(mut self, argument: ArgumentDef) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn keyword(mut self, keyword: KeywordDef) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Keyword phrases in declaration order, for the tokenizer.
    pub fn keyword_phrases(&self) -> Vec<String> {
        self.keywords.iter().map(KeywordDef::phrase).collect()
    }
}

/// The alias table. Commands are stored in registration order, and that
/// order is the tie-breaker everywhere it matters: when two commands
/// register the same alias string, the first-registered command owns it.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Re-registering a name replaces the earlier
    /// definition in place, keeping its position in the order.
    pub fn register(&mut self, command: CommandDef) -> &mut Self {
        match self.commands.iter_mut().find(|c| c.name == command.name) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Commands in registration order.
    pub fn commands(&self) -> &[CommandDef] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Pre-build the alias candidate list and per-command tokenizers.
    pub fn compile(self) -> Result<CompiledRegistry, RegistryError> {
        let mut candidates: Vec<(String, usize)> = Vec::new();
        for (index, command) in self.commands.iter().enumerate() {
            for alias in &command.aliases {
                let alias = alias.to_lowercase();
                // First-registered command keeps a colliding alias.
                if !candidates.iter().any(|(existing, _)| *existing == alias) {
                    candidates.push((alias, index));
                }
            }
        }
        // Longest alias first; ties broken by reverse lexical order for
        // determinism. "go to" is tried before "go".
        candidates.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| b.cmp(a)));

        let tokenizers = self
            .commands
            .iter()
            .map(|command| {
                ArgumentsTokenizer::new(command.keyword_phrases()).map_err(|source| {
                    RegistryError::Pattern {
                        command: command.name.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledRegistry {
            registry: self,
            candidates,
            tokenizers,
        })
    }
}

/// A registry with pre-sorted alias candidates and pre-compiled keyword
/// tokenizers, ready for parsing.
#[derive(Debug, Clone)]
pub struct CompiledRegistry {
    registry: CommandRegistry,
    // (lowercased alias, command index), longest alias first.
    candidates: Vec<(String, usize)>,
    tokenizers: Vec<ArgumentsTokenizer>,
}

impl CompiledRegistry {
    /// Alias candidates in match-priority order.
    pub fn candidates(&self) -> impl Iterator<Item = (&str, &CommandDef, &ArgumentsTokenizer)> {
        self.candidates.iter().map(|(alias, index)| {
            (
                alias.as_str(),
                &self.registry.commands[*index],
                &self.tokenizers[*index],
            )
        })
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn get(&self, name: &str) -> Option<&CommandDef> {
        self.registry.get(name)
    }
}
