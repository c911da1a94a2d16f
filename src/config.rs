//! Command table loading from TOML configuration.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::registry::{ArgumentDef, CommandDef, CommandRegistry, KeywordDef};

/// Errors that can occur when loading a command table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read command table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("no command table found; set PARLANCE_COMMANDS or create {0}")]
    NotFound(String),
}

/// A command table file. `[[command]]` order is registration order and
/// therefore decides alias-collision ownership.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CommandTable {
    #[serde(rename = "command")]
    pub commands: Vec<CommandConfig>,
}

/// One `[[command]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    /// Command name; underscores render as spaces in the canonical alias.
    pub name: String,

    /// Extra alias phrases beyond the canonical one.
    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Ordered positional arguments (`[[command.argument]]`).
    #[serde(default, rename = "argument")]
    pub arguments: Vec<ArgumentConfig>,

    /// Ordered keywords (`[[command.keyword]]`).
    #[serde(default, rename = "keyword")]
    pub keywords: Vec<KeywordConfig>,
}

/// One `[[command.argument]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentConfig {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// One `[[command.keyword]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordConfig {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl CommandTable {
    /// Load the command table from the default location.
    /// Respects the PARLANCE_COMMANDS env var for testing and overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::table_path();
        match &path {
            Some(path) if path.exists() => Self::load_from(path),
            _ => {
                let shown = path
                    .as_deref()
                    .unwrap_or(Path::new("~/.config/parlance/commands.toml"))
                    .display()
                    .to_string();
                Err(ConfigError::NotFound(shown))
            }
        }
    }

    /// Load the command table from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content)?)
    }

    /// Parse a command table from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve the table path: env override first, then the user config
    /// directory.
    fn table_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("PARLANCE_COMMANDS") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("parlance/commands.toml"))
    }

    /// Build a registry from the table, preserving file order.
    pub fn into_registry(self) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for command in self.commands {
            registry.register(command.into_def());
        }
        registry
    }
}

impl CommandConfig {
    fn into_def(self) -> CommandDef {
        let mut def = CommandDef::new(self.name);
        for alias in self.aliases {
            def = def.alias(alias);
        }
        if let Some(description) = self.description {
            def = def.description(description);
        }
        for argument in self.arguments {
            let mut argument_def = ArgumentDef::new(argument.name).required(argument.required);
            if let Some(description) = argument.description {
                argument_def = argument_def.description(description);
            }
            def = def.argument(argument_def);
        }
        for keyword in self.keywords {
            let mut keyword_def = KeywordDef::new(keyword.name).required(keyword.required);
            if let Some(description) = keyword.description {
                keyword_def = keyword_def.description(description);
            }
            def = def.keyword(keyword_def);
        }
        def
    }
}
