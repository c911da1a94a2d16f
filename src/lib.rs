//! Parlance - free-text command interpreter.
//!
//! Resolves a raw line of user text against an alias table into a
//! command name plus structured positional and keyword arguments, and
//! hands the result to an external executor through a console with
//! ordered result handlers.

pub mod config;
pub mod console;
pub mod format;
pub mod help;
pub mod outcome;
pub mod parser;
pub mod registry;
pub mod result;
pub mod tokenizer;
pub mod transcript;

pub use config::{CommandTable, ConfigError};
pub use console::{Console, OutcomeFilter, OutputSink, StringSink};
pub use outcome::{CommandOutcome, OutcomeError, NO_MATCHING_COMMAND_ERROR};
pub use parser::{ParseError, Parser};
pub use registry::{ArgumentDef, CommandDef, CommandRegistry, CompiledRegistry, KeywordDef};
pub use result::{Argument, KeywordGroup, ParseResult};
pub use tokenizer::ArgumentsTokenizer;
