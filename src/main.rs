//! Parlance interactive interpreter entry point.
//!
//! Reads lines from stdin, resolves each against the configured command
//! table, and prints one JSON parse result per line. The built-in `help`
//! command prints formatted help text instead.

use parlance::config::CommandTable;
use parlance::console::Console;
use parlance::help;
use parlance::outcome::CommandOutcome;
use parlance::registry::{ArgumentDef, CommandDef, CommandRegistry};
use parlance::result::Argument;
use parlance::transcript::TranscriptLogger;

use serde_json::json;
use std::io;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Load the command table
    let table = match CommandTable::load() {
        Ok(table) => table,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let mut registry = table.into_registry();
    if !registry.contains("help") {
        registry.register(help_command());
    }

    // The executor renders help against the uncompiled definitions.
    let definitions = registry.clone();
    let compiled = match registry.compile() {
        Ok(compiled) => compiled,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let mut console = Console::new(compiled, move |command, arguments| {
        if command == "help" {
            let text = render_help(&definitions, arguments);
            CommandOutcome::success("help").with_data(json!({ "help": text }))
        } else {
            CommandOutcome::success(command)
        }
    });

    // Transcript logging (if requested)
    if let Ok(path) = std::env::var("PARLANCE_TRANSCRIPT") {
        match TranscriptLogger::open(Path::new(&path)) {
            Ok(mut logger) => {
                console.on_result(move |outcome| {
                    if let Some(parsed) = &outcome.parsed {
                        let _ = logger.log_parse(parsed);
                    }
                });
            }
            Err(error) => eprintln!("transcript error: {error}"),
        }
    }

    console.on_result(|outcome| {
        let help_text = outcome
            .data
            .as_ref()
            .and_then(|data| data.get("help"))
            .and_then(|value| value.as_str());
        if let Some(text) = help_text {
            println!("{text}");
            return;
        }

        if let Some(parsed) = &outcome.parsed {
            match serde_json::to_string(parsed) {
                Ok(line) => println!("{line}"),
                Err(error) => eprintln!("output error: {error}"),
            }
        }
    });

    if let Err(error) = console.run(io::stdin().lock()) {
        eprintln!("input error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// The predefined help command, registered when the table has no `help`.
fn help_command() -> CommandDef {
    CommandDef::new("help")
        .description("Provides information about the requested command.")
        .argument(ArgumentDef::new("command").description("The name of the command to query."))
}

/// Render help for a topic, or the overview when no topic is given.
fn render_help(registry: &CommandRegistry, arguments: &[Argument]) -> String {
    let topic = arguments
        .first()
        .and_then(Argument::as_fragment)
        .filter(|topic| !topic.is_empty());

    match topic {
        Some(topic) => match find_topic(registry, topic) {
            Some(command) => help::format_command_help(command),
            None => format!(
                "Unknown command \"{topic}\".\n\n{}",
                help::format_overview(registry)
            ),
        },
        None => help::format_overview(registry),
    }
}

/// Find a command by name or alias phrase, case-insensitively.
fn find_topic<'a>(registry: &'a CommandRegistry, topic: &str) -> Option<&'a CommandDef> {
    let topic = topic.to_lowercase();
    registry.commands().iter().find(|command| {
        command.name.to_lowercase() == topic || command.aliases.iter().any(|alias| *alias == topic)
    })
}
