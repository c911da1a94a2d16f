//! Help text rendering for registered commands.

use crate::format::format_table;
use crate::registry::{CommandDef, CommandRegistry};

const NO_DESCRIPTION: &str = "There is no description for this command.";

/// Render the help text for one command: heading with aliases, the
/// description, then ARGUMENTS and KEYWORDS sections when declared.
pub fn format_command_help(command: &CommandDef) -> String {
    let mut buffer = String::new();

    buffer.push_str(&format!("COMMAND - {}", display_name(command)));
    let extra_aliases: Vec<String> = command
        .aliases
        .iter()
        .skip(1)
        .map(|alias| format!("\"{alias}\""))
        .collect();
    if !extra_aliases.is_empty() {
        buffer.push_str(&format!(" (also {})", extra_aliases.join(", ")));
    }
    buffer.push('\n');

    let description = command.description.as_deref().unwrap_or(NO_DESCRIPTION);
    buffer.push_str(&format!("  {description}\n"));

    if !command.arguments.is_empty() {
        buffer.push_str("\nARGUMENTS\n");
        let entries: Vec<String> = command
            .arguments
            .iter()
            .map(|argument| {
                entry_line(&argument.name, argument.required, argument.description.as_deref())
            })
            .collect();
        buffer.push_str(&entries.join("\n"));
    }

    if !command.keywords.is_empty() {
        buffer.push_str("\nKEYWORDS\n");
        let entries: Vec<String> = command
            .keywords
            .iter()
            .map(|keyword| {
                entry_line(&keyword.name, keyword.required, keyword.description.as_deref())
            })
            .collect();
        buffer.push_str(&entries.join("\n"));
    }

    buffer
}

/// Render the all-commands overview: one row per command with its
/// phrase and description, aligned as a table.
pub fn format_overview(registry: &CommandRegistry) -> String {
    let rows: Vec<Vec<String>> = registry
        .commands()
        .iter()
        .map(|command| {
            vec![
                display_name(command),
                command.description.clone().unwrap_or_default(),
            ]
        })
        .collect();

    format!("COMMANDS\n{}", format_table(&rows, "  "))
}

/// The phrase a user types for the command: its canonical alias.
fn display_name(command: &CommandDef) -> String {
    command
        .aliases
        .first()
        .cloned()
        .unwrap_or_else(|| command.name.replace('_', " "))
}

fn entry_line(name: &str, required: bool, description: Option<&str>) -> String {
    let name = name.replace('_', " ");
    let requirement = if required { "required" } else { "optional" };
    match description {
        Some(description) => format!("  {name} ({requirement}) - {description}\n"),
        None => format!("  {name} ({requirement})\n"),
    }
}
