//! Console dispatch: wires the parser to an executor and result handlers.

use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;

use crate::outcome::{CommandOutcome, OutcomeError};
use crate::parser::Parser;
use crate::registry::CompiledRegistry;
use crate::result::Argument;

/// Input lines that end an interactive session.
const EXIT_STRINGS: &[&str] = &["exit"];

/// Destination for console output and error text.
pub trait OutputSink {
    fn output(&mut self, text: &str);

    fn error(&mut self, text: &str) {
        self.output(text);
    }
}

/// Sink that writes output to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct StdioSink;

impl OutputSink for StdioSink {
    fn output(&mut self, text: &str) {
        println!("{text}");
    }

    fn error(&mut self, text: &str) {
        eprintln!("{text}");
    }
}

/// Sink that buffers output and error text, for tests and capture.
#[derive(Debug, Default)]
pub struct StringSink {
    output: String,
    error: String,
}

impl StringSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_string(&self) -> &str {
        &self.output
    }

    pub fn error_string(&self) -> &str {
        &self.error
    }
}

impl OutputSink for StringSink {
    fn output(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn error(&mut self, text: &str) {
        self.error.push_str(text);
        self.error.push('\n');
    }
}

// Lets a caller keep a handle on a sink it hands to the console.
impl<S: OutputSink> OutputSink for Rc<RefCell<S>> {
    fn output(&mut self, text: &str) {
        self.borrow_mut().output(text);
    }

    fn error(&mut self, text: &str) {
        self.borrow_mut().error(text);
    }
}

/// Filter applied by command-specific result handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeFilter {
    Any,
    Success,
    Failure,
}

impl OutcomeFilter {
    fn accepts(self, outcome: &CommandOutcome) -> bool {
        match self {
            OutcomeFilter::Any => true,
            OutcomeFilter::Success => outcome.success,
            OutcomeFilter::Failure => outcome.is_failure(),
        }
    }
}

type Executor = Box<dyn FnMut(&str, &[Argument]) -> CommandOutcome>;
type Handler = Box<dyn FnMut(&CommandOutcome)>;

/// Dispatches lines of input: parse, execute, notify handlers.
///
/// Handlers are a plain ordered list and run in registration order after
/// every dispatched line, matched or not.
pub struct Console {
    registry: CompiledRegistry,
    executor: Executor,
    handlers: Vec<Handler>,
    sink: Box<dyn OutputSink>,
}

impl Console {
    /// Create a console over a compiled registry. The executor receives
    /// the resolved command name and its parsed arguments.
    pub fn new(
        registry: CompiledRegistry,
        executor: impl FnMut(&str, &[Argument]) -> CommandOutcome + 'static,
    ) -> Self {
        Self {
            registry,
            executor: Box::new(executor),
            handlers: Vec::new(),
            sink: Box::new(StdioSink),
        }
    }

    /// Replace the output sink.
    pub fn with_sink(mut self, sink: impl OutputSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn registry(&self) -> &CompiledRegistry {
        &self.registry
    }

    /// Register a handler invoked for every outcome.
    pub fn on_result(&mut self, handler: impl FnMut(&CommandOutcome) + 'static) -> &mut Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Register a handler for outcomes of a named command, filtered to
    /// all outcomes, successes only, or failures only.
    pub fn on_command(
        &mut self,
        name: impl Into<String>,
        filter: OutcomeFilter,
        mut handler: impl FnMut(&CommandOutcome) + 'static,
    ) -> &mut Self {
        let name = name.into();
        self.on_result(move |outcome| {
            if outcome.command.as_deref() == Some(&name) && filter.accepts(outcome) {
                handler(outcome);
            }
        })
    }

    /// Register a handler for every failed outcome.
    pub fn on_error(&mut self, mut handler: impl FnMut(&CommandOutcome) + 'static) -> &mut Self {
        self.on_result(move |outcome| {
            if outcome.is_failure() {
                handler(outcome);
            }
        })
    }

    /// Register a handler for failures carrying a specific error kind.
    /// The handler also receives the matching error entry.
    pub fn on_error_kind(
        &mut self,
        kind: impl Into<String>,
        mut handler: impl FnMut(&CommandOutcome, &OutcomeError) + 'static,
    ) -> &mut Self {
        let kind = kind.into();
        self.on_result(move |outcome| {
            if !outcome.is_failure() {
                return;
            }
            if let Some(error) = outcome.error(&kind) {
                handler(outcome, error);
            }
        })
    }

    /// Dispatch one line of input. Unmatched input produces the
    /// no-matching-command failure outcome rather than an error.
    pub fn input(&mut self, raw: Option<&str>) -> CommandOutcome {
        let parsed = Parser::new(&self.registry).parse(raw);

        let outcome = if parsed.is_match() {
            let command = parsed.command.clone().unwrap_or_default();
            let arguments = parsed.arguments.clone().unwrap_or_default();
            let mut outcome = (self.executor)(&command, &arguments);
            outcome.attach_parse(parsed);
            outcome
        } else {
            CommandOutcome::no_matching_command(parsed)
        };

        for handler in &mut self.handlers {
            handler(&outcome);
        }

        outcome
    }

    /// Read trimmed lines from `reader` and dispatch each one until EOF
    /// or an exit string. Output is the handlers' business.
    pub fn run<R: BufRead>(&mut self, reader: R) -> io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if EXIT_STRINGS.contains(&line) {
                break;
            }
            self.input(Some(line));
        }
        Ok(())
    }

    pub fn output(&mut self, text: &str) {
        self.sink.output(text);
    }

    pub fn error(&mut self, text: &str) {
        self.sink.error(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::NO_MATCHING_COMMAND_ERROR;
    use crate::registry::{CommandDef, CommandRegistry, KeywordDef};

    fn compiled() -> CompiledRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDef::new("jump").alias("leap"));
        registry.register(CommandDef::new("cast").keyword(KeywordDef::new("on")));
        registry.compile().unwrap()
    }

    fn echo_console() -> Console {
        Console::new(compiled(), |command, _| CommandOutcome::success(command))
    }

    #[test]
    fn test_input_executes_matched_command() {
        let mut console = echo_console();
        let outcome = console.input(Some("leap across the chasm"));

        assert!(outcome.success);
        assert_eq!(outcome.command.as_deref(), Some("jump"));
        assert_eq!(outcome.input.as_deref(), Some("leap across the chasm"));

        let parsed = outcome.parsed.unwrap();
        assert_eq!(parsed.command.as_deref(), Some("jump"));
    }

    #[test]
    fn test_input_without_match_synthesizes_failure() {
        let mut console = echo_console();
        let outcome = console.input(Some("defenestrate"));

        assert!(outcome.is_failure());
        assert!(outcome.command.is_none());
        assert!(outcome.error(NO_MATCHING_COMMAND_ERROR).is_some());
        assert_eq!(outcome.input.as_deref(), Some("defenestrate"));
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut console = echo_console();
        for label in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            console.on_result(move |_| seen.borrow_mut().push(label));
        }

        console.input(Some("jump"));
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_on_command_filters_by_name() {
        let hits = Rc::new(RefCell::new(0));
        let mut console = echo_console();
        {
            let hits = Rc::clone(&hits);
            console.on_command("jump", OutcomeFilter::Any, move |_| {
                *hits.borrow_mut() += 1;
            });
        }

        console.input(Some("jump"));
        console.input(Some("cast fireball on goblin"));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_on_command_success_filter() {
        let hits = Rc::new(RefCell::new(0));
        let mut console = Console::new(compiled(), |command, _| {
            CommandOutcome::failure(command, OutcomeError::new("example.errors.refused"))
        });
        {
            let hits = Rc::clone(&hits);
            console.on_command("jump", OutcomeFilter::Success, move |_| {
                *hits.borrow_mut() += 1;
            });
        }

        console.input(Some("jump"));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_on_error_sees_unmatched_input() {
        let hits = Rc::new(RefCell::new(0));
        let mut console = echo_console();
        {
            let hits = Rc::clone(&hits);
            console.on_error(move |_| *hits.borrow_mut() += 1);
        }

        console.input(Some("jump"));
        console.input(Some("defenestrate"));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_on_error_kind_receives_matching_entry() {
        let kinds = Rc::new(RefCell::new(Vec::new()));
        let mut console = echo_console();
        {
            let kinds = Rc::clone(&kinds);
            console.on_error_kind(NO_MATCHING_COMMAND_ERROR, move |_, error| {
                kinds.borrow_mut().push(error.kind.clone());
            });
        }

        console.input(Some("defenestrate"));
        assert_eq!(*kinds.borrow(), vec![NO_MATCHING_COMMAND_ERROR.to_string()]);
    }

    #[test]
    fn test_run_stops_at_exit_string() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut console = echo_console();
        {
            let seen = Rc::clone(&seen);
            console.on_result(move |outcome| {
                seen.borrow_mut().push(outcome.input.clone());
            });
        }

        let script = b"jump\nexit\ncast fireball on goblin\n" as &[u8];
        console.run(script).unwrap();

        assert_eq!(*seen.borrow(), vec![Some("jump".to_string())]);
    }

    #[test]
    fn test_run_trims_lines() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut console = echo_console();
        {
            let seen = Rc::clone(&seen);
            console.on_result(move |outcome| {
                seen.borrow_mut().push(outcome.command.clone());
            });
        }

        console.run(b"  jump  \n" as &[u8]).unwrap();
        assert_eq!(*seen.borrow(), vec![Some("jump".to_string())]);
    }

    #[test]
    fn test_string_sink_buffers() {
        let sink = Rc::new(RefCell::new(StringSink::new()));
        let mut console = echo_console().with_sink(Rc::clone(&sink));

        console.output("You leap across the chasm.");
        console.error("You fall.");

        assert_eq!(sink.borrow().output_string(), "You leap across the chasm.\n");
        assert_eq!(sink.borrow().error_string(), "You fall.\n");
    }
}
