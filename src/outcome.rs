//! Command outcome value type produced by the console.

use serde::Serialize;

use crate::result::ParseResult;

/// Error kind attached to outcomes for input no command matched.
pub const NO_MATCHING_COMMAND_ERROR: &str = "parlance.errors.no_matching_command";

/// An error entry carried by a failed outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeError {
    /// Machine-readable error kind (dotted path).
    pub kind: String,
    /// Human-readable message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OutcomeError {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// The result of dispatching one line of input: what the executor
/// reported, plus the original input and the full parse that produced
/// it. Execution semantics live with the external executor; this type
/// only carries what it returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome {
    /// The resolved command name, absent when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Whether the command reported success.
    pub success: bool,
    /// Error entries, empty on success.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<OutcomeError>,
    /// The original input line, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// The parse that produced this outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParseResult>,
    /// Executor-provided payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandOutcome {
    /// A successful outcome for a command.
    pub fn success(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            success: true,
            errors: Vec::new(),
            input: None,
            parsed: None,
            data: None,
        }
    }

    /// A failed outcome for a command.
    pub fn failure(command: impl Into<String>, error: OutcomeError) -> Self {
        Self {
            command: Some(command.into()),
            success: false,
            errors: vec![error],
            input: None,
            parsed: None,
            data: None,
        }
    }

    /// The outcome synthesized when the parser matched nothing. Carries
    /// the original input on the error entry and the outcome itself.
    pub fn no_matching_command(parsed: ParseResult) -> Self {
        let input = parsed.input.clone();
        let message = match &input {
            Some(text) => format!("no matching command for input {text:?}"),
            None => "no matching command for empty input".to_string(),
        };
        Self {
            command: None,
            success: false,
            errors: vec![OutcomeError::new(NO_MATCHING_COMMAND_ERROR).with_message(message)],
            input,
            parsed: Some(parsed),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// Find an error entry by kind.
    pub fn error(&self, kind: &str) -> Option<&OutcomeError> {
        self.errors.iter().find(|e| e.kind == kind)
    }

    /// Attach the input and parse that produced this outcome.
    pub(crate) fn attach_parse(&mut self, parsed: ParseResult) {
        self.input = parsed.input.clone();
        self.parsed = Some(parsed);
    }
}
