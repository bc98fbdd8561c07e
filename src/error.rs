//! Error taxonomies for the two phases of the pipeline: compile-time
//! diagnostics (batched) and runtime errors (fatal and immediate).

use thiserror::Error;

/// A single compile-time diagnostic, rendered as
/// `Error [at end, | 'lexeme': ] <description>.`.
#[derive(Debug, Error, Clone)]
#[error("{}", render(.at_end, .lexeme.as_deref(), .message))]
pub struct CompileDiagnostic {
    pub line: u32,
    pub at_end: bool,
    pub lexeme: Option<String>,
    pub message: String,
}

fn render(at_end: bool, lexeme: Option<&str>, message: &str) -> String {
    if at_end {
        format!("Error at end, {message}.")
    } else if let Some(lexeme) = lexeme {
        format!("Error '{lexeme}': {message}.")
    } else {
        format!("Error {message}.")
    }
}

impl CompileDiagnostic {
    pub fn new(line: u32, at_end: bool, lexeme: Option<String>, message: impl Into<String>) -> Self {
        CompileDiagnostic {
            line,
            at_end,
            lexeme,
            message: message.into(),
        }
    }
}

/// All diagnostics accumulated by one compile, surfaced together so the
/// caller can report every error at once.
#[derive(Debug, Error)]
#[error("compilation failed with {} error(s)", .0.len())]
pub struct CompileError(pub Vec<CompileDiagnostic>);

/// A fatal, immediate failure raised during VM execution. Rendered as
/// `Runtime Error: <message>.`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RuntimeError {
    #[error("Runtime Error: Operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("Runtime Error: Operand must be a number.")]
    OperandMustBeNumber,
    #[error("Runtime Error: Undefined variable '{0}'.")]
    UndefinedVariable(String),
    #[error("Runtime Error: subscript target must be a list.")]
    NotAList,
    #[error("Runtime Error: subscript index must be a number.")]
    SubscriptNotNumber,
    #[error("Runtime Error: list index out of bounds.")]
    IndexOutOfBounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_lexeme() {
        let diag = CompileDiagnostic::new(1, false, Some("foo".to_string()), "expected ';'");
        assert_eq!(diag.to_string(), "Error 'foo': expected ';'.");
    }

    #[test]
    fn renders_at_end() {
        let diag = CompileDiagnostic::new(1, true, None, "expected expression");
        assert_eq!(diag.to_string(), "Error at end, expected expression.");
    }

    #[test]
    fn runtime_error_format() {
        assert_eq!(
            RuntimeError::UndefinedVariable("a".to_string()).to_string(),
            "Runtime Error: Undefined variable 'a'."
        );
    }
}
