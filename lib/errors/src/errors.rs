use cursor::Line;

/// The component that detected an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Location {
    #[display(fmt = "scanner")]
    Scanner,
    #[display(fmt = "parser")]
    Parser,
    #[display(fmt = "environment")]
    Environment,
    #[display(fmt = "interpreter")]
    Interpreter,
}

/// A fatal error in any stage of the pipeline.
///
/// Errors are never recovered from: the stage that produces one stops, and
/// nothing downstream of it runs.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error {location}: {message}")]
pub struct LoxError {
    pub line: Line,
    pub location: Location,
    pub message: String,
}

impl LoxError {
    pub fn new(line: Line, location: Location, message: impl ToString) -> Self {
        Self { line, location, message: message.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, LoxError>;
