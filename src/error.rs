//! Error types for db-query.
//!
//! `QueryError` covers everything that can go wrong while turning shell text
//! into a [`Command`](crate::query::Command). `AppError` wraps it together
//! with the configuration and I/O failures of the command-line front end.

use thiserror::Error;

/// Diagnostic detail attached to a syntax failure.
///
/// The public message of a syntax failure is always `Invalid query`; this
/// carries what the parser actually tripped over.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}{}", offset_suffix(.offset))]
pub struct SyntaxError {
    /// What went wrong.
    pub reason: String,
    /// Byte offset into the text being parsed, when known.
    pub offset: Option<usize>,
}

impl SyntaxError {
    /// Creates a syntax error without position information.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            offset: None,
        }
    }

    /// Creates a syntax error pointing at a byte offset.
    pub fn at(reason: impl Into<String>, offset: usize) -> Self {
        Self {
            reason: reason.into(),
            offset: Some(offset),
        }
    }

    /// Shifts the offset so it is relative to an enclosing text.
    pub fn shifted(self, base: usize) -> Self {
        Self {
            offset: self.offset.map(|o| o + base),
            ..self
        }
    }
}

fn offset_suffix(offset: &Option<usize>) -> String {
    offset
        .map(|o| format!(" (at offset {o})"))
        .unwrap_or_default()
}

/// Failure to turn raw text into a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No text was supplied at all.
    #[error("Query - parse() : rawQuery is required")]
    MissingInput,

    /// Text does not follow the command or literal grammar.
    #[error("Invalid query")]
    Syntax(SyntaxError),

    /// Well-formed command naming a method outside the registry.
    #[error("{0} is not a supported query")]
    UnsupportedMethod(String),

    /// Known method whose required second argument is absent.
    #[error("query options are required for mongo {0}")]
    MissingOptions(String),
}

impl QueryError {
    /// Creates a syntax error without position information.
    pub fn syntax(reason: impl Into<String>) -> Self {
        Self::Syntax(SyntaxError::new(reason))
    }

    /// Creates a syntax error at a byte offset.
    pub fn syntax_at(reason: impl Into<String>, offset: usize) -> Self {
        Self::Syntax(SyntaxError::at(reason, offset))
    }

    /// Returns the syntax diagnostic, if this is a syntax error.
    pub fn syntax_detail(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(detail) => Some(detail),
            _ => None,
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingInput => "Missing Input Error",
            Self::Syntax(_) => "Syntax Error",
            Self::UnsupportedMethod(_) => "Unsupported Method Error",
            Self::MissingOptions(_) => "Missing Options Error",
        }
    }
}

impl From<SyntaxError> for QueryError {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax(err)
    }
}

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum AppError {
    /// The query could not be parsed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Configuration errors (unreadable or invalid config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering output failed.
    #[error("Output error: {0}")]
    Output(String),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an output error with the given message.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Query(e) => e.category(),
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Output(_) => "Output Error",
        }
    }
}

/// Result type alias for parsing.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Result type alias for the command-line front end.
pub type AppResult<T> = std::result::Result<T, AppError>;
