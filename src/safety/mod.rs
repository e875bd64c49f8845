//! Command safety classification.
//!
//! Classifies parsed commands as safe, mutating, or destructive so a host
//! can decide whether to ask for confirmation before execution.

mod classifier;

pub use classifier::classify_command;

use std::fmt;

use crate::query::Method;

/// Safety level classification for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SafetyLevel {
    /// Read-only commands that can be auto-executed (find, count, aggregate).
    Safe,
    /// Data modification that requires confirmation (insert, update, replace).
    Mutating,
    /// Commands that remove data, requiring confirmation with a warning.
    Destructive,
}

impl SafetyLevel {
    /// Returns true if this safety level requires user confirmation.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Self::Mutating | Self::Destructive)
    }

    /// Returns true if this safety level should show a warning.
    pub fn requires_warning(&self) -> bool {
        matches!(self, Self::Destructive)
    }

    /// Returns the level a method carries before its arguments are considered.
    pub fn for_method(method: Method) -> Self {
        match method {
            Method::Find | Method::FindOne | Method::Aggregate | Method::Count => Self::Safe,
            Method::InsertOne
            | Method::InsertMany
            | Method::UpdateOne
            | Method::UpdateMany
            | Method::ReplaceOne => Self::Mutating,
            Method::DeleteOne | Method::DeleteMany => Self::Destructive,
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Mutating => write!(f, "Mutating"),
            Self::Destructive => write!(f, "Destructive"),
        }
    }
}

/// Result of classifying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The determined safety level.
    pub level: SafetyLevel,
    /// The method that was classified.
    pub method: Method,
    /// Optional warning message for the user.
    pub warning: Option<String>,
}

impl ClassificationResult {
    /// Creates a new classification result.
    pub fn new(level: SafetyLevel, method: Method) -> Self {
        Self {
            level,
            method,
            warning: None,
        }
    }

    /// Creates a classification result with a warning message.
    pub fn with_warning(level: SafetyLevel, method: Method, warning: impl Into<String>) -> Self {
        Self {
            level,
            method,
            warning: Some(warning.into()),
        }
    }

    /// Returns true if user confirmation is required.
    pub fn requires_confirmation(&self) -> bool {
        self.level.requires_confirmation()
    }

    /// Returns true if a warning should be displayed.
    pub fn requires_warning(&self) -> bool {
        self.level.requires_warning() || self.warning.is_some()
    }
}
