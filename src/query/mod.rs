//! Shell query parsing for db-query.
//!
//! Turns text such as `db.users.updateMany({ active: false }, { $set: { archived: true } })`
//! into a [`Command`]. The pipeline runs in a fixed order:
//! 1. [`grammar`] matches the `db.<collection>.<method>(...)` shape and
//!    [`splitter`] breaks the argument list into fragments
//! 2. [`registry`] checks the method and its arity
//! 3. [`literal`] parses each argument into a [`Value`]
//!
//! The first failure is returned unchanged.

pub mod command;
pub mod grammar;
pub mod literal;
pub mod registry;
pub mod splitter;
pub mod value;

pub use command::Command;
pub use literal::parse_literal;
pub use registry::{ArgumentRole, Method, MethodDef, SecondArgument, METHODS};
pub use value::{Document, ObjectId, Value};

use tracing::debug;

use crate::error::{QueryError, Result};

/// Parses one shell command.
///
/// Empty text is a missing-input error; everything else goes through the
/// full pipeline.
pub fn parse_command(raw_text: &str) -> Result<Command> {
    if raw_text.is_empty() {
        return Err(QueryError::MissingInput);
    }

    let shape = grammar::match_command(raw_text)?;
    let args = registry::validate(shape.method, &shape.arguments)?;
    let command = Command::from_validated(raw_text, shape.collection, args)?;

    debug!(
        collection = command.collection_name(),
        method = %command.method(),
        "parsed command"
    );
    Ok(command)
}

/// Async entry point for hosts whose query calls are all futures.
///
/// Parsing finishes before the future resolves; there is nothing to cancel.
pub async fn create_query(raw_text: Option<&str>) -> Result<Command> {
    match raw_text {
        Some(text) => parse_command(text),
        None => Err(QueryError::MissingInput),
    }
}
