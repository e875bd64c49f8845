//! Matches the overall `db.<collection>.<method>(<args>)` shape.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{QueryError, Result};

use super::splitter::{split_arguments, Fragment};

// The collection is one or more dot-separated segments (`system.users`); a
// segment may contain `-` but not end with it. The method is the last
// identifier before the argument list.
static COMMAND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^db\.(?P<collection>[A-Za-z_$](?:[\w$-]*[\w$])?(?:\.[A-Za-z_$](?:[\w$-]*[\w$])?)*)\.(?P<method>[A-Za-z_$][\w$]*)\s*\((?P<args>.*)\)$",
    )
    .expect("valid regex")
});

/// The pieces of a command that matched the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandShape<'a> {
    /// Collection name between `db.` and the method.
    pub collection: &'a str,
    /// Method name, not yet checked against the registry.
    pub method: &'a str,
    /// Top-level arguments; offsets are relative to the full input.
    pub arguments: Vec<Fragment<'a>>,
}

/// Matches `input` against the command shape and splits its arguments.
///
/// Surrounding whitespace is ignored. Anything else that does not fit
/// (wrong prefix, unbalanced brackets, text after the closing parenthesis,
/// blank input) is a syntax error.
pub fn match_command(input: &str) -> Result<CommandShape<'_>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QueryError::syntax("blank query"));
    }
    let lead = input.len() - input.trim_start().len();

    let captures = COMMAND_REGEX.captures(trimmed).ok_or_else(|| {
        QueryError::syntax_at("expected db.<collection>.<method>(<arguments>)", lead)
    })?;

    // All three groups are mandatory in the pattern.
    let (Some(collection), Some(method), Some(args)) = (
        captures.name("collection"),
        captures.name("method"),
        captures.name("args"),
    ) else {
        return Err(QueryError::syntax_at("malformed command", lead));
    };

    let base = lead + args.start();
    let arguments = split_arguments(args.as_str())
        .map_err(|e| QueryError::Syntax(e.shifted(base)))?
        .into_iter()
        .map(|fragment| fragment.shifted(base))
        .collect::<Vec<_>>();

    debug!(
        collection = collection.as_str(),
        method = method.as_str(),
        arguments = arguments.len(),
        "matched command shape"
    );

    Ok(CommandShape {
        collection: collection.as_str(),
        method: method.as_str(),
        arguments,
    })
}
