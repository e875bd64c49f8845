//! The parsed, validated command handed to executors and displays.

use std::fmt;

use serde_json::json;

use crate::error::{QueryError, Result};

use super::literal::parse_literal;
use super::registry::{Method, ValidatedArguments};
use super::splitter::Fragment;
use super::value::Value;

/// A shell command that passed the grammar, registry, and literal checks.
///
/// Immutable once built: accessors only.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    raw_text: String,
    collection_name: String,
    method: Method,
    primary_argument: Value,
    secondary_argument: Option<Value>,
}

impl Command {
    /// Builds a command from validated arguments, parsing their literals.
    ///
    /// An omitted first argument becomes `{}`. The second argument is parsed
    /// only when the method requires one.
    pub(crate) fn from_validated(
        raw_text: &str,
        collection_name: &str,
        args: ValidatedArguments<'_>,
    ) -> Result<Self> {
        let primary_argument = match args.primary {
            Some(fragment) => parse_fragment(fragment)?,
            None => Value::empty_object(),
        };
        let secondary_argument = args.secondary.map(parse_fragment).transpose()?;

        Ok(Self {
            raw_text: raw_text.to_string(),
            collection_name: collection_name.to_string(),
            method: args.def.method,
            primary_argument,
            secondary_argument,
        })
    }

    /// The text exactly as it was typed.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Collection the command targets.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// First argument: a filter, document, or pipeline depending on the method.
    pub fn primary_argument(&self) -> &Value {
        &self.primary_argument
    }

    /// Second argument (update document or replacement), if the method uses one.
    pub fn secondary_argument(&self) -> Option<&Value> {
        self.secondary_argument.as_ref()
    }

    pub fn has_secondary_argument(&self) -> bool {
        self.secondary_argument.is_some()
    }

    /// Renders the command as JSON for consumers that exchange documents.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "rawQuery": self.raw_text,
            "collection": self.collection_name,
            "method": self.method.name(),
            "query": self.primary_argument.to_json(),
            "queryOptions": self.secondary_argument.as_ref().map(Value::to_json),
            "extractOptions": self.has_secondary_argument(),
        })
    }
}

fn parse_fragment(fragment: Fragment<'_>) -> Result<Value> {
    parse_literal(fragment.text).map_err(|e| QueryError::Syntax(e.shifted(fragment.offset)))
}

/// Canonical form: `db.<collection>.<method>(<args>)`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "db.{}.{}({}",
            self.collection_name, self.method, self.primary_argument
        )?;
        if let Some(secondary) = &self.secondary_argument {
            write!(f, ", {secondary}")?;
        }
        f.write_str(")")
    }
}
