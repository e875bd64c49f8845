//! Supported collection methods and their argument rules.
//!
//! The table is declarative so that validation, help output, and
//! completion all read from one place.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{QueryError, Result};

use super::splitter::Fragment;

/// A collection method the parser knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Find,
    FindOne,
    Aggregate,
    Count,
    InsertOne,
    InsertMany,
    UpdateOne,
    UpdateMany,
    ReplaceOne,
    DeleteOne,
    DeleteMany,
}

impl Method {
    /// Every supported method, in registry order.
    pub const ALL: [Method; 11] = [
        Method::Find,
        Method::FindOne,
        Method::Aggregate,
        Method::Count,
        Method::InsertOne,
        Method::InsertMany,
        Method::UpdateOne,
        Method::UpdateMany,
        Method::ReplaceOne,
        Method::DeleteOne,
        Method::DeleteMany,
    ];

    /// Returns the registry entry for this method.
    pub fn def(&self) -> &'static MethodDef {
        // METHODS is laid out in declaration order; see test_registry_order.
        &METHODS[*self as usize]
    }

    /// Returns the shell name of the method (e.g. `updateMany`).
    pub fn name(&self) -> &'static str {
        self.def().name
    }

    /// Looks up a method by its exact shell name.
    pub fn from_name(name: &str) -> Option<Self> {
        find_method(name).map(|def| def.method)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = QueryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| QueryError::UnsupportedMethod(s.to_string()))
    }
}

/// What a positional argument means to the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRole {
    /// Selects which documents the method applies to.
    Filter,
    /// Aggregation stage or pipeline.
    Pipeline,
    /// Document to insert.
    Document,
    /// Documents to insert.
    Documents,
    /// Update operators to apply.
    Update,
    /// Whole document that replaces the match.
    Replacement,
}

impl ArgumentRole {
    /// Returns a lowercase label for help output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Pipeline => "pipeline",
            Self::Document => "document",
            Self::Documents => "documents",
            Self::Update => "update",
            Self::Replacement => "replacement",
        }
    }
}

/// Whether a method takes a second argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondArgument {
    /// Only one argument is used.
    Unused,
    /// A second argument must be supplied.
    Required(ArgumentRole),
}

/// Definition of a supported method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// The method this entry describes.
    pub method: Method,
    /// Shell name, matched case-sensitively.
    pub name: &'static str,
    /// Short description shown in help.
    pub description: &'static str,
    /// Fewest arguments accepted.
    pub min_args: usize,
    /// Most arguments accepted.
    pub max_args: usize,
    /// Meaning of the first argument. It defaults to `{}` when omitted.
    pub first_argument: ArgumentRole,
    /// Rule for the second argument.
    pub second_argument: SecondArgument,
}

impl MethodDef {
    /// Returns true if the second argument must be present.
    pub fn requires_second_argument(&self) -> bool {
        matches!(self.second_argument, SecondArgument::Required(_))
    }

    /// Returns a usage line such as `db.<collection>.updateOne(<filter>, <update>)`.
    pub fn usage(&self) -> String {
        match self.second_argument {
            SecondArgument::Unused => format!(
                "db.<collection>.{}([{}])",
                self.name,
                self.first_argument.label()
            ),
            SecondArgument::Required(role) => format!(
                "db.<collection>.{}(<{}>, <{}>)",
                self.name,
                self.first_argument.label(),
                role.label()
            ),
        }
    }
}

/// All supported methods.
pub static METHODS: &[MethodDef] = &[
    MethodDef {
        method: Method::Find,
        name: "find",
        description: "Find documents matching a filter",
        min_args: 0,
        max_args: 1,
        first_argument: ArgumentRole::Filter,
        second_argument: SecondArgument::Unused,
    },
    MethodDef {
        method: Method::FindOne,
        name: "findOne",
        description: "Find the first document matching a filter",
        min_args: 0,
        max_args: 1,
        first_argument: ArgumentRole::Filter,
        second_argument: SecondArgument::Unused,
    },
    MethodDef {
        method: Method::Aggregate,
        name: "aggregate",
        description: "Run an aggregation stage or pipeline",
        min_args: 0,
        max_args: 1,
        first_argument: ArgumentRole::Pipeline,
        second_argument: SecondArgument::Unused,
    },
    MethodDef {
        method: Method::Count,
        name: "count",
        description: "Count documents matching a filter",
        min_args: 0,
        max_args: 1,
        first_argument: ArgumentRole::Filter,
        second_argument: SecondArgument::Unused,
    },
    MethodDef {
        method: Method::InsertOne,
        name: "insertOne",
        description: "Insert a single document",
        min_args: 0,
        max_args: 1,
        first_argument: ArgumentRole::Document,
        second_argument: SecondArgument::Unused,
    },
    MethodDef {
        method: Method::InsertMany,
        name: "insertMany",
        description: "Insert several documents",
        min_args: 0,
        max_args: 1,
        first_argument: ArgumentRole::Documents,
        second_argument: SecondArgument::Unused,
    },
    MethodDef {
        method: Method::UpdateOne,
        name: "updateOne",
        description: "Update the first document matching a filter",
        min_args: 2,
        max_args: 2,
        first_argument: ArgumentRole::Filter,
        second_argument: SecondArgument::Required(ArgumentRole::Update),
    },
    MethodDef {
        method: Method::UpdateMany,
        name: "updateMany",
        description: "Update every document matching a filter",
        min_args: 2,
        max_args: 2,
        first_argument: ArgumentRole::Filter,
        second_argument: SecondArgument::Required(ArgumentRole::Update),
    },
    MethodDef {
        method: Method::ReplaceOne,
        name: "replaceOne",
        description: "Replace the first document matching a filter",
        min_args: 2,
        max_args: 2,
        first_argument: ArgumentRole::Filter,
        second_argument: SecondArgument::Required(ArgumentRole::Replacement),
    },
    MethodDef {
        method: Method::DeleteOne,
        name: "deleteOne",
        description: "Delete the first document matching a filter",
        min_args: 0,
        max_args: 1,
        first_argument: ArgumentRole::Filter,
        second_argument: SecondArgument::Unused,
    },
    MethodDef {
        method: Method::DeleteMany,
        name: "deleteMany",
        description: "Delete every document matching a filter",
        min_args: 0,
        max_args: 1,
        first_argument: ArgumentRole::Filter,
        second_argument: SecondArgument::Unused,
    },
];

/// Finds a method definition by its exact shell name.
pub fn find_method(name: &str) -> Option<&'static MethodDef> {
    METHODS.iter().find(|def| def.name == name)
}

/// Returns method names starting with `prefix`, for completion.
pub fn complete_method(prefix: &str) -> Vec<&'static str> {
    METHODS
        .iter()
        .filter(|def| def.name.starts_with(prefix))
        .map(|def| def.name)
        .collect()
}

/// Arguments that passed validation, still as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArguments<'a> {
    /// Registry entry for the method.
    pub def: &'static MethodDef,
    /// First argument; `None` means it was omitted.
    pub primary: Option<Fragment<'a>>,
    /// Second argument, present only for methods that require one.
    pub secondary: Option<Fragment<'a>>,
}

/// Checks split arguments against the registry rule for `method_name`.
///
/// The method is looked up before any argument is examined, so an unknown
/// method is reported even when its arguments are also wrong.
pub fn validate<'a>(method_name: &str, fragments: &[Fragment<'a>]) -> Result<ValidatedArguments<'a>> {
    let def = find_method(method_name)
        .ok_or_else(|| QueryError::UnsupportedMethod(method_name.to_string()))?;

    if def.requires_second_argument() && fragments.len() < 2 {
        return Err(QueryError::MissingOptions(def.name.to_string()));
    }

    if fragments.len() < def.min_args {
        return Err(QueryError::syntax(format!(
            "{} expects at least {} argument(s), got {}",
            def.name,
            def.min_args,
            fragments.len()
        )));
    }

    if let Some(extra) = fragments.get(def.max_args) {
        return Err(QueryError::syntax_at(
            format!(
                "{} accepts at most {} argument(s), got {}",
                def.name,
                def.max_args,
                fragments.len()
            ),
            extra.offset,
        ));
    }

    let primary = fragments.first().copied();
    let secondary = if def.requires_second_argument() {
        fragments.get(1).copied()
    } else {
        None
    };

    debug!(
        method = def.name,
        has_primary = primary.is_some(),
        has_secondary = secondary.is_some(),
        "validated arguments"
    );

    Ok(ValidatedArguments {
        def,
        primary,
        secondary,
    })
}
