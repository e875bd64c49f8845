//! db-query - parse shell-style document database commands.
//!
//! This library exposes the parser and its supporting modules for the `dbq`
//! binary and for integration tests.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;
pub mod safety;

pub use error::{QueryError, SyntaxError};
pub use query::{create_query, parse_command, Command, Method, ObjectId, Value};
