//! Classification of parsed commands by safety level.

use crate::query::{Command, Method};

use super::{ClassificationResult, SafetyLevel};

const DELETE_WARNING: &str = "This action cannot be undone.";
const DELETE_ALL_WARNING: &str =
    "Empty filter: this will delete every document in the collection. This action cannot be undone.";
const UPDATE_ALL_WARNING: &str = "Empty filter: this update matches every document in the collection.";

/// Classifies a parsed command.
///
/// Deletes always carry a warning. Updates and deletes of many documents
/// with an empty filter get a stronger one, since they touch the whole
/// collection.
pub fn classify_command(command: &Command) -> ClassificationResult {
    let method = command.method();
    let level = SafetyLevel::for_method(method);
    let matches_everything = command.primary_argument().is_empty_object();

    match method {
        Method::DeleteMany if matches_everything => {
            ClassificationResult::with_warning(level, method, DELETE_ALL_WARNING)
        }
        Method::DeleteOne | Method::DeleteMany => {
            ClassificationResult::with_warning(level, method, DELETE_WARNING)
        }
        Method::UpdateMany if matches_everything => {
            ClassificationResult::with_warning(level, method, UPDATE_ALL_WARNING)
        }
        _ => ClassificationResult::new(level, method),
    }
}
