//! Rendering of parsed commands for display.
//!
//! Independent of where the text ends up (terminal, file, another process).

use serde_json::json;

use crate::config::OutputFormat;
use crate::error::{AppError, AppResult};
use crate::query::Command;
use crate::safety::ClassificationResult;

/// Renders a command and its classification in the requested format.
pub fn render(
    command: &Command,
    classification: &ClassificationResult,
    format: OutputFormat,
    pretty: bool,
) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(command, classification)),
        OutputFormat::Json => render_json(command, classification, pretty),
    }
}

fn render_text(command: &Command, classification: &ClassificationResult) -> String {
    let mut out = format!(
        "{command}\n\
         collection: {}\n\
         method:     {}\n\
         safety:     {}\n",
        command.collection_name(),
        command.method(),
        classification.level
    );
    if let Some(warning) = &classification.warning {
        out.push_str(&format!("warning:    {warning}\n"));
    }
    out
}

fn render_json(
    command: &Command,
    classification: &ClassificationResult,
    pretty: bool,
) -> AppResult<String> {
    let mut doc = command.to_json();
    doc["safety"] = json!({
        "level": classification.level.to_string(),
        "requiresConfirmation": classification.requires_confirmation(),
        "warning": classification.warning,
    });

    let rendered = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    rendered.map_err(|e| AppError::output(format!("Failed to serialize command: {e}")))
}
