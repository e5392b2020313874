use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::model::{Block, BlockKind};
use crate::normalize::preview::{TOOL_RESULT_PREVIEW_CHARS, truncated_block};
use crate::normalize::pretty_json;

const EMPTY_OUTPUT: &str = "(empty output)";
const STDERR_SEPARATOR: &str = "\n\nSTDERR:\n";
const INTERRUPTED_MARKER: &str = "[interrupted]";

/// Normalizes the outcome of a tool call into one `tool_result` block.
///
/// `raw` is either the text the tool returned or an already structured value.
/// Shell-style results (`stdout`/`stderr`) are laid out for reading, other
/// JSON is pretty-printed and anything else is shown verbatim.
pub fn normalize_tool_result(raw: &Value, explicit_error: bool) -> Block {
    let raw_text = match raw {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        other => Cow::Owned(other.to_string()),
    };

    let reparsed;
    let parsed = match raw {
        Value::String(text) => {
            reparsed = serde_json::from_str::<Value>(text).ok();
            reparsed.as_ref()
        }
        other => Some(other),
    };

    let display = match parsed {
        Some(Value::Object(fields)) if is_shell_output(fields) => shell_display(fields),
        Some(value @ (Value::Object(_) | Value::Array(_))) => pretty_json(value),
        _ => raw_text.to_string(),
    };

    let is_error = explicit_error || mentions_error(&raw_text);
    truncated_block(BlockKind::ToolResult, &display, TOOL_RESULT_PREVIEW_CHARS).with_error(is_error)
}

/// Flattens a list of `{"type":"text","text":...}` parts into one string
/// value; any other shape is returned unchanged.
pub fn flatten_text_parts(content: &Value) -> Cow<'_, Value> {
    let Some(items) = content.as_array() else {
        return Cow::Borrowed(content);
    };
    if items.is_empty() {
        return Cow::Borrowed(content);
    }

    let mut chunks = Vec::with_capacity(items.len());
    for item in items {
        let is_text = item.get("type").and_then(Value::as_str) == Some("text");
        let Some(text) = item.get("text").and_then(Value::as_str).filter(|_| is_text) else {
            return Cow::Borrowed(content);
        };
        chunks.push(text);
    }

    Cow::Owned(Value::String(chunks.join("\n")))
}

fn is_shell_output(fields: &Map<String, Value>) -> bool {
    fields.contains_key("stdout") || fields.contains_key("stderr")
}

fn shell_display(fields: &Map<String, Value>) -> String {
    let stdout = fields
        .get("stdout")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let stderr = fields
        .get("stderr")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let interrupted = fields
        .get("interrupted")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    // Some tools JSON-encode their own stdout.
    let mut display = match serde_json::from_str::<Value>(stdout) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => pretty_json(&value),
        _ => stdout.to_string(),
    };

    if !stderr.is_empty() {
        display.push_str(STDERR_SEPARATOR);
        display.push_str(stderr);
    }

    if interrupted {
        if !display.is_empty() && !display.ends_with('\n') {
            display.push('\n');
        }
        display.push_str(INTERRUPTED_MARKER);
    }

    if display.is_empty() {
        return EMPTY_OUTPUT.to_string();
    }

    display
}

fn mentions_error(raw_text: &str) -> bool {
    raw_text.contains("Error") || raw_text.contains("error")
}
