use serde_json::Value;

use crate::event::{
    AgentEvent, AssistantEvent, ContentBlock, ErrorEvent, ResultEvent, SystemEvent, UserEvent,
};
use crate::model::{Block, BlockKind, FormattedLog, LogTone};
use crate::normalize::preview::{
    HOOK_STDOUT_PREVIEW_CHARS, JSONISH_PREVIEW_CHARS, LOG_PREVIEW_CHARS,
    RESULT_TEXT_PREVIEW_CHARS, THINKING_PREVIEW_CHARS, preview_text, truncate_with_ellipsis,
    truncated_block,
};
use crate::normalize::tool_call::tool_call_block;
use crate::normalize::tool_result::{flatten_text_parts, normalize_tool_result};
use crate::normalize::pretty_json;
use crate::unwrap::unwrap_double_encoded;

const CATEGORY_SYSTEM: &str = "system";
const CATEGORY_ASSISTANT: &str = "assistant";
const CATEGORY_TOOL_RESULT: &str = "tool_result";
const CATEGORY_RESULT: &str = "result";
const CATEGORY_ERROR: &str = "error";
const CATEGORY_LOG: &str = "log";
const CATEGORY_DATA: &str = "data";

const UNRECOGNIZED_MESSAGE: &str = "unrecognized message format";
const UNRECOGNIZED_TOOL_RESULT: &str = "unrecognized tool result format";
const JSON_DATA: &str = "JSON data";
const UNKNOWN: &str = "unknown";

/// Decodes one record's text into display blocks.
///
/// Never fails: text that matches no known event shape still produces a
/// single best-effort block.
pub fn decode(content: &str) -> FormattedLog {
    let effective = unwrap_double_encoded(content);
    let Ok(value) = serde_json::from_str::<Value>(&effective) else {
        return decode_unstructured(content);
    };

    match AgentEvent::classify(&value) {
        AgentEvent::System(event) => decode_system(&event, &value),
        AgentEvent::Assistant(event) => decode_assistant(&event, &value),
        AgentEvent::User(event) => decode_user(&event, &value),
        AgentEvent::Result(event) => decode_result(&event),
        AgentEvent::Error(event) => decode_error(&event, &value),
        AgentEvent::Unrecognized(_) => decode_unstructured(content),
    }
}

fn decode_system(event: &SystemEvent, raw: &Value) -> FormattedLog {
    let subtype = event.subtype.as_deref().filter(|subtype| !subtype.is_empty());
    let category = subtype.map_or_else(
        || CATEGORY_SYSTEM.to_string(),
        |subtype| format!("{CATEGORY_SYSTEM}/{subtype}"),
    );

    let block = match subtype {
        Some("init") => Block::new(
            BlockKind::Text,
            format!(
                "Session started ({}, {} tools)",
                event.model.as_deref().unwrap_or(UNKNOWN),
                event.tools.as_ref().map_or(0, Vec::len)
            ),
        ),
        Some("hook_response") => hook_block(event),
        _ => {
            let text = event
                .message
                .as_ref()
                .or(event.content.as_ref())
                .and_then(display_value)
                .unwrap_or_else(|| pretty_json(raw));
            Block::new(BlockKind::Text, text)
        }
    };

    FormattedLog::new(category, LogTone::Info, vec![block])
}

fn hook_block(event: &SystemEvent) -> Block {
    let header = format!("Hook: {}", event.hook_name().unwrap_or(UNKNOWN));
    let Some(stdout) = event.stdout.as_deref().filter(|stdout| !stdout.is_empty()) else {
        return Block::new(BlockKind::Text, header);
    };

    Block::new(
        BlockKind::Text,
        format!(
            "{header}\n{}",
            truncate_with_ellipsis(stdout, HOOK_STDOUT_PREVIEW_CHARS)
        ),
    )
    .with_full(format!("{header}\n{stdout}"))
}

fn decode_assistant(event: &AssistantEvent, raw: &Value) -> FormattedLog {
    let blocks = event
        .message
        .as_ref()
        .and_then(|message| message.content.as_ref())
        .map(assistant_blocks)
        .unwrap_or_default();

    let blocks = if blocks.is_empty() {
        vec![unrecognized_block(UNRECOGNIZED_MESSAGE, raw)]
    } else {
        blocks
    };

    FormattedLog::new(CATEGORY_ASSISTANT, LogTone::Accent, blocks)
}

fn assistant_blocks(content: &Value) -> Vec<Block> {
    match content {
        Value::String(text) if !text.trim().is_empty() => {
            vec![Block::new(BlockKind::Text, text.clone())]
        }
        Value::Array(items) => items
            .iter()
            .filter_map(|item| assistant_block(ContentBlock::parse(item)))
            .collect(),
        _ => Vec::new(),
    }
}

fn assistant_block(item: ContentBlock) -> Option<Block> {
    match item {
        ContentBlock::Text { text } => text.map(|text| Block::new(BlockKind::Text, text)),
        ContentBlock::ToolUse { name, input } => {
            let name = name.as_deref().unwrap_or(UNKNOWN);
            Some(tool_call_block(name, input.as_ref().unwrap_or(&Value::Null)))
        }
        ContentBlock::Thinking { thinking, text } => {
            let thinking = thinking.or(text).filter(|text| !text.trim().is_empty())?;
            Some(thinking_block(&thinking))
        }
        ContentBlock::ToolResult { .. } | ContentBlock::Other => None,
    }
}

fn thinking_block(text: &str) -> Block {
    let preview = preview_text(text, THINKING_PREVIEW_CHARS);
    let block = Block::new(BlockKind::Thinking, preview.text);
    if !preview.truncated {
        return block;
    }

    block.with_full(text).with_extra(preview.extra)
}

fn decode_user(event: &UserEvent, raw: &Value) -> FormattedLog {
    let mut blocks = Vec::new();

    if let Some(result) = event.tool_use_result() {
        blocks.push(normalize_tool_result(result, false));
    } else if let Some(Value::Array(items)) = event
        .message
        .as_ref()
        .and_then(|message| message.content.as_ref())
    {
        for item in items {
            let ContentBlock::ToolResult { content, is_error } = ContentBlock::parse(item) else {
                continue;
            };
            let content = content.unwrap_or_else(|| Value::String(String::new()));
            blocks.push(normalize_tool_result(
                &flatten_text_parts(&content),
                is_error.unwrap_or(false),
            ));
        }
    }

    if blocks.is_empty() {
        blocks.push(unrecognized_block(UNRECOGNIZED_TOOL_RESULT, raw));
    }

    FormattedLog::new(CATEGORY_TOOL_RESULT, LogTone::Tool, blocks)
}

fn decode_result(event: &ResultEvent) -> FormattedLog {
    let is_error = event.is_error.unwrap_or(false);
    let mut blocks = vec![Block::new(BlockKind::Summary, result_summary(event)).with_error(is_error)];

    if let Some(text) = event.result.as_deref().filter(|text| !text.is_empty()) {
        blocks.push(truncated_block(
            BlockKind::Text,
            text,
            RESULT_TEXT_PREVIEW_CHARS,
        ));
    }

    let tone = if is_error {
        LogTone::Danger
    } else {
        LogTone::Success
    };
    FormattedLog::new(CATEGORY_RESULT, tone, blocks)
}

fn result_summary(event: &ResultEvent) -> String {
    let mut parts = Vec::new();

    if let Some(subtype) = event.subtype.as_deref().filter(|subtype| !subtype.is_empty()) {
        parts.push(subtype.to_string());
    }
    if let Some(turns) = event.num_turns {
        parts.push(format!("{} turns", format_count(turns)));
    }
    if let Some(duration_ms) = event.duration_ms.filter(|ms| ms.abs() > f64::EPSILON) {
        parts.push(format!("{:.1}s", duration_ms / 1000.0));
    }
    if let Some(cost) = event.total_cost_usd.filter(|cost| cost.abs() > f64::EPSILON) {
        parts.push(format!("${cost:.4}"));
    }

    if parts.is_empty() {
        return "Done".to_string();
    }
    format!("Done ({})", parts.join(", "))
}

fn format_count(count: f64) -> String {
    if count.fract() == 0.0 {
        format!("{count:.0}")
    } else {
        count.to_string()
    }
}

fn decode_error(event: &ErrorEvent, raw: &Value) -> FormattedLog {
    let text = event
        .error
        .as_ref()
        .and_then(error_value_text)
        .or_else(|| event.message.as_ref().and_then(display_value))
        .unwrap_or_else(|| pretty_json(raw));

    FormattedLog::new(
        CATEGORY_ERROR,
        LogTone::Danger,
        vec![Block::new(BlockKind::Text, text).with_error(true)],
    )
}

/// Fallback for text that is not a recognized event, including text that is
/// not JSON at all.
fn decode_unstructured(content: &str) -> FormattedLog {
    if is_json_document(content) {
        tracing::debug!("record is JSON of an unknown shape");
        return FormattedLog::new(
            CATEGORY_DATA,
            LogTone::Muted,
            vec![Block::new(BlockKind::RawJson, JSON_DATA).with_full(content)],
        );
    }

    let block = if looks_like_json(content) && serde_json::from_str::<Value>(content).is_err() {
        tracing::debug!("record looks like malformed JSON");
        Block::new(
            BlockKind::RawJson,
            truncate_with_ellipsis(content, JSONISH_PREVIEW_CHARS),
        )
        .with_full(content)
    } else {
        truncated_block(BlockKind::Text, content, LOG_PREVIEW_CHARS)
    };

    FormattedLog::new(CATEGORY_LOG, LogTone::Muted, vec![block])
}

fn unrecognized_block(reason: &str, raw: &Value) -> Block {
    Block::new(BlockKind::RawJson, reason).with_full(pretty_json(raw))
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(pretty_json(other)),
    }
}

fn error_value_text(value: &Value) -> Option<String> {
    if let Some(message) = value.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    display_value(value)
}

fn is_json_document(content: &str) -> bool {
    let trimmed = content.trim();
    let bracketed = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    bracketed && serde_json::from_str::<Value>(trimmed).is_ok()
}

fn looks_like_json(content: &str) -> bool {
    content.contains('"')
        && content.contains(|c: char| matches!(c, ':' | '{' | '}' | '[' | ']'))
}
