use serde_json::Value;

use crate::model::{Block, BlockKind};
use crate::normalize::preview::{TOOL_ARG_PREVIEW_CHARS, truncate_with_ellipsis};
use crate::normalize::pretty_json;

const MCP_NAMESPACE: &str = "mcp";
const MAX_PREVIEW_ARGS: usize = 3;

/// `mcp__<server>__<tool>` becomes `<server>:<tool>`; other names pass through.
pub fn format_tool_name(name: &str) -> String {
    let segments = name.splitn(3, "__").collect::<Vec<_>>();
    match segments.as_slice() {
        [namespace, server, tool] if *namespace == MCP_NAMESPACE => format!("{server}:{tool}"),
        _ => name.to_string(),
    }
}

/// Compact `(key=value, ...)` summary of the first few tool arguments.
pub fn format_tool_args(input: &Value) -> String {
    let Some(args) = input.as_object() else {
        return String::new();
    };
    if args.is_empty() {
        return String::new();
    }

    let mut parts = args
        .iter()
        .take(MAX_PREVIEW_ARGS)
        .map(|(key, value)| format!("{key}={}", format_arg_value(value)))
        .collect::<Vec<_>>();

    let hidden = hidden_arg_count(input);
    if hidden > 0 {
        parts.push(format!("+{hidden} more"));
    }

    format!("({})", parts.join(", "))
}

pub fn tool_call_block(name: &str, input: &Value) -> Block {
    let block = Block::new(BlockKind::ToolCall, format_tool_args(input))
        .with_label(format_tool_name(name));

    let has_args = input.as_object().is_some_and(|args| !args.is_empty());
    if !has_args {
        return block;
    }

    let hidden = hidden_arg_count(input);
    block
        .with_full(pretty_json(input))
        .with_extra((hidden > 0).then(|| format!("+{hidden} more fields")))
}

fn hidden_arg_count(input: &Value) -> usize {
    input
        .as_object()
        .map_or(0, |args| args.len().saturating_sub(MAX_PREVIEW_ARGS))
}

fn format_arg_value(value: &Value) -> String {
    match value {
        Value::String(text) => truncate_with_ellipsis(text, TOOL_ARG_PREVIEW_CHARS),
        other => truncate_with_ellipsis(&other.to_string(), TOOL_ARG_PREVIEW_CHARS),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::model::BlockKind;
    use crate::normalize::tool_call::{format_tool_args, format_tool_name, tool_call_block};

    #[test]
    fn mcp_names_are_shortened() {
        assert_eq!(format_tool_name("mcp__search__query"), "search:query");
        assert_eq!(
            format_tool_name("mcp__github__create__issue"),
            "github:create__issue"
        );
    }

    #[test]
    fn other_names_pass_through() {
        assert_eq!(format_tool_name("Bash"), "Bash");
        assert_eq!(format_tool_name("mcp__search"), "mcp__search");
        assert_eq!(format_tool_name("tools__search__query"), "tools__search__query");
    }

    #[test]
    fn args_preview_lists_first_three_in_order() {
        let input = json!({"b": 1, "a": "two", "c": true, "d": null, "e": [1]});
        assert_eq!(format_tool_args(&input), "(b=1, a=two, c=true, +2 more)");
    }

    #[test]
    fn non_string_values_are_serialized_then_truncated() {
        let input = json!({"list": (0..30).collect::<Vec<_>>()});
        let preview = format_tool_args(&input);
        assert!(preview.starts_with("(list=[0,1,2,3,"));
        assert!(preview.ends_with("...)"));
        assert_eq!(preview.chars().count(), "(list=".len() + 40 + "...)".len());
    }

    #[test]
    fn empty_args_give_empty_preview() {
        assert_eq!(format_tool_args(&json!({})), "");
        assert_eq!(format_tool_args(&json!(null)), "");

        let block = tool_call_block("Read", &json!({}));
        assert_eq!(block.preview, "");
        assert!(!block.expandable);
        assert_eq!(block.full, None);
    }

    #[test]
    fn tool_call_block_carries_pretty_args() {
        let input = json!({"command": "ls -la", "timeout": 5, "cwd": "/", "env": {}});
        let block = tool_call_block("Bash", &input);
        assert_eq!(block.kind, BlockKind::ToolCall);
        assert_eq!(block.label.as_deref(), Some("Bash"));
        assert_eq!(block.preview, "(command=ls -la, timeout=5, cwd=/, +1 more)");
        assert!(block.expandable);
        assert_eq!(
            block.full.as_deref(),
            Some("{\n  \"command\": \"ls -la\",\n  \"timeout\": 5,\n  \"cwd\": \"/\",\n  \"env\": {}\n}")
        );
        assert_eq!(block.extra.as_deref(), Some("+1 more fields"));
    }
}
