use serde_json::Value;

pub mod preview;
pub mod tool_call;
pub mod tool_result;

pub use preview::{Preview, preview_text, truncate_with_ellipsis};
pub use tool_call::{format_tool_args, format_tool_name};
pub use tool_result::normalize_tool_result;

/// Two-space indented JSON used wherever a structure is shown in full.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
