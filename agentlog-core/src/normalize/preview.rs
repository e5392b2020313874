use crate::model::{Block, BlockKind};

pub const TOOL_RESULT_PREVIEW_CHARS: usize = 300;
pub const RESULT_TEXT_PREVIEW_CHARS: usize = 500;
pub const LOG_PREVIEW_CHARS: usize = 500;
pub const JSONISH_PREVIEW_CHARS: usize = 100;
pub const TOOL_ARG_PREVIEW_CHARS: usize = 40;
pub const THINKING_PREVIEW_CHARS: usize = 200;
pub const HOOK_STDOUT_PREVIEW_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub text: String,
    pub truncated: bool,
    pub extra: Option<String>,
}

/// Cuts `text` to `limit` characters without an ellipsis; `extra` reports how
/// many characters were left out.
pub fn preview_text(text: &str, limit: usize) -> Preview {
    match split_at_char(text, limit) {
        Some((head, _)) => Preview {
            text: head.to_string(),
            truncated: true,
            extra: Some(format!("+{} more", overflow(text, limit))),
        },
        None => Preview {
            text: text.to_string(),
            truncated: false,
            extra: None,
        },
    }
}

pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    match split_at_char(text, limit) {
        Some((head, _)) => format!("{head}{ELLIPSIS}"),
        None => text.to_string(),
    }
}

/// Number of characters beyond `limit`.
pub fn overflow(text: &str, limit: usize) -> usize {
    text.chars().count().saturating_sub(limit)
}

/// Block whose preview is `text` cut at `limit` characters plus an ellipsis,
/// carrying the whole text and a `+N chars` note when anything was cut.
pub fn truncated_block(kind: BlockKind, text: &str, limit: usize) -> Block {
    let block = Block::new(kind, truncate_with_ellipsis(text, limit));
    if split_at_char(text, limit).is_none() {
        return block;
    }

    block
        .with_full(text)
        .with_extra(Some(format!("+{} chars", overflow(text, limit))))
}

fn split_at_char(text: &str, limit: usize) -> Option<(&str, &str)> {
    text.char_indices()
        .nth(limit)
        .map(|(index, _)| text.split_at(index))
}
