use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub sequence: i64,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Text,
    ToolCall,
    Thinking,
    ToolResult,
    Summary,
    RawJson,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::ToolCall => write!(f, "tool_call"),
            Self::Thinking => write!(f, "thinking"),
            Self::ToolResult => write!(f, "tool_result"),
            Self::Summary => write!(f, "summary"),
            Self::RawJson => write!(f, "raw_json"),
        }
    }
}

/// Symbolic icon tag; the rendering layer maps it to a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Message,
    Tool,
    Thought,
    Output,
    Check,
    Braces,
    Alert,
}

impl Icon {
    pub fn for_block(kind: BlockKind, is_error: bool) -> Self {
        if is_error {
            return Self::Alert;
        }

        match kind {
            BlockKind::Text => Self::Message,
            BlockKind::ToolCall => Self::Tool,
            BlockKind::Thinking => Self::Thought,
            BlockKind::ToolResult => Self::Output,
            BlockKind::Summary => Self::Check,
            BlockKind::RawJson => Self::Braces,
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Tool => write!(f, "tool"),
            Self::Thought => write!(f, "thought"),
            Self::Output => write!(f, "output"),
            Self::Check => write!(f, "check"),
            Self::Braces => write!(f, "braces"),
            Self::Alert => write!(f, "alert"),
        }
    }
}

/// Color/priority tag attached to a whole decoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogTone {
    Info,
    Accent,
    Tool,
    Success,
    Danger,
    Muted,
}

impl fmt::Display for LogTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Accent => write!(f, "accent"),
            Self::Tool => write!(f, "tool"),
            Self::Success => write!(f, "success"),
            Self::Danger => write!(f, "danger"),
            Self::Muted => write!(f, "muted"),
        }
    }
}

/// One unit of displayable content extracted from a record.
///
/// `full` is only ever stored when it differs from `preview`, so
/// `expandable` and `full.is_some()` always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub icon: Icon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
    pub expandable: bool,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl Block {
    pub fn new(kind: BlockKind, preview: impl Into<String>) -> Self {
        Self {
            kind,
            icon: Icon::for_block(kind, false),
            label: None,
            preview: preview.into(),
            full: None,
            expandable: false,
            is_error: false,
            extra: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_full(mut self, full: impl Into<String>) -> Self {
        let full = full.into();
        if full == self.preview {
            self.full = None;
            self.expandable = false;
        } else {
            self.full = Some(full);
            self.expandable = true;
        }
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: Option<String>) -> Self {
        self.extra = extra;
        self
    }

    #[must_use]
    pub fn with_error(mut self, is_error: bool) -> Self {
        self.is_error = is_error;
        self.icon = Icon::for_block(self.kind, is_error);
        self
    }

    /// The complete content of the block, whether or not it was truncated.
    pub fn full_text(&self) -> &str {
        self.full.as_deref().unwrap_or(&self.preview)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedLog {
    pub category: String,
    pub tone: LogTone,
    pub blocks: Vec<Block>,
}

impl FormattedLog {
    pub fn new(category: impl Into<String>, tone: LogTone, blocks: Vec<Block>) -> Self {
        Self {
            category: category.into(),
            tone,
            blocks,
        }
    }

    pub fn has_error(&self) -> bool {
        self.blocks.iter().any(|block| block.is_error)
    }
}

/// Key for caller-owned UI state (expanded, copied) attached to one block.
pub fn block_key(record_id: &str, block: &Block, index: usize) -> String {
    format!("{record_id}:{}:{index}", block.kind)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub sequence: i64,
    pub log: FormattedLog,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub expand: bool,
}

#[cfg(test)]
mod tests {
    use crate::model::{Block, BlockKind, Icon, block_key};

    #[test]
    fn full_equal_to_preview_is_not_stored() {
        let block = Block::new(BlockKind::Text, "hello").with_full("hello");
        assert_eq!(block.full, None);
        assert!(!block.expandable);
    }

    #[test]
    fn full_longer_than_preview_is_expandable() {
        let block = Block::new(BlockKind::Text, "hel...").with_full("hello world");
        assert_eq!(block.full.as_deref(), Some("hello world"));
        assert!(block.expandable);
        assert_eq!(block.full_text(), "hello world");
    }

    #[test]
    fn error_flag_switches_icon() {
        let block = Block::new(BlockKind::Summary, "Done");
        assert_eq!(block.icon, Icon::Check);
        let block = block.with_error(true);
        assert_eq!(block.icon, Icon::Alert);
    }

    #[test]
    fn block_key_combines_record_kind_and_index() {
        let block = Block::new(BlockKind::ToolCall, "(q=1)");
        assert_eq!(block_key("rec-7", &block, 2), "rec-7:tool_call:2");
    }
}
