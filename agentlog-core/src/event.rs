//! Typed view of one transcript event.
//!
//! Events are told apart by their `type` field. Fields are read leniently: a
//! field holding the wrong kind of JSON value counts as missing, so one odd
//! field never turns a known event into an unrecognized one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent<'a> {
    System(SystemEvent),
    Assistant(AssistantEvent),
    User(UserEvent),
    Result(ResultEvent),
    Error(ErrorEvent),
    Unrecognized(&'a Value),
}

impl<'a> AgentEvent<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match TaggedEvent::deserialize(value) {
            Ok(TaggedEvent::System(event)) => Self::System(event),
            Ok(TaggedEvent::Assistant(event)) => Self::Assistant(event),
            Ok(TaggedEvent::User(event)) => Self::User(event),
            Ok(TaggedEvent::Result(event)) => Self::Result(event),
            Ok(TaggedEvent::Error(event)) => Self::Error(event),
            Err(err) => {
                tracing::debug!("unrecognized event shape: {err}");
                Self::Unrecognized(value)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedEvent {
    System(SystemEvent),
    Assistant(AssistantEvent),
    User(UserEvent),
    Result(ResultEvent),
    Error(ErrorEvent),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub subtype: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tools: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub hook_name: Option<String>,
    #[serde(default, rename = "hookName", deserialize_with = "lenient")]
    pub hook_name_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stdout: Option<String>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
}

impl SystemEvent {
    pub fn hook_name(&self) -> Option<&str> {
        self.hook_name
            .as_deref()
            .or(self.hook_name_camel.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssistantEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<MessageBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserEvent {
    #[serde(default)]
    pub tool_use_result: Option<Value>,
    #[serde(default, rename = "toolUseResult")]
    pub tool_use_result_camel: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<MessageBody>,
}

impl UserEvent {
    /// The top-level tool result, under either spelling.
    pub fn tool_use_result(&self) -> Option<&Value> {
        self.tool_use_result
            .as_ref()
            .or(self.tool_use_result_camel.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub subtype: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_error: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub num_turns: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_cost_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorEvent {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

/// One entry of a message's `content` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default, deserialize_with = "lenient")]
        text: Option<String>,
    },
    ToolUse {
        #[serde(default, deserialize_with = "lenient")]
        name: Option<String>,
        #[serde(default)]
        input: Option<Value>,
    },
    Thinking {
        #[serde(default, deserialize_with = "lenient")]
        thinking: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        text: Option<String>,
    },
    ToolResult {
        #[serde(default)]
        content: Option<Value>,
        #[serde(default, deserialize_with = "lenient")]
        is_error: Option<bool>,
    },
    #[serde(other)]
    Other,
}

impl ContentBlock {
    pub fn parse(item: &Value) -> Self {
        Self::deserialize(item).unwrap_or(Self::Other)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
