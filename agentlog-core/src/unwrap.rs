use std::borrow::Cow;

use serde_json::Value;

/// Reverses one level of double JSON encoding.
///
/// Some producers serialize a JSON document and then serialize that text again
/// as a JSON string. When `content` decodes to such a string and the inner text
/// is itself valid JSON, the inner text is returned. Anything else returns
/// `content` untouched.
pub fn unwrap_double_encoded(content: &str) -> Cow<'_, str> {
    let Ok(Value::String(inner)) = serde_json::from_str::<Value>(content) else {
        return Cow::Borrowed(content);
    };

    let trimmed = inner.trim_start();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return Cow::Borrowed(content);
    }

    if serde_json::from_str::<Value>(&inner).is_err() {
        return Cow::Borrowed(content);
    }

    tracing::trace!("unwrapped double-encoded record ({} chars)", inner.len());
    Cow::Owned(inner)
}
