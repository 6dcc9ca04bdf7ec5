//! Decoding of individual session log lines.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Type discriminator of a session log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKind {
    /// Assistant turn; the only kind that carries `tool_use` blocks in practice.
    Assistant,
    /// User turn, including tool results sent back to the assistant.
    User,
    #[default]
    Other,
}

impl RecordKind {
    fn from_type(value: Option<&str>) -> Self {
        match value {
            Some("assistant") => Self::Assistant,
            Some("user") => Self::User,
            _ => Self::Other,
        }
    }
}

/// One decoded JSON object from a session log line.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub kind: RecordKind,
    /// Raw timestamp string, parsed later so a bad value doesn't reject the record.
    pub timestamp: Option<String>,
    /// Working directory the session was started in.
    pub cwd: Option<String>,
    pub session_id: Option<String>,
    pub content: Option<MessageContent>,
}

/// Message content can be a string, an array of content blocks, or something unexpected.
#[derive(Debug, Clone)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    Other(Value),
}

impl MessageContent {
    /// Array elements that aren't block objects are dropped one by one, so a
    /// stray element never hides the blocks next to it.
    fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::Blocks(
                items
                    .into_iter()
                    .filter_map(|item| match ContentBlock::deserialize(item) {
                        Ok(block) => Some(block),
                        Err(e) => {
                            tracing::trace!(error = %e, "skipping malformed content block");
                            None
                        }
                    })
                    .collect(),
            ),
            other => Self::Other(other),
        }
    }
}

/// A content block in a message (text, `tool_use`, `tool_result`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub block_type: Option<String>,
    /// Unique id of a `tool_use` block.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Tool name of a `tool_use` block.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Tool arguments; the shape depends on the tool.
    pub input: Option<Value>,
}

impl ContentBlock {
    /// Whether this block is a tool invocation.
    pub fn is_tool_use(&self) -> bool {
        self.block_type.as_deref() == Some("tool_use")
    }
}

/// Wire shape of a record; converted into [`RawRecord`].
///
/// Every field is optional and a value of the wrong type reads as absent.
#[derive(Debug, Deserialize)]
struct RecordHeader {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    record_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    cwd: Option<String>,
    #[serde(rename = "sessionId", default, deserialize_with = "lenient_string")]
    session_id: Option<String>,
    message: Option<Value>,
}

/// A string field, or `None` for anything else.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl RawRecord {
    /// Content blocks of the message, empty when the content isn't a block array.
    pub fn blocks(&self) -> &[ContentBlock] {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks,
            _ => &[],
        }
    }
}

impl From<RecordHeader> for RawRecord {
    fn from(header: RecordHeader) -> Self {
        let content = header
            .message
            .and_then(|mut message| message.get_mut("content").map(Value::take))
            .filter(|content| !content.is_null())
            .map(MessageContent::from_value);

        Self {
            kind: RecordKind::from_type(header.record_type.as_deref()),
            timestamp: header.timestamp,
            cwd: header.cwd,
            session_id: header.session_id,
            content,
        }
    }
}

/// Parse one session log line.
///
/// Returns `None` for blank lines, malformed JSON and JSON values that aren't
/// objects. Such lines are skipped by the caller; nothing here is fatal.
pub fn parse_line(line: &str) -> Option<RawRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            tracing::trace!(error = %e, "skipping malformed JSON line");
            return None;
        }
    };

    if !value.is_object() {
        tracing::trace!("skipping non-object JSON line");
        return None;
    }

    match RecordHeader::deserialize(value) {
        Ok(header) => Some(header.into()),
        Err(e) => {
            tracing::trace!(error = %e, "skipping undecodable record");
            None
        }
    }
}
