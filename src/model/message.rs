//! Chat message blobs.
//!
//! A JSON blob written by the chat application for one conversational turn
//! looks like `{"role": "...", "content": ...}` where `content` is either a
//! plain string or an array of typed parts. The content shape is decided
//! once, at decode time.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

// ===== Role =====

/// Author of a chat message, used to pick a display color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// `"user"`
    User,
    /// `"assistant"`
    Assistant,
    /// `"system"`
    System,
    /// `"tool"`
    Tool,
    /// Any other role string, including the empty one.
    Other(String),
}

impl Role {
    /// Parse a role string as written in the blob.
    pub fn parse(role: &str) -> Self {
        match role {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "system" => Self::System,
            "tool" => Self::Tool,
            other => Self::Other(other.to_string()),
        }
    }

    /// The role string this variant stands for.
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Tool => "tool",
            Self::Other(s) => s,
        }
    }
}

// ===== ContentPart =====

/// One typed fragment of an array-shaped `content`, e.g. `{"type":"text","text":"..."}`.
///
/// Missing and `null` fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentPart {
    #[serde(default, rename = "type", deserialize_with = "null_as_empty")]
    kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    text: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContentPart {
    /// Build a part from its type and text.
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }

    /// Advisory part type ("text", "image", ...). Not needed for rendering.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Text of the part, empty for non-text parts.
    pub fn text(&self) -> &str {
        &self.text
    }
}

// ===== MessageContent =====

/// Shape of the `content` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Missing or `null`.
    Absent,
    /// A plain JSON string.
    Text(String),
    /// An array of typed parts.
    Parts(Vec<ContentPart>),
    /// Any other JSON value (object, number, mixed array, ...).
    Other,
}

/// Untagged mirror of the two recognized content shapes.
///
/// `null` elements of a parts array are dropped.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawContent {
    Text(String),
    Parts(Vec<Option<ContentPart>>),
}

impl MessageContent {
    /// Classify a decoded `content` value.
    pub fn classify(value: Option<&Value>) -> Self {
        let value = match value {
            None | Some(Value::Null) => return Self::Absent,
            Some(value) => value,
        };
        match RawContent::deserialize(value) {
            Ok(RawContent::Text(text)) => Self::Text(text),
            Ok(RawContent::Parts(parts)) => Self::Parts(parts.into_iter().flatten().collect()),
            Err(_) => Self::Other,
        }
    }

    /// Flatten the content into display text.
    ///
    /// Parts with empty text are skipped; the rest are joined by `\n` in order.
    /// Absent and unrecognized content flatten to the empty string.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Parts(parts) => {
                let texts: Vec<&str> = parts
                    .iter()
                    .map(ContentPart::text)
                    .filter(|t| !t.is_empty())
                    .collect();
                Cow::Owned(texts.join("\n"))
            }
            Self::Absent | Self::Other => Cow::Borrowed(""),
        }
    }
}

// ===== ChatMessage =====

/// Why a JSON blob could not be read as a message object.
#[derive(Debug, Error)]
pub enum MessageDecodeError {
    /// The bytes are not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is an array, string or scalar.
    #[error("top-level JSON value is not an object")]
    NotAnObject,

    /// `role` is present with a non-string value.
    #[error("role field is not a string")]
    RoleNotString,
}

/// A decoded JSON blob with the `{role, content}` convention.
///
/// Any JSON object decodes; missing fields are empty. Whether it is a chat
/// message in the display sense is decided by [`ChatMessage::is_chat_turn`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    role: String,
    content: MessageContent,
    raw_content: Option<Value>,
}

impl ChatMessage {
    /// Decode a JSON blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not JSON, the top-level value is not
    /// an object, or `role` is present with a non-string value.
    pub fn decode(bytes: &[u8]) -> Result<Self, MessageDecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(mut object) = value else {
            return Err(MessageDecodeError::NotAnObject);
        };

        let role = match object.get("role") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(role)) => role.clone(),
            Some(_) => return Err(MessageDecodeError::RoleNotString),
        };

        let raw_content = object.remove("content");
        let content = MessageContent::classify(raw_content.as_ref());

        Ok(Self {
            role,
            content,
            raw_content,
        })
    }

    /// Role string as written (may be empty).
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Role parsed into its color class.
    pub fn role_kind(&self) -> Role {
        Role::parse(&self.role)
    }

    /// Classified content shape.
    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    /// The undecoded `content` value, `None` only when the key is missing.
    ///
    /// An explicit `null` is kept so it renders on the generic JSON path.
    pub fn raw_content(&self) -> Option<&Value> {
        self.raw_content.as_ref()
    }

    /// Flattened content text.
    pub fn display_text(&self) -> Cow<'_, str> {
        self.content.display_text()
    }

    /// True when both role and flattened text are non-empty.
    pub fn is_chat_turn(&self) -> bool {
        !self.role.is_empty() && !self.display_text().is_empty()
    }
}
