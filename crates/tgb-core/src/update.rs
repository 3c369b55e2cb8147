use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{ChatId, MessageId, UserId},
    errors::Error,
    Result,
};

/// Update kinds this parser recognizes. The kind is found by named-key
/// lookup over this set, so key ordering in the raw payload is irrelevant.
const KNOWN_KINDS: [&str; 5] = [
    "message",
    "edited_message",
    "channel_post",
    "edited_channel_post",
    "callback_query",
];

/// A tagged span within message text (command, mention, url, ...).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Entity {
    #[serde(rename = "type", default = "default_entity_kind")]
    pub kind: String,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub length: usize,
}

fn default_entity_kind() -> String {
    "text".to_string()
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            kind: default_entity_kind(),
            offset: 0,
            length: 0,
        }
    }
}

/// One inbound webhook event, decoded into the fields handlers care about.
///
/// Constructed once per webhook call; immutable afterwards.
#[derive(Clone, Debug)]
pub struct IncomingUpdate {
    pub update_kind: String,
    pub chat_id: Option<ChatId>,
    pub sender_id: Option<UserId>,
    pub message_id: Option<MessageId>,
    pub text: Option<String>,
    pub entities: Vec<Entity>,
}

impl IncomingUpdate {
    /// Decode a raw webhook payload.
    ///
    /// For `callback_query` updates the chat/message ids come from the
    /// nested `message` object; every other kind carries them directly.
    /// A payload with no recognized kind field is `MalformedPayload`.
    pub fn parse(update: &Value) -> Result<Self> {
        let obj = update
            .as_object()
            .ok_or_else(|| Error::MalformedPayload("update is not a JSON object".to_string()))?;

        let (update_kind, body) = KNOWN_KINDS
            .iter()
            .find_map(|k| obj.get(*k).map(|v| (k.to_string(), v)))
            .ok_or_else(|| {
                Error::MalformedPayload("update has no recognized kind field".to_string())
            })?;

        let message = if update_kind == "callback_query" {
            body.get("message").unwrap_or(&Value::Null)
        } else {
            body
        };

        let chat_id = message
            .get("chat")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_i64)
            .map(ChatId);
        let message_id = message
            .get("message_id")
            .and_then(Value::as_i64)
            .map(|id| MessageId(id as i32));
        let sender_id = body
            .get("from")
            .and_then(|f| f.get("id"))
            .and_then(Value::as_i64)
            .map(UserId);
        let text = body.get("text").and_then(Value::as_str).map(str::to_string);

        // One synthetic "text" entity when the payload has none, so
        // `entities[0]` is always indexable downstream.
        let entities = match body.get("entities").and_then(Value::as_array) {
            Some(arr) if !arr.is_empty() => arr
                .iter()
                .map(|e| serde_json::from_value(e.clone()).unwrap_or_default())
                .collect(),
            _ => vec![Entity::default()],
        };

        Ok(Self {
            update_kind,
            chat_id,
            sender_id,
            message_id,
            text,
            entities,
        })
    }

    /// Type of the first entity; `"text"` for plain messages. Total even
    /// for a hand-built update with an empty entity list — `parse` always
    /// supplies the sentinel, but the field is public.
    pub fn message_type(&self) -> &str {
        self.entities.first().map_or("text", |e| e.kind.as_str())
    }
}
