use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use tgb_core::{
    config::Config,
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    port::MessageActions,
    update::{Entity, IncomingUpdate},
    Result,
};

use crate::{keyboard::InlineKeyboardMarkup, sent::SentMessage};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Authenticated Bot API client.
///
/// Holds only the token and base URL, fixed at construction; the inner
/// `reqwest::Client` is shared and cheap to clone.
#[derive(Clone, Debug)]
pub struct Bot {
    token: String,
    api_url: String,
    http: reqwest::Client,
}

/// Optional `sendMessage` fields.
///
/// `Default` gives the documented defaults: HTML parse mode, everything
/// else off. Each call site gets a fresh value; nothing is shared.
#[derive(Clone, Debug)]
pub struct SendOptions {
    pub parse_mode: String,
    pub reply_to_message_id: Option<i32>,
    pub allow_sending_without_reply: bool,
    pub disable_web_page_preview: bool,
    pub disable_notification: bool,
    pub protect_content: bool,
    pub message_thread_id: Option<i64>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub entities: Option<Vec<Entity>>,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            parse_mode: "HTML".to_string(),
            reply_to_message_id: None,
            allow_sending_without_reply: false,
            disable_web_page_preview: false,
            disable_notification: false,
            protect_content: false,
            message_thread_id: None,
            reply_markup: None,
            entities: None,
        }
    }
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<i32>,
    allow_sending_without_reply: bool,
    disable_web_page_preview: bool,
    disable_notification: bool,
    protect_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_thread_id: Option<i64>,
    // The historical wire format sends these two double-encoded: a JSON
    // string inside the JSON body. The Bot API accepts both; keep parity.
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entities: Option<String>,
}

impl Bot {
    /// Build a client for `token` with the default base URL and a 10s
    /// transport timeout. Fails fast on an empty token; no network call.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_api_url(token, DEFAULT_API_URL, Duration::from_secs(10))
    }

    /// Build from loaded configuration. `TELEGRAM_API_URL` overrides the
    /// base URL (used by the mock-server tests).
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let api_url =
            std::env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_api_url(cfg.bot_token.clone(), &api_url, cfg.http_timeout)
    }

    pub fn with_api_url(token: impl Into<String>, api_url: &str, timeout: Duration) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::MissingCredential("bot token is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// POST one Bot API method and hand back whatever JSON the API
    /// returned, success or not. The caller classifies the body.
    async fn call<B: Serialize + ?Sized>(&self, method: &str, body: &B) -> Result<Value> {
        debug!(method, "telegram api call");
        let resp = self
            .http
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    /// Register `url` as the webhook target. No local validation of the
    /// URL; the remote response body is returned unchanged.
    pub async fn set_webhook(&self, url: &str) -> Result<Value> {
        self.call("setWebhook", &serde_json::json!({ "url": url })).await
    }

    /// Send a text message. On success the returned handle scopes
    /// follow-up edits/deletes to the new message.
    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        options: &SendOptions,
    ) -> Result<SentMessage> {
        let body = SendMessageBody {
            chat_id: chat_id.0,
            text,
            parse_mode: &options.parse_mode,
            reply_to_message_id: options.reply_to_message_id,
            allow_sending_without_reply: options.allow_sending_without_reply,
            disable_web_page_preview: options.disable_web_page_preview,
            disable_notification: options.disable_notification,
            protect_content: options.protect_content,
            message_thread_id: options.message_thread_id,
            reply_markup: options
                .reply_markup
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            entities: options
                .entities
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        };

        let v = self.call("sendMessage", &body).await?;
        if !is_ok(&v) {
            warn!("sendMessage refused by the api");
            return Err(Error::Api(v));
        }

        let result = &v["result"];
        let message_id = result
            .get("message_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                Error::MalformedPayload("sendMessage result has no message_id".to_string())
            })?;
        let chat = result
            .get("chat")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_i64)
            .unwrap_or(chat_id.0);

        let msg = MessageRef {
            chat_id: ChatId(chat),
            message_id: MessageId(message_id as i32),
        };
        Ok(SentMessage::new(msg, Arc::new(self.clone())))
    }

    /// Send `text` into the chat an update came from.
    pub async fn send_to_update(
        &self,
        update: &IncomingUpdate,
        text: &str,
    ) -> Result<SentMessage> {
        let chat_id = update
            .chat_id
            .ok_or_else(|| Error::MalformedPayload("update has no chat id".to_string()))?;
        self.send_message(chat_id, text, &SendOptions::default())
            .await
    }

    /// Reply to the sender of an update, quoting the originating message.
    pub async fn reply_to_update(
        &self,
        update: &IncomingUpdate,
        text: &str,
    ) -> Result<SentMessage> {
        let sender = update
            .sender_id
            .ok_or_else(|| Error::MalformedPayload("update has no sender id".to_string()))?;
        let options = SendOptions {
            reply_to_message_id: update.message_id.map(|m| m.0),
            ..SendOptions::default()
        };
        self.send_message(ChatId(sender.0), text, &options).await
    }

    /// Replace the text of a bot-owned message. Raw response body back.
    pub async fn edit_message_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
    ) -> Result<Value> {
        self.call(
            "editMessageText",
            &serde_json::json!({
                "chat_id": chat_id.0,
                "message_id": message_id.0,
                "text": text,
                "parse_mode": "HTML",
            }),
        )
        .await
    }

    /// Delete a bot-owned message. Raw response body back.
    pub async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<Value> {
        self.call(
            "deleteMessage",
            &serde_json::json!({
                "chat_id": chat_id.0,
                "message_id": message_id.0,
            }),
        )
        .await
    }
}

fn is_ok(v: &Value) -> bool {
    v.get("ok").and_then(Value::as_bool) == Some(true)
}

fn ensure_ok(v: Value) -> Result<()> {
    if is_ok(&v) {
        Ok(())
    } else {
        Err(Error::Api(v))
    }
}

#[async_trait]
impl MessageActions for Bot {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let sent = self
            .send_message(chat_id, text, &SendOptions::default())
            .await?;
        Ok(sent.message_ref())
    }

    async fn edit_text(&self, msg: MessageRef, text: &str) -> Result<()> {
        ensure_ok(self.edit_message_text(msg.chat_id, msg.message_id, text).await?)
    }

    async fn delete(&self, msg: MessageRef) -> Result<()> {
        ensure_ok(self.delete_message(msg.chat_id, msg.message_id).await?)
    }
}
