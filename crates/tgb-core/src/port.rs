use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    Result,
};

/// Send/edit/delete capability of the bot client.
///
/// Sent-message handles hold this instead of the concrete client, so they
/// stay scoped to one message and tests can substitute an in-memory
/// implementation.
#[async_trait]
pub trait MessageActions: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;
    async fn edit_text(&self, msg: MessageRef, text: &str) -> Result<()>;
    async fn delete(&self, msg: MessageRef) -> Result<()>;
}
