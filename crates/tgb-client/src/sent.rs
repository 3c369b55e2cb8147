use std::sync::Arc;

use tgb_core::{
    domain::{ChatId, MessageId, MessageRef},
    port::MessageActions,
    Result,
};

/// Handle to a message this bot sent, scoped to its chat/message id pair.
///
/// Holds a shared send/edit/delete capability rather than being a client
/// subtype, so the only thing it can touch is the one message it names.
#[derive(Clone)]
pub struct SentMessage {
    msg: MessageRef,
    actions: Arc<dyn MessageActions>,
}

impl SentMessage {
    pub fn new(msg: MessageRef, actions: Arc<dyn MessageActions>) -> Self {
        Self { msg, actions }
    }

    pub fn chat_id(&self) -> ChatId {
        self.msg.chat_id
    }

    pub fn message_id(&self) -> MessageId {
        self.msg.message_id
    }

    pub fn message_ref(&self) -> MessageRef {
        self.msg
    }

    /// Edit the sent message in place.
    pub async fn edit_text(&self, text: &str) -> Result<()> {
        self.actions.edit_text(self.msg, text).await
    }

    /// Delete the sent message.
    pub async fn delete(&self) -> Result<()> {
        self.actions.delete(self.msg).await
    }
}

impl std::fmt::Debug for SentMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentMessage")
            .field("msg", &self.msg)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingActions {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageActions for RecordingActions {
        async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("send {} {text}", chat_id.0));
            Ok(MessageRef {
                chat_id,
                message_id: MessageId(1),
            })
        }

        async fn edit_text(&self, msg: MessageRef, text: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("edit {}/{} {text}", msg.chat_id.0, msg.message_id.0));
            Ok(())
        }

        async fn delete(&self, msg: MessageRef) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("delete {}/{}", msg.chat_id.0, msg.message_id.0));
            Ok(())
        }
    }

    #[tokio::test]
    async fn handle_stays_scoped_to_its_message() {
        let actions = Arc::new(RecordingActions::default());
        let msg = MessageRef {
            chat_id: ChatId(42),
            message_id: MessageId(5),
        };
        let sent = SentMessage::new(msg, actions.clone());

        sent.edit_text("updated").await.unwrap();
        sent.delete().await.unwrap();

        let calls = actions.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["edit 42/5 updated", "delete 42/5"]);
    }
}
