use std::sync::Arc;

use crate::domain::{ChatApi, ChatRequest};
use crate::use_cases::error_message::Access;
use crate::use_cases::view::{ViewContext, ViewScope};

pub const GREETING: &str = "Hi! I'm your AI Beauty Consultant. How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

// Consultant chat widget. Failures become bot lines instead of a banner.
pub struct ChatView {
    ctx: ViewContext,
    scope: ViewScope,
    api: Arc<dyn ChatApi>,
    messages: Vec<ChatMessage>,
    sending: bool,
}

impl ChatView {
    pub fn new(ctx: ViewContext, api: Arc<dyn ChatApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            api,
            messages: vec![ChatMessage::bot(GREETING)],
            sending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // Blank input is ignored. Returns the bot line that was appended.
    #[tracing::instrument(skip_all)]
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: input.to_string(),
        });
        self.sending = true;

        let request = ChatRequest {
            message: input.to_string(),
        };
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.api.send(request, self.scope.token()),
            )
            .await;
        self.sending = false;

        if self.scope.is_unmounted() {
            return None;
        }
        let line = match result {
            Ok(reply) => ChatMessage::bot(reply.reply),
            Err(message) => ChatMessage::bot(message.text),
        };
        self.messages.push(line);
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;
    use crate::use_cases::error_message::NETWORK_TEXT;
    use crate::use_cases::test_support::{FakeBackend, context};

    #[tokio::test]
    async fn when_chat_opens_then_greeting_is_the_only_message() {
        let (ctx, _) = context(Some("token"));
        let view = ChatView::new(ctx, Arc::new(FakeBackend::new()));

        assert_eq!(view.messages(), &[ChatMessage::bot(GREETING)]);
    }

    #[tokio::test]
    async fn when_input_is_blank_then_nothing_is_sent() {
        let (ctx, _) = context(Some("token"));
        let backend = FakeBackend::new();
        let mut view = ChatView::new(ctx, Arc::new(backend.clone()));

        assert!(view.send("   ").await.is_none());

        assert_eq!(view.messages().len(), 1);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn when_reply_arrives_then_user_and_bot_lines_are_appended() {
        let (ctx, _) = context(Some("token"));
        let mut view = ChatView::new(ctx, Arc::new(FakeBackend::new()));

        let reply = view.send("Best cleanser?").await.cloned();

        assert_eq!(reply, Some(ChatMessage::bot("Try a gentle cleanser.")));
        let senders: Vec<_> = view.messages().iter().map(|message| message.sender).collect();
        assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot]);
        assert!(!view.is_sending());
    }

    #[tokio::test]
    async fn when_chat_fails_then_classified_text_is_appended() {
        let (ctx, _) = context(Some("token"));
        let backend = FakeBackend::new();
        backend.fail("chat", ApiError::network("reset"));
        let mut view = ChatView::new(ctx, Arc::new(backend));

        view.send("hello").await;

        assert_eq!(
            view.messages().last().map(|message| message.text.as_str()),
            Some(NETWORK_TEXT)
        );
    }
}
