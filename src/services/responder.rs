// src/services/responder.rs
use std::convert::Infallible;

use async_trait::async_trait;
use axum::response::sse::Event;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::message::CallerMetadata;
use crate::services::embed_store::EmbedConfig;
use crate::services::session_store::{SessionStore, TurnRole};

pub type ChatStream = BoxStream<'static, Result<Event, Infallible>>;

/// Produces the streamed reply for one chat turn. The endpoint hands the
/// connection over to the stream returned here; the responder owns it
/// until completion or abort.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn stream(
        &self,
        embed: EmbedConfig,
        message: String,
        session_id: String,
        context: Option<String>,
        caller: Option<CallerMetadata>,
    ) -> Result<ChatStream, AppError>;
}

#[derive(Debug, PartialEq)]
pub enum Intent {
    Greeting,
    Farewell,
    Help,
    Unknown,
}

pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("hello") || msg_lower.contains("hi") || msg_lower.contains("hey") {
        Intent::Greeting
    } else if msg_lower.contains("bye") || msg_lower.contains("goodbye") {
        Intent::Farewell
    } else if msg_lower.contains("help") || msg_lower.contains("support") {
        Intent::Help
    } else {
        Intent::Unknown
    }
}

/// Rule-based responder keeping conversation history in a [`SessionStore`].
/// Stands in for an LLM-backed responder behind the same trait.
#[derive(Clone, Debug)]
pub struct LocalResponder {
    sessions: SessionStore,
}

impl LocalResponder {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }

    fn compose_reply(
        embed: &EmbedConfig,
        message: &str,
        context: Option<&str>,
        caller: Option<&CallerMetadata>,
        first_turn: bool,
    ) -> String {
        let name = caller
            .map(|c| c.username.as_str())
            .unwrap_or("there")
            .to_string();

        let mut reply = match detect_intent(message) {
            Intent::Greeting if first_turn => match &embed.greeting {
                Some(greeting) => greeting.clone(),
                None => format!("Hi {name}, welcome to {}. How can I help?", embed.name),
            },
            Intent::Greeting => format!("Hi again {name}, what else can I do for you?"),
            Intent::Farewell => format!("Goodbye {name}, thanks for chatting with {}.", embed.name),
            Intent::Help => format!(
                "I can answer questions about {}. Just describe what you need.",
                embed.name
            ),
            Intent::Unknown => format!("You said: \"{message}\". Could you tell me a bit more?"),
        };

        // The stand-in surfaces the configured persona on the first
        // turn; an LLM-backed responder would feed it to the model
        // instead.
        if first_turn {
            if let Some(prompt) = &embed.system_prompt {
                reply = format!("{prompt} {reply}");
            }
        }

        if let Some(ctx) = context {
            reply.push_str(&format!(" (Noted: {ctx})"));
        }
        reply
    }
}

#[async_trait]
impl ChatResponder for LocalResponder {
    async fn stream(
        &self,
        embed: EmbedConfig,
        message: String,
        session_id: String,
        context: Option<String>,
        caller: Option<CallerMetadata>,
    ) -> Result<ChatStream, AppError> {
        let turns = self
            .sessions
            .append_turn(&session_id, TurnRole::User, &message)
            .await;
        let first_turn = turns <= 1;

        let reply = Self::compose_reply(
            &embed,
            &message,
            context.as_deref(),
            caller.as_ref(),
            first_turn,
        );
        self.sessions
            .append_turn(&session_id, TurnRole::Assistant, &reply)
            .await;

        let reply_id = Uuid::new_v4().to_string();
        let done = json!({ "sessionId": session_id, "replyId": reply_id }).to_string();

        // One data event per word, then a terminal done event.
        let events: Vec<Result<Event, Infallible>> = reply
            .split_whitespace()
            .map(|word| Ok(Event::default().data(word)))
            .chain(std::iter::once(Ok(Event::default().event("done").data(done))))
            .collect();

        Ok(stream::iter(events).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn embed() -> EmbedConfig {
        EmbedConfig {
            id: "embed-1".to_string(),
            name: "Acme Support".to_string(),
            greeting: None,
            system_prompt: None,
        }
    }

    #[test]
    fn test_detect_intent() {
        assert_eq!(detect_intent("Hello there"), Intent::Greeting);
        assert_eq!(detect_intent("goodbye!"), Intent::Farewell);
        assert_eq!(detect_intent("I need help"), Intent::Help);
        assert_eq!(detect_intent("random text"), Intent::Unknown);
    }

    #[test]
    fn reply_mentions_context_verbatim() {
        let reply = LocalResponder::compose_reply(
            &embed(),
            "Hello",
            Some("User is a new employee starting tomorrow"),
            None,
            true,
        );
        assert!(reply.contains("User is a new employee starting tomorrow"));
    }

    #[test]
    fn system_prompt_shapes_first_reply() {
        let mut config = embed();
        config.system_prompt = Some("You are the Acme onboarding assistant.".to_string());

        let first = LocalResponder::compose_reply(&config, "Where do I start?", None, None, true);
        assert!(first.contains("You are the Acme onboarding assistant."));

        // Later turns go back to plain replies.
        let later = LocalResponder::compose_reply(&config, "Where do I start?", None, None, false);
        assert!(!later.contains("onboarding assistant"));
    }

    #[test]
    fn configured_greeting_wins_on_first_turn() {
        let mut config = embed();
        config.greeting = Some("Welcome aboard!".to_string());
        let reply = LocalResponder::compose_reply(&config, "hi", None, None, true);
        assert_eq!(reply, "Welcome aboard!");
    }

    #[tokio::test]
    async fn stream_records_both_turns() {
        let sessions = SessionStore::new(Duration::from_secs(60));
        let responder = LocalResponder::new(sessions.clone());

        let stream = responder
            .stream(embed(), "Hello".into(), "s1".into(), None, None)
            .await
            .unwrap();
        let events: Vec<_> = stream.collect().await;
        assert!(!events.is_empty());

        let history = sessions.history("s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, TurnRole::User);
        assert_eq!(history[1].role, TurnRole::Assistant);
    }
}
