//! Chat Session use case.
//!
//! A [`ChatSession`] is one user's ongoing conversation. Before every turn it
//! rewrites the single system slot with the latest retrieved context, sends
//! the whole conversation to the [`LlmGateway`], and afterwards trims the
//! history to the configured number of exchanges.
//!
//! `respond` takes `&mut self`, so turns on one session are serialized by
//! ownership. Callers that share a session across tasks wrap it in an async
//! mutex; separate sessions share nothing.

use crate::config::SessionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use verse_rag_domain::util::preview;
use verse_rag_domain::{BoundedHistory, ContextPayload, Message, Model, PromptTemplate};

/// Result of one conversational turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReply {
    /// Assistant text, or the in-band error description.
    pub response: String,
    /// The context passed in, echoed unchanged.
    pub context: ContextPayload,
}

/// One user's bounded conversation with the completion model.
pub struct ChatSession {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
    initial_system: Option<String>,
    system: Option<Message>,
    history: BoundedHistory,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatSession {
    /// Create a session.
    ///
    /// A non-empty `params.system_prompt` starts the session with a system
    /// slot; otherwise the slot is created on the first turn.
    pub fn new(gateway: Arc<dyn LlmGateway>, params: SessionParams) -> Self {
        let initial_system = Some(params.system_prompt).filter(|p| !p.is_empty());
        Self {
            gateway,
            model: params.model,
            system: initial_system.as_deref().map(Message::system),
            initial_system,
            history: BoundedHistory::new(params.max_history),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// User and assistant turns, without the system slot.
    pub fn history(&self) -> &BoundedHistory {
        &self.history
    }

    /// The full conversation as it would be sent: system slot first.
    pub fn messages(&self) -> Vec<Message> {
        self.system
            .iter()
            .cloned()
            .chain(self.history.iter().cloned())
            .collect()
    }

    /// Run one turn.
    ///
    /// Completion failures never escape: the error description becomes the
    /// assistant turn and the returned response.
    pub async fn respond(&mut self, user_message: &str, context: ContextPayload) -> SessionReply {
        self.system = Some(Message::system(PromptTemplate::context_system(&context)));
        self.history.push(Message::user(user_message));

        let messages = self.messages();
        debug!(
            model = %self.model,
            messages = messages.len(),
            "Sending completion request"
        );

        let (result, succeeded) = match self.gateway.complete(&self.model, &messages).await {
            Ok(text) => (text, true),
            Err(e) => {
                warn!("Completion failed: {}", e);
                (format!("Error: {e}"), false)
            }
        };

        self.conversation_logger.log(ConversationEvent::new(
            ConversationEvent::COMPLETION,
            serde_json::json!({
                "model": self.model.as_str(),
                "messages": messages.len(),
                "success": succeeded,
                "response": preview(&result, 500),
            }),
        ));

        self.history.push(Message::assistant(result.clone()));
        let dropped = self.history.enforce_limit();
        if dropped > 0 {
            debug!(dropped, kept = self.history.len(), "Trimmed conversation history");
        }

        SessionReply {
            response: result,
            context,
        }
    }

    /// Forget every turn and restore the initial system slot.
    pub fn reset(&mut self) {
        self.history.clear();
        self.system = self.initial_system.as_deref().map(Message::system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use verse_rag_domain::{REFUSAL, Role};

    // ==================== Test Mocks ====================

    /// Replies with queued results, echoing the turn count when the queue
    /// is empty, and records every request.
    struct MockGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        requests: Mutex<Vec<Vec<Message>>>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self {
                replies: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_replies(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Vec<Message>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn complete(
            &self,
            _model: &Model,
            messages: &[Message],
        ) -> Result<String, GatewayError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(messages.to_vec());
            let n = requests.len();
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(format!("a{n}")))
        }
    }

    fn session(gateway: Arc<MockGateway>, max_history: usize) -> ChatSession {
        let params = SessionParams::default()
            .with_max_history(max_history)
            .unwrap();
        ChatSession::new(gateway, params)
    }

    fn turns(session: &ChatSession) -> Vec<Message> {
        session.history().iter().cloned().collect()
    }

    fn system_content(session: &ChatSession) -> Option<String> {
        session
            .messages()
            .into_iter()
            .next()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content)
    }

    fn contents(session: &ChatSession) -> Vec<String> {
        session.history().iter().map(|m| m.content.clone()).collect()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_single_turn_returns_response_and_echoes_context() {
        let gateway = Arc::new(MockGateway::with_replies(vec![Ok("Be patient.".to_string())]));
        let mut session = session(gateway.clone(), 5);
        let context = ContextPayload::Groups(vec![vec!["v4".to_string(), "v5".to_string()]]);

        let reply = session.respond("What about patience?", context.clone()).await;

        assert_eq!(reply.response, "Be patient.");
        assert_eq!(reply.context, context);
        assert_eq!(
            turns(&session),
            vec![
                Message::user("What about patience?"),
                Message::assistant("Be patient.")
            ]
        );
    }

    #[tokio::test]
    async fn test_dispatch_contains_system_then_all_turns() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session(gateway.clone(), 5);

        session.respond("q1", ContextPayload::from("c1")).await;
        session.respond("q2", ContextPayload::from("c2")).await;

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        let second = &requests[1];
        assert_eq!(second.len(), 4);
        assert_eq!(second[0].role, Role::System);
        assert!(second[0].content.contains("Context: c2"));
        assert_eq!(second[1], Message::user("q1"));
        assert_eq!(second[2], Message::assistant("a1"));
        assert_eq!(second[3], Message::user("q2"));
    }

    #[tokio::test]
    async fn test_system_slot_is_single_and_latest() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session(gateway.clone(), 2);

        for i in 0..6 {
            let context = ContextPayload::from(format!("ctx{i}"));
            session.respond(&format!("q{i}"), context.clone()).await;

            let messages = session.messages();
            assert_eq!(messages[0].role, Role::System);
            assert_eq!(
                messages.iter().filter(|m| m.role == Role::System).count(),
                1
            );
            assert_eq!(messages[0].content, PromptTemplate::context_system(&context));
            assert!(messages[0].content.contains(REFUSAL));
        }
    }

    #[tokio::test]
    async fn test_history_bound_is_suffix_of_full_log() {
        for k in 1..4 {
            let gateway = Arc::new(MockGateway::new());
            let mut session = session(gateway.clone(), k);
            let mut full_log = Vec::new();

            for turn in 1..=8 {
                let reply = session
                    .respond(&format!("q{turn}"), ContextPayload::default())
                    .await;
                full_log.push(format!("q{turn}"));
                full_log.push(reply.response);

                let expected_len = (2 * turn).min(2 * k);
                assert_eq!(session.history().len(), expected_len);
                assert_eq!(contents(&session), full_log[full_log.len() - expected_len..]);
            }
        }
    }

    #[tokio::test]
    async fn test_five_turns_with_budget_two_keeps_last_two_exchanges() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session(gateway.clone(), 2);

        for turn in 1..=5 {
            session
                .respond(&format!("q{turn}"), ContextPayload::default())
                .await;
        }

        assert_eq!(contents(&session), vec!["q4", "a4", "q5", "a5"]);
    }

    #[tokio::test]
    async fn test_dispatch_happens_before_trim() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session(gateway.clone(), 1);

        session.respond("q1", ContextPayload::default()).await;
        session.respond("q2", ContextPayload::default()).await;

        // system + q1 + a1 + q2: the new user turn is added to a full history
        assert_eq!(gateway.requests()[1].len(), 4);
        assert_eq!(contents(&session), vec!["q2", "a2"]);
    }

    #[tokio::test]
    async fn test_completion_failure_becomes_assistant_turn() {
        let gateway = Arc::new(MockGateway::with_replies(vec![Err(GatewayError::Timeout)]));
        let mut session = session(gateway.clone(), 5);

        let reply = session.respond("q", ContextPayload::default()).await;

        assert_eq!(reply.response, "Error: Timeout");
        assert_eq!(session.history().len(), 2);
        assert_eq!(
            turns(&session)[1],
            Message::assistant("Error: Timeout")
        );
    }

    #[tokio::test]
    async fn test_session_recovers_after_failure() {
        let gateway = Arc::new(MockGateway::with_replies(vec![
            Err(GatewayError::RequestFailed("503".to_string())),
            Ok("fine".to_string()),
        ]));
        let mut session = session(gateway.clone(), 5);

        let first = session.respond("q1", ContextPayload::default()).await;
        let second = session.respond("q2", ContextPayload::default()).await;

        assert!(!first.response.is_empty());
        assert!(first.response.contains("503"));
        assert_eq!(second.response, "fine");
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_initial_prompt_starts_without_system_slot() {
        let gateway = Arc::new(MockGateway::new());
        let params = SessionParams {
            system_prompt: String::new(),
            ..SessionParams::default()
        };
        let mut session = ChatSession::new(gateway.clone(), params);

        assert!(system_content(&session).is_none());
        assert!(session.messages().is_empty());

        session.respond("q", ContextPayload::default()).await;

        assert!(system_content(&session).is_some());
        assert_eq!(gateway.requests()[0][0].role, Role::System);
    }

    #[tokio::test]
    async fn test_initial_prompt_is_overwritten_on_first_turn() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session(gateway.clone(), 5);

        assert_eq!(
            system_content(&session).as_deref(),
            Some(PromptTemplate::initial_system())
        );

        session.respond("q", ContextPayload::from("verses")).await;

        let sent = &gateway.requests()[0];
        assert_eq!(sent.len(), 2);
        assert!(sent[0].content.contains("Context: verses"));
    }

    #[tokio::test]
    async fn test_reset_restores_initial_state() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session(gateway, 5);

        session.respond("q", ContextPayload::from("c")).await;
        session.reset();

        assert!(session.history().is_empty());
        assert_eq!(
            system_content(&session).as_deref(),
            Some(PromptTemplate::initial_system())
        );
    }

    #[tokio::test]
    async fn test_independent_sessions_run_concurrently() {
        let gateway = Arc::new(MockGateway::new());
        let mut alice = session(gateway.clone(), 3);
        let mut bob = session(gateway.clone(), 3);

        let (a, b) = tokio::join!(
            alice.respond("from alice", ContextPayload::default()),
            bob.respond("from bob", ContextPayload::default()),
        );

        assert!(!a.response.is_empty());
        assert!(!b.response.is_empty());
        assert_eq!(turns(&alice)[0], Message::user("from alice"));
        assert_eq!(turns(&bob)[0], Message::user("from bob"));
        assert_eq!(alice.history().len(), 2);
        assert_eq!(bob.history().len(), 2);
    }

    #[tokio::test]
    async fn test_shared_session_behind_async_mutex() {
        let gateway = Arc::new(MockGateway::new());
        let shared = Arc::new(tokio::sync::Mutex::new(session(gateway, 5)));

        let first = {
            let shared = shared.clone();
            async move {
                shared
                    .lock()
                    .await
                    .respond("one", ContextPayload::default())
                    .await
            }
        };
        let second = {
            let shared = shared.clone();
            async move {
                shared
                    .lock()
                    .await
                    .respond("two", ContextPayload::default())
                    .await
            }
        };
        tokio::join!(first, second);

        let session = shared.lock().await;
        let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }
}
