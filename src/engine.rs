//! Conversation engine
//!
//! Two-state machine driving one active conversation: `Idle` accepts a
//! send, `AwaitingResponse` holds exactly one in-flight generation
//! request. The user message is persisted before the generation call is
//! issued; the assistant reply, if any, lands after it in the same
//! session. Results arriving for an invalidated ticket (new conversation,
//! switch, delete) are discarded.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::generator::{GeneratorError, ResponseGenerator};
use crate::storage::sessions::{SessionError, SessionRepository};
use crate::types::message::Message;

/// Conversation engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("no API credential configured")]
    MissingCredential,
    #[error("a generation request is already in flight")]
    Busy,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// State of the active conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    AwaitingResponse,
}

/// Identifies one accepted generation request.
///
/// The caller dispatches the generation call itself and routes the
/// outcome back through [`ConversationEngine::on_response`] or
/// [`ConversationEngine::on_error`] with this ticket.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    /// Session the reply belongs to
    pub session_id: String,
    /// Prompt to hand to the generator
    pub prompt: String,
    token: u64,
}

struct InFlight {
    token: u64,
    session_id: String,
}

/// Engine over the session repository and the response generator
pub struct ConversationEngine {
    repo: Arc<Mutex<SessionRepository>>,
    generator: Arc<dyn ResponseGenerator>,
    state: EngineState,
    in_flight: Option<InFlight>,
    next_token: u64,
    messages: Vec<Message>,
}

impl ConversationEngine {
    pub fn new(
        repo: Arc<Mutex<SessionRepository>>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        Self {
            repo,
            generator,
            state: EngineState::Idle,
            in_flight: None,
            next_token: 0,
            messages: Vec::new(),
        }
    }

    /// The generator the caller should dispatch tickets against
    pub fn generator(&self) -> Arc<dyn ResponseGenerator> {
        self.generator.clone()
    }

    /// Messages of the active conversation, as last reconciled
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.state == EngineState::AwaitingResponse
    }

    /// Accept a user message and open a generation request.
    ///
    /// Rejects empty text, a missing credential, and sends while another
    /// request is in flight. On accept the user message is persisted
    /// (creating a session if none is current) before the ticket is
    /// handed back, so the message survives even if generation fails.
    pub fn send_message(&mut self, text: &str) -> Result<GenerationTicket, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyMessage);
        }
        if !self.generator.is_configured() {
            return Err(EngineError::MissingCredential);
        }
        if self.state == EngineState::AwaitingResponse {
            return Err(EngineError::Busy);
        }

        let message = Message::user(text);
        let (session_id, messages) = {
            let mut repo = lock(&self.repo);
            let session = match repo.current_session_id().map(str::to_owned) {
                Some(id) => repo.append_message(&id, message)?,
                None => repo.create_session(message)?,
            };
            (session.id.clone(), session.messages.clone())
        };
        self.messages = messages;

        self.state = EngineState::AwaitingResponse;
        self.next_token += 1;
        self.in_flight = Some(InFlight {
            token: self.next_token,
            session_id: session_id.clone(),
        });

        Ok(GenerationTicket {
            session_id,
            prompt: text.to_string(),
            token: self.next_token,
        })
    }

    /// Reconcile a successful generation result.
    ///
    /// Stale tickets are discarded without touching the repository.
    pub fn on_response(
        &mut self,
        ticket: &GenerationTicket,
        text: &str,
    ) -> Result<(), EngineError> {
        if !self.is_live(ticket) {
            tracing::debug!(session = %ticket.session_id, "discarding stale generation result");
            return Ok(());
        }
        self.state = EngineState::Idle;
        self.in_flight = None;

        let messages = {
            let mut repo = lock(&self.repo);
            repo.append_message(&ticket.session_id, Message::assistant(text))?
                .messages
                .clone()
        };
        self.messages = messages;
        Ok(())
    }

    /// Reconcile a failed generation.
    ///
    /// No assistant message is appended; the already persisted user
    /// message stays without a reply and the user may retry manually.
    pub fn on_error(&mut self, ticket: &GenerationTicket, err: &GeneratorError) {
        if !self.is_live(ticket) {
            tracing::debug!(session = %ticket.session_id, "discarding stale generation error");
            return;
        }
        tracing::warn!(session = %ticket.session_id, "generation failed: {err}");
        self.state = EngineState::Idle;
        self.in_flight = None;
    }

    /// Start a fresh conversation: clear the current pointer and the
    /// local view. Any in-flight request is invalidated.
    pub fn new_conversation(&mut self) -> Result<(), EngineError> {
        self.invalidate();
        self.messages.clear();
        lock(&self.repo).clear_current()?;
        Ok(())
    }

    /// Switch the active conversation to `session_id`.
    ///
    /// An in-flight request for a different session is invalidated;
    /// re-selecting the session that is generating keeps it live.
    pub fn select_session(&mut self, session_id: &str) -> Result<(), EngineError> {
        let messages = {
            let mut repo = lock(&self.repo);
            repo.select_session(session_id)?.messages.clone()
        };
        if self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.session_id != session_id)
        {
            self.invalidate();
        }
        self.messages = messages;
        Ok(())
    }

    /// Delete a session, clearing the view if it was the active one
    pub fn delete_session(&mut self, session_id: &str) -> Result<(), EngineError> {
        let was_current = {
            let mut repo = lock(&self.repo);
            let was_current = repo.current_session_id() == Some(session_id);
            repo.delete_session(session_id)?;
            was_current
        };
        if self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.session_id == session_id)
        {
            self.invalidate();
        }
        if was_current {
            self.messages.clear();
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.state = EngineState::Idle;
        self.in_flight = None;
    }

    fn is_live(&self, ticket: &GenerationTicket) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|f| f.token == ticket.token)
    }
}

/// Lock the repository, recovering from a poisoned mutex. Repository
/// operations never leave the collection half-mutated, so the inner
/// state stays usable.
pub fn lock(repo: &Mutex<SessionRepository>) -> MutexGuard<'_, SessionRepository> {
    match repo.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;
    use crate::types::message::Role;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockGenerator {
        configured: bool,
        calls: AtomicUsize,
    }

    impl MockGenerator {
        fn configured() -> Arc<Self> {
            Arc::new(Self {
                configured: true,
                calls: AtomicUsize::new(0),
            })
        }

        fn unconfigured() -> Arc<Self> {
            Arc::new(Self {
                configured: false,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ResponseGenerator for MockGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GeneratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("mock reply".to_string())
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    fn engine_with(
        generator: Arc<MockGenerator>,
    ) -> (ConversationEngine, Arc<Mutex<SessionRepository>>) {
        let repo = Arc::new(Mutex::new(SessionRepository::new(Arc::new(
            MemoryStore::new(),
        ))));
        (ConversationEngine::new(repo.clone(), generator), repo)
    }

    #[test]
    fn test_send_creates_session_then_appends() {
        let (mut engine, repo) = engine_with(MockGenerator::configured());

        let ticket = engine.send_message("first message").unwrap();
        engine.on_response(&ticket, "first reply").unwrap();

        let ticket = engine.send_message("second message").unwrap();
        engine.on_response(&ticket, "second reply").unwrap();

        let repo = lock(&repo);
        assert_eq!(repo.sessions().len(), 1);
        let roles: Vec<Role> = repo.sessions()[0].messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }

    #[test]
    fn test_rejects_empty_and_whitespace_text() {
        let (mut engine, repo) = engine_with(MockGenerator::configured());
        assert!(matches!(
            engine.send_message(""),
            Err(EngineError::EmptyMessage)
        ));
        assert!(matches!(
            engine.send_message("   \n\t"),
            Err(EngineError::EmptyMessage)
        ));
        assert!(lock(&repo).sessions().is_empty());
    }

    #[test]
    fn test_rejects_when_unconfigured() {
        let (mut engine, repo) = engine_with(MockGenerator::unconfigured());
        assert!(matches!(
            engine.send_message("hello"),
            Err(EngineError::MissingCredential)
        ));
        // Nothing was persisted.
        assert!(lock(&repo).sessions().is_empty());
    }

    #[test]
    fn test_rejects_second_send_while_awaiting() {
        let (mut engine, _repo) = engine_with(MockGenerator::configured());
        let ticket = engine.send_message("hello").unwrap();
        assert!(engine.is_awaiting_response());

        assert!(matches!(
            engine.send_message("impatient follow-up"),
            Err(EngineError::Busy)
        ));

        engine.on_response(&ticket, "reply").unwrap();
        assert_eq!(engine.state(), EngineState::Idle);
        engine.send_message("now it goes through").unwrap();
    }

    #[test]
    fn test_error_returns_to_idle_and_keeps_user_message() {
        let (mut engine, repo) = engine_with(MockGenerator::configured());
        let ticket = engine.send_message("hello").unwrap();

        engine.on_error(&ticket, &GeneratorError::Upstream("boom".into()));

        assert_eq!(engine.state(), EngineState::Idle);
        let repo = lock(&repo);
        let session = &repo.sessions()[0];
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, Role::User);
    }

    #[test]
    fn test_stale_response_after_new_conversation_is_discarded() {
        let (mut engine, repo) = engine_with(MockGenerator::configured());
        let ticket = engine.send_message("hello").unwrap();

        engine.new_conversation().unwrap();
        engine.on_response(&ticket, "late reply").unwrap();

        let repo = lock(&repo);
        assert_eq!(repo.sessions()[0].messages.len(), 1);
        assert_eq!(repo.current_session_id(), None);
    }

    #[test]
    fn test_stale_response_after_delete_is_discarded() {
        let (mut engine, repo) = engine_with(MockGenerator::configured());
        let ticket = engine.send_message("hello").unwrap();

        engine.delete_session(&ticket.session_id).unwrap();
        engine.on_response(&ticket, "late reply").unwrap();

        assert!(lock(&repo).sessions().is_empty());
        assert!(engine.messages().is_empty());
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_switching_sessions_invalidates_in_flight_ticket() {
        let (mut engine, repo) = engine_with(MockGenerator::configured());

        let first = engine.send_message("first conversation").unwrap();
        engine.on_response(&first, "reply").unwrap();
        let first_id = first.session_id.clone();

        engine.new_conversation().unwrap();
        let second = engine.send_message("second conversation").unwrap();

        engine.select_session(&first_id).unwrap();
        engine.on_response(&second, "late reply").unwrap();

        let repo = lock(&repo);
        let second_session = repo.get(&second.session_id).unwrap();
        assert_eq!(second_session.messages.len(), 1);
    }

    #[test]
    fn test_reselecting_generating_session_keeps_ticket_live() {
        let (mut engine, repo) = engine_with(MockGenerator::configured());
        let ticket = engine.send_message("hello").unwrap();

        engine.select_session(&ticket.session_id).unwrap();
        engine.on_response(&ticket, "reply").unwrap();

        assert_eq!(lock(&repo).sessions()[0].messages.len(), 2);
    }

    #[test]
    fn test_view_follows_selection() {
        let (mut engine, _repo) = engine_with(MockGenerator::configured());

        let first = engine.send_message("first").unwrap();
        engine.on_response(&first, "reply one").unwrap();

        engine.new_conversation().unwrap();
        assert!(engine.messages().is_empty());

        engine.select_session(&first.session_id).unwrap();
        assert_eq!(engine.messages().len(), 2);
        assert_eq!(engine.messages()[0].content, "first");
    }

    #[tokio::test]
    async fn test_generator_not_called_before_dispatch() {
        // The engine only opens the ticket; dispatch is the caller's job,
        // so rejecting a send must never hit the generator.
        let generator = MockGenerator::configured();
        let (mut engine, _repo) = engine_with(generator.clone());

        let _ticket = engine.send_message("hello").unwrap();
        assert!(engine.send_message("busy now").is_err());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

        let reply = engine.generator().generate("hello").await.unwrap();
        assert_eq!(reply, "mock reply");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
