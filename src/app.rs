//! Root Dioxus application component
//!
//! Builds the shared application state (store, repository, engine,
//! preferences) and mounts the UI tree.

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;

use crate::engine::{self, ConversationEngine};
use crate::generator::GeminiClient;
use crate::storage::prefs::Preferences;
use crate::storage::sessions::SessionRepository;
use crate::storage::store::{FileStore, KeyValueStore, MemoryStore};
use crate::types::session::ChatSession;
use crate::ui::Layout;

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    /// Session repository, shared with the engine
    pub repo: Arc<Mutex<SessionRepository>>,
    /// Conversation engine for the active conversation
    pub engine: Signal<ConversationEngine>,
    /// UI preferences backed by the same store
    pub prefs: Preferences,
    /// Snapshot of the session list for rendering, refreshed after
    /// every mutation
    pub sessions: Signal<Vec<ChatSession>>,
    /// Whether a generation request is in flight
    pub is_generating: Signal<bool>,
    /// Last user-visible error, cleared on the next successful send
    pub last_error: Signal<Option<String>>,
    /// Dark mode, mirrored from preferences
    pub dark_mode: Signal<bool>,
    /// Birthday celebration overlay visibility
    pub show_birthday: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        let store: Arc<dyn KeyValueStore> = match FileStore::open_default() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("failed to open on-disk store, falling back to memory: {e}");
                Arc::new(MemoryStore::new())
            }
        };

        let repo = Arc::new(Mutex::new(SessionRepository::new(store.clone())));
        let conversation_engine =
            ConversationEngine::new(repo.clone(), Arc::new(GeminiClient::from_env()));
        let prefs = Preferences::new(store);

        let sessions = engine::lock(&repo).sessions().to_vec();
        let dark_mode = prefs.dark_mode();
        tracing::info!(sessions = sessions.len(), "AppState initialized");

        Self {
            repo,
            engine: Signal::new(conversation_engine),
            prefs,
            sessions: Signal::new(sessions),
            is_generating: Signal::new(false),
            last_error: Signal::new(None),
            dark_mode: Signal::new(dark_mode),
            show_birthday: Signal::new(false),
        }
    }

    /// Re-read the session list snapshot from the repository
    pub fn refresh_sessions(&mut self) {
        let sessions = engine::lock(&self.repo).sessions().to_vec();
        self.sessions.set(sessions);
    }
}

#[component]
pub fn App() -> Element {
    let app_state = AppState::new();
    use_context_provider(|| app_state);

    rsx! {
        Layout {}
    }
}
