//! Session Context
//!
//! Session state provided app-wide via the Leptos Context API. The
//! context value is constructed once at startup from durable storage
//! and lives for the tab lifetime; every mutation persists the full
//! session before the signal update settles.

use leptos::prelude::*;

use crate::api::FetchTransport;
use crate::config::api_base_url;
use crate::session::{load_session, persist_session, AuthClient, Session};

/// App-wide session signals plus the operations that mutate them
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Current session - read
    pub session: ReadSignal<Session>,
    /// Current session - write
    set_session: WriteSignal<Session>,
}

impl SessionContext {
    /// Initialize from persisted storage. Called once at startup.
    pub fn new() -> Self {
        let (session, set_session) = signal(load_session());
        Self {
            session,
            set_session,
        }
    }

    fn auth(&self) -> AuthClient<FetchTransport> {
        AuthClient::new(FetchTransport, api_base_url())
    }

    /// Attempt a credential login. On success the session flips to
    /// logged in and is persisted before this returns true; on any
    /// failure the stored session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        match self.auth().login(email, password).await {
            Ok(()) => {
                let session = Session::logged_in(email);
                persist_session(&session);
                self.set_session.set(session);
                true
            }
            Err(_) => false,
        }
    }

    /// Best-effort server logout, then unconditionally clear and
    /// persist the local session.
    pub async fn logout(&self) {
        let _ = self.auth().logout().await;
        let session = Session::logged_out();
        persist_session(&session);
        self.set_session.set(session);
    }

    /// Merge a new email into the session after the server has already
    /// accepted it. No network call.
    pub fn update_email(&self, email: &str) {
        let mut session = self.session.get_untracked();
        session.email = email.to_string();
        persist_session(&session);
        self.set_session.set(session);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the session context from context
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
