//! The controller owns the session, the view state, and the visible list,
//! and drives the four remote operations.
//!
//! Failure policy, applied uniformly by [`Controller::absorb`]:
//!
//! - local validation failures and non-authorization endpoint errors are
//!   surfaced to the user as a [`Notice`] with no state change;
//! - an authorization error invalidates the session and forces the
//!   logged-out view — the only automatic transition a remote response can
//!   cause;
//! - transport and parse failures are logged and dropped: no user feedback,
//!   no retry, no state change.
//!
//! Nothing here is fatal; every operation leaves the controller usable.

use crate::client::SyncClient;
use crate::error::SyncError;
use crate::session::{Session, SessionStore};
use crate::types::AuthMode;
use crate::view::{AuthFormMode, TaskListView, ViewState};
use tracing::{error, info, warn};

/// A message the user should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking alert, e.g. a validation failure or endpoint error message.
    Alert(String),
}

/// Coordinates the session store, sync client, and view.
pub struct Controller {
    client: SyncClient,
    store: SessionStore,
    session: Session,
    view: ViewState,
    list: TaskListView,
}

impl Controller {
    /// Build a controller, loading any persisted session.
    ///
    /// With a persisted token the initial view is optimistically logged in;
    /// the first [`refresh_tasks`](Self::refresh_tasks) call is what actually
    /// verifies the token and may revert the view.
    pub fn new(client: SyncClient, store: SessionStore) -> Self {
        let session = store.load();
        let view = if session.is_authenticated() {
            ViewState::LoggedIn
        } else {
            ViewState::logged_out()
        };
        Self {
            client,
            store,
            session,
            view,
            list: TaskListView::new(),
        }
    }

    /// Current view state.
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// The visible task list.
    pub fn list(&self) -> &TaskListView {
        &self.list
    }

    /// Email shown in the task interface header, only while logged in and
    /// only when the stored profile parsed.
    pub fn user_email(&self) -> Option<&str> {
        if !self.view.is_logged_in() {
            return None;
        }
        self.session.user().map(|u| u.email.as_str())
    }

    /// Fetch all tasks and replace the visible list.
    ///
    /// Without a token this short-circuits straight to the logged-out view
    /// and never issues a remote call.
    pub async fn refresh_tasks(&mut self) -> Option<Notice> {
        let Some(token) = self.session.token().map(str::to_owned) else {
            self.view = ViewState::logged_out();
            return None;
        };

        match self.client.todo_list(&token).await {
            Ok(todos) => {
                self.list.replace_all(todos);
                None
            }
            Err(e) => self.absorb(e),
        }
    }

    /// Create one task and append it to the visible list.
    ///
    /// Blank text is rejected locally with an alert; no remote call is made
    /// and the list is untouched.
    pub async fn add_task(&mut self, text: &str) -> Option<Notice> {
        let Some(token) = self.session.token().map(str::to_owned) else {
            self.view = ViewState::logged_out();
            return None;
        };

        if text.trim().is_empty() {
            return Some(Notice::Alert("Please specify a task".to_owned()));
        }

        match self.client.create_todo(&token, text).await {
            Ok(todo) => {
                // Only the created task is appended; the rest of the list is
                // not re-fetched.
                self.list.append(todo);
                None
            }
            Err(e) => self.absorb(e),
        }
    }

    /// Toggle one task's completion state.
    ///
    /// On success only that row's done styling changes; a row that has
    /// meanwhile disappeared is a no-op.
    pub async fn toggle_task(&mut self, id: &str, done: bool) -> Option<Notice> {
        let Some(token) = self.session.token().map(str::to_owned) else {
            self.view = ViewState::logged_out();
            return None;
        };

        match self.client.update_todo(&token, id, done).await {
            Ok(updated) => {
                self.list.set_done(&updated.id, updated.done);
                None
            }
            Err(e) => self.absorb(e),
        }
    }

    /// Log in or sign up. On success the returned token and profile are
    /// persisted, the view flips to logged in, and the task list is fetched
    /// immediately. On failure the endpoint's message is surfaced and
    /// nothing changes.
    pub async fn authenticate(
        &mut self,
        mode: AuthMode,
        email: &str,
        password: &str,
    ) -> Option<Notice> {
        match self.client.authenticate(mode, email, password).await {
            Ok(payload) => {
                if let Err(e) = self.store.set(&payload.token, &payload.user) {
                    // The in-memory session still works for this process;
                    // only durability across restarts is lost.
                    error!("cannot persist session: {e}");
                }
                self.session = Session::authenticated(payload.token, payload.user);
                self.view = ViewState::LoggedIn;
                info!("authenticated via {mode}");
                self.refresh_tasks().await
            }
            Err(SyncError::Remote(message)) => {
                let label = match mode {
                    AuthMode::Login => "Login failed",
                    AuthMode::Signup => "Signup failed",
                };
                Some(Notice::Alert(format!("{label}: {message}")))
            }
            Err(e) => self.absorb(e),
        }
    }

    /// Clear the session and show the login form.
    pub fn logout(&mut self) {
        self.invalidate_session();
    }

    /// Switch the logged-out view to the login form. Ignored while logged in.
    pub fn show_login(&mut self) {
        if let ViewState::LoggedOut { mode } = &mut self.view {
            *mode = AuthFormMode::Login;
        }
    }

    /// Switch the logged-out view to the signup form. Ignored while logged in.
    pub fn show_signup(&mut self) {
        if let ViewState::LoggedOut { mode } = &mut self.view {
            *mode = AuthFormMode::Signup;
        }
    }

    /// Apply the failure policy to an operation error.
    fn absorb(&mut self, err: SyncError) -> Option<Notice> {
        match err {
            SyncError::Unauthorized(message) => {
                info!("session rejected by endpoint, logging out: {message}");
                self.invalidate_session();
                None
            }
            SyncError::Remote(message) => Some(Notice::Alert(message)),
            other => {
                warn!("dropping failed call: {other}");
                None
            }
        }
    }

    fn invalidate_session(&mut self) {
        if let Err(e) = self.store.clear() {
            error!("cannot clear persisted session: {e}");
        }
        self.session = Session::empty();
        self.view = ViewState::logged_out();
    }
}
