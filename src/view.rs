//! View state machine and task-list render model.
//!
//! The view is either logged out (showing the login or signup form) or
//! logged in (showing the task list). The render model stands in for the
//! page: a list of task rows plus a placeholder message when the list is
//! empty. Rendering collaborators read this model; nothing here talks to
//! the endpoint.

use crate::types::Todo;

/// Which authentication form is visible while logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFormMode {
    /// The login form.
    #[default]
    Login,
    /// The signup form.
    Signup,
}

/// The two view states. There is no terminal state; the machine lives for
/// the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Authentication forms are visible.
    LoggedOut {
        /// Which of the two forms is showing.
        mode: AuthFormMode,
    },
    /// The task interface is visible.
    LoggedIn,
}

impl ViewState {
    /// The logged-out state showing the login form — the state every
    /// forced logout lands in.
    pub fn logged_out() -> Self {
        Self::LoggedOut {
            mode: AuthFormMode::Login,
        }
    }

    /// True when the task interface is visible.
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::logged_out()
    }
}

/// One visible task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Endpoint-assigned task id.
    pub id: String,
    /// Task description.
    pub text: String,
    /// Whether the row carries done styling.
    pub done: bool,
}

impl From<Todo> for TaskRow {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            text: todo.text,
            done: todo.done,
        }
    }
}

/// Message shown in place of an empty list.
pub const EMPTY_PLACEHOLDER: &str = "There are no tasks for you today";

/// The visible task list.
#[derive(Debug, Clone, Default)]
pub struct TaskListView {
    rows: Vec<TaskRow>,
}

impl TaskListView {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The visible rows, in endpoint order.
    pub fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    /// Placeholder message, present only while the list is empty.
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.rows.is_empty() {
            Some(EMPTY_PLACEHOLDER)
        } else {
            None
        }
    }

    /// Replace the entire visible list.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.rows = todos.into_iter().map(TaskRow::from).collect();
    }

    /// Append one row without touching the rest.
    pub fn append(&mut self, todo: Todo) {
        self.rows.push(todo.into());
    }

    /// Update one row's done styling. A row that is no longer present is a
    /// no-op; a late response for a vanished row must not disturb the rest
    /// of the list. Returns whether a row was updated.
    pub fn set_done(&mut self, id: &str, done: bool) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.done = done;
                true
            }
            None => false,
        }
    }
}
