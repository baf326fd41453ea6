//! # todosync
//!
//! Client-side session and sync layer for a remote todo service reachable
//! through a single query-string endpoint, plus an operational checkup that
//! verifies an external CLI tool is still authenticated.
//!
//! ## Design
//!
//! - One endpoint, four request shapes: list, create, update, authenticate
//! - Responses are a `{data}` / `{errors}` envelope; an "unauthorized" error
//!   message is the one signal that invalidates the stored session
//! - The session (bearer token + profile) is persisted to the state
//!   directory and survives restarts
//! - A small state machine tracks the logged-out/logged-in view and a render
//!   model stands in for the page's task list
//! - No retries, no request timeouts, no cancellation: a failed call is
//!   surfaced or dropped, never replayed
//!
//! ## Security
//!
//! - The bearer token never appears in logs; `Session`'s `Debug` redacts it
//! - Query arguments are escaped before interpolation, so user text cannot
//!   break out of its quoted position

pub mod checkup;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod notify;
pub mod query;
pub mod session;
pub mod types;
pub mod view;

pub use client::SyncClient;
pub use config::SyncConfig;
pub use controller::{Controller, Notice};
pub use error::{Result, SyncError};
pub use session::{Session, SessionStore};
pub use types::{AuthMode, AuthPayload, Todo, User};
pub use view::{AuthFormMode, TaskListView, ViewState};
