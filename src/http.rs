//! Shared HTTP client construction for endpoint requests.

use crate::error::SyncError;

/// Build a [`reqwest::Client`] for talking to the query endpoint.
///
/// No request timeout is set: a stalled call never resolves and the
/// caller's state is left unchanged. Redirects are capped at 10.
///
/// # Errors
///
/// Returns [`SyncError::Http`] if the client cannot be constructed.
pub fn build_client() -> Result<reqwest::Client, SyncError> {
    reqwest::Client::builder()
        .user_agent(concat!("todosync/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SyncError::Http(format!("failed to build HTTP client: {e}")))
}
