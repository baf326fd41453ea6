//! Remote operations against the query endpoint.
//!
//! [`SyncClient`] issues the four request shapes the endpoint understands —
//! list, create, update, authenticate — as GET requests carrying a single
//! `query` parameter, and maps the `{data}` / `{errors}` response envelope
//! into typed results. Error classification lives here: an "unauthorized"
//! error message becomes [`SyncError::Unauthorized`], which is the one
//! signal that invalidates the caller's session.

use crate::error::{Result, SyncError};
use crate::query;
use crate::types::{AuthMode, AuthPayload, Envelope, Todo};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

/// Client for the remote todo endpoint.
#[derive(Debug, Clone)]
pub struct SyncClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SyncClient {
    /// Create a client for the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Http`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: crate::http::build_client()?,
            endpoint: endpoint.into(),
        })
    }

    /// Fetch all tasks for the session identified by `token`.
    pub async fn todo_list(&self, token: &str) -> Result<Vec<Todo>> {
        let data = self.execute(query::todo_list(token)).await?;
        field(&data, "todoList")
    }

    /// Create one task and return it as the endpoint recorded it.
    pub async fn create_todo(&self, token: &str, text: &str) -> Result<Todo> {
        let data = self.execute(query::create_todo(text, token)).await?;
        field(&data, "createTodo")
    }

    /// Toggle one task's completion state and return the updated task.
    pub async fn update_todo(&self, token: &str, id: &str, done: bool) -> Result<Todo> {
        let data = self.execute(query::update_todo(id, done, token)).await?;
        field(&data, "updateTodo")
    }

    /// Authenticate with email and password, via login or signup.
    pub async fn authenticate(
        &self,
        mode: AuthMode,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload> {
        let data = self
            .execute(query::authenticate(mode, email, password))
            .await?;
        field(&data, mode.field_name())
    }

    /// Issue one request and unwrap the response envelope.
    ///
    /// Classification: transport failures map to [`SyncError::Http`], bodies
    /// that are not the expected envelope to [`SyncError::Parse`], an errors
    /// array mentioning "unauthorized" to [`SyncError::Unauthorized`], and
    /// any other errors array to [`SyncError::Remote`] carrying the first
    /// message.
    async fn execute(&self, query_text: String) -> Result<serde_json::Value> {
        trace!(query = %query_text, "issuing endpoint request");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query_text.as_str())])
            .send()
            .await
            .map_err(|e| SyncError::Http(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Http(format!("cannot read response body: {e}")))?;
        debug!(%status, bytes = body.len(), "endpoint responded");

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| SyncError::Parse(format!("unexpected response body: {e}")))?;

        if let Some(message) = envelope.first_error() {
            if envelope.is_unauthorized() {
                return Err(SyncError::Unauthorized(message.to_owned()));
            }
            return Err(SyncError::Remote(message.to_owned()));
        }

        envelope
            .data
            .ok_or_else(|| SyncError::Parse("response carries neither data nor errors".into()))
    }
}

/// Extract one named field from the response `data` object.
fn field<T: DeserializeOwned>(data: &serde_json::Value, name: &str) -> Result<T> {
    let value = data
        .get(name)
        .ok_or_else(|| SyncError::Parse(format!("response data is missing `{name}`")))?;
    serde_json::from_value(value.clone())
        .map_err(|e| SyncError::Parse(format!("cannot decode `{name}`: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn field_extracts_named_payload() {
        let data = json!({"createTodo": {"id": "x", "text": "t", "done": false}});
        let todo: Todo = field(&data, "createTodo").unwrap();
        assert_eq!(todo.id, "x");
    }

    #[test]
    fn field_reports_missing_name() {
        let data = json!({"somethingElse": 1});
        let err = field::<Todo>(&data, "createTodo").unwrap_err();
        assert!(err.to_string().contains("createTodo"));
    }

    #[test]
    fn field_reports_shape_mismatch() {
        let data = json!({"createTodo": {"id": "x"}});
        let err = field::<Todo>(&data, "createTodo").unwrap_err();
        assert!(matches!(err, SyncError::Parse(_)));
    }

    #[test]
    fn client_construction_succeeds() {
        assert!(SyncClient::new("http://127.0.0.1:8080/graphql").is_ok());
    }
}
