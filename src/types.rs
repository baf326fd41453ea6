//! Core types for the todo wire contract.
//!
//! The endpoint answers every request with a JSON envelope that is either
//! `{"data": {...}}` or `{"errors": [{"message": ...}, ...]}`. The types here
//! model that envelope plus the task and user payloads it carries.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single task owned by the remote endpoint.
///
/// The client holds these only as a transient render copy; the endpoint
/// assigns ids and is the sole authority on task state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Endpoint-assigned task id.
    pub id: String,
    /// Task description.
    pub text: String,
    /// Completion state.
    pub done: bool,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Endpoint-assigned user id. Some deployments serialize this as a JSON
    /// number, so deserialization accepts either form.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// The user's email address.
    pub email: String,
}

/// Accept a JSON string or number and normalise to `String`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

/// Token and profile returned by a successful login or signup.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    /// Profile of the newly authenticated user.
    pub user: User,
}

/// Which authentication mutation to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Authenticate an existing account.
    Login,
    /// Create an account and authenticate in one step.
    Signup,
}

impl AuthMode {
    /// Name of the mutation field on the wire, which doubles as the key
    /// the payload appears under in the response `data` object.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// One entry of the response `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    /// Human-readable error message from the endpoint.
    #[serde(default)]
    pub message: String,
}

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Present on success; shape depends on the operation.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Present on failure; at least one entry when present.
    #[serde(default)]
    pub errors: Option<Vec<RemoteError>>,
}

impl Envelope {
    /// True when any error message contains "unauthorized",
    /// case-insensitively. This is the one condition that invalidates the
    /// current session.
    pub fn is_unauthorized(&self) -> bool {
        self.errors.as_deref().is_some_and(|errors| {
            errors
                .iter()
                .any(|e| e.message.to_lowercase().contains("unauthorized"))
        })
    }

    /// The first error message, if the envelope carries errors.
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(|errors| errors.first())
            .map(|e| e.message.as_str())
    }
}
