//! Query text construction for the four request shapes.
//!
//! The endpoint accepts a single `query` parameter carrying a GraphQL-style
//! selection. Arguments are interpolated through [`escape_argument`] so that
//! user-supplied text can never break out of its quoted position; URL-level
//! percent-encoding is handled by the HTTP layer.

use crate::types::AuthMode;

/// Selection set requested for every task-returning operation.
const TODO_FIELDS: &str = "{id,text,done}";

/// Selection set requested for authentication operations.
const AUTH_FIELDS: &str = "{token,user{id,email}}";

/// Escape a string argument for inclusion inside a double-quoted position.
///
/// Backslashes and double quotes are escaped; everything else passes through
/// unchanged. Control characters that JSON requires escaping (newline, tab,
/// carriage return) are also rewritten so a pasted multi-line task cannot
/// produce an unparseable query.
pub fn escape_argument(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Query requesting all tasks for the given session token.
pub fn todo_list(token: &str) -> String {
    format!(
        "{{todoList(token:\"{}\"){TODO_FIELDS}}}",
        escape_argument(token)
    )
}

/// Mutation creating one task.
pub fn create_todo(text: &str, token: &str) -> String {
    format!(
        "mutation _{{createTodo(text:\"{}\",token:\"{}\"){TODO_FIELDS}}}",
        escape_argument(text),
        escape_argument(token)
    )
}

/// Mutation toggling one task's completion state.
pub fn update_todo(id: &str, done: bool, token: &str) -> String {
    format!(
        "mutation _{{updateTodo(id:\"{}\",done:{done},token:\"{}\"){TODO_FIELDS}}}",
        escape_argument(id),
        escape_argument(token)
    )
}

/// Mutation authenticating with email and password.
///
/// `mode` selects between the `login` and `signup` mutation fields; both
/// return the same token/user payload.
pub fn authenticate(mode: AuthMode, email: &str, password: &str) -> String {
    format!(
        "mutation _{{{}(email:\"{}\",password:\"{}\"){AUTH_FIELDS}}}",
        mode.field_name(),
        escape_argument(email),
        escape_argument(password)
    )
}
