//! Session model and durable session storage.
//!
//! A session is the client's belief about being authenticated: an opaque
//! bearer token plus the user profile returned alongside it. Both are
//! persisted as separate entries (`auth_token`, `user_info`) under a state
//! directory so a session survives process restarts. Absence of the token
//! means logged out; a stored profile without a token is ignored.

use crate::error::{Result, SyncError};
use crate::types::User;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Storage key for the bearer token.
const TOKEN_KEY: &str = "auth_token";

/// Storage key for the serialized user profile.
const USER_KEY: &str = "user_info";

/// The client's current authentication state.
///
/// Invariant: `user` is only ever present when `token` is present. The
/// constructors and [`SessionStore::load`] both enforce this.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// An empty, logged-out session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A session holding a token and profile.
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// A session holding a token whose stored profile was absent or
    /// unparseable. Still counts as logged in; the profile display is
    /// simply unavailable.
    pub fn token_only(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    /// The bearer token, when present.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The user profile, when present.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True when a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    // The token is a secret; never let it reach logs through Debug.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

/// File-backed durable storage for the session.
///
/// Each key is one file under the state directory. Writes go through a
/// temp-file rename so no reader ever observes a half-written entry.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default state directory.
    pub fn default_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var_os("LOCALAPPDATA").map(|d| PathBuf::from(d).join("todosync"))
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var_os("HOME")
                .map(|h| PathBuf::from(h).join(".config").join("todosync"))
        }
    }

    /// Read the persisted session.
    ///
    /// A missing token yields an empty session regardless of any stored
    /// profile. A profile that fails to parse is dropped with a warning but
    /// the token is kept, so the session still counts as logged in.
    pub fn load(&self) -> Session {
        let token = match read_entry(&self.dir.join(TOKEN_KEY)) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return Session::empty(),
            Err(e) => {
                warn!("cannot read stored token, treating session as empty: {e}");
                return Session::empty();
            }
        };

        match read_entry(&self.dir.join(USER_KEY)) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Session::authenticated(token, user),
                Err(e) => {
                    warn!("cannot parse stored user profile, keeping token: {e}");
                    Session::token_only(token)
                }
            },
            Ok(None) => Session::token_only(token),
            Err(e) => {
                warn!("cannot read stored user profile, keeping token: {e}");
                Session::token_only(token)
            }
        }
    }

    /// Persist a token and profile, replacing whatever was stored.
    pub fn set(&self, token: &str, user: &User) -> Result<()> {
        let profile = serde_json::to_string(user)
            .map_err(|e| SyncError::Session(format!("cannot serialize user profile: {e}")))?;
        write_entry(&self.dir.join(TOKEN_KEY), token)?;
        write_entry(&self.dir.join(USER_KEY), &profile)?;
        Ok(())
    }

    /// Remove both stored entries. Succeeds silently when nothing was stored.
    pub fn clear(&self) -> Result<()> {
        remove_entry(&self.dir.join(TOKEN_KEY))?;
        remove_entry(&self.dir.join(USER_KEY))?;
        Ok(())
    }
}

fn read_entry(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents.trim_end_matches('\n').to_owned())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SyncError::Session(format!(
            "cannot read {}: {e}",
            path.display()
        ))),
    }
}

fn write_entry(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| SyncError::Session(format!("cannot create state dir: {e}")))?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents)
        .map_err(|e| SyncError::Session(format!("cannot write {}: {e}", tmp.display())))?;
    std::fs::rename(&tmp, path)
        .map_err(|e| SyncError::Session(format!("cannot replace {}: {e}", path.display())))?;
    Ok(())
}

fn remove_entry(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SyncError::Session(format!(
            "cannot remove {}: {e}",
            path.display()
        ))),
    }
}
