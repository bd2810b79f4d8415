//! Durable session store: the authenticated identity plus bearer token,
//! persisted across restarts so a relaunch does not re-prompt for login.
//!
//! Every gateway call reads the token from here. Logout clears memory and
//! disk unconditionally and is idempotent.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

/// Authenticated session as returned by `POST /api/login` and as stored
/// in the session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Errors from session persistence.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Failed to persist session: {0}")]
    Persist(String),
}

/// In-memory session guarded by `RwLock` (many concurrent gateway reads,
/// writes only on login/logout), backed by a JSON file on disk.
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
    path: PathBuf,
}

impl SessionStore {
    /// Open the store, restoring a previously saved session if one exists.
    ///
    /// A missing file means "not authenticated". A corrupt or unreadable
    /// file degrades the same way, with a warning — it must never panic
    /// or block startup.
    pub fn open(path: PathBuf) -> Self {
        let restored = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    tracing::info!(user = %session.user.name, "Restored saved session");
                    Some(session)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session file is corrupt, starting logged out");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot read session file, starting logged out");
                None
            }
        };
        Self {
            inner: RwLock::new(restored),
            path,
        }
    }

    /// Store at the default location (`~/Klinika/session.json`).
    pub fn open_default() -> Self {
        Self::open(crate::config::session_file())
    }

    /// The authenticated user, if any. Value snapshot, used to seed
    /// screen state at startup.
    pub fn current_user(&self) -> Option<User> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.user.clone()))
    }

    /// Role of the authenticated user, if any.
    pub fn role(&self) -> Option<Role> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.user.role))
    }

    /// Bearer token for gateway calls, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.token.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Activate a session (login) and persist it to disk.
    pub fn set(&self, session: Session) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| SessionError::Persist(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(&session)
            .map_err(|e| SessionError::Persist(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| SessionError::Persist(e.to_string()))?;

        let mut guard = self.inner.write().map_err(|_| SessionError::LockPoisoned)?;
        *guard = Some(session);
        Ok(())
    }

    /// Logout: clear memory and disk unconditionally. Idempotent —
    /// clearing an already-cleared store is a no-op.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::info!("Session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, "Could not delete session file"),
        }
    }
}
