//! Session store
//!
//! Holds the operator token and identity. [`SessionStore`] is the single
//! owner allowed to mutate the session; everything else reads it through a
//! cloneable [`SessionView`].
//!
//! The session survives restarts through [`SessionStorage`], two files under
//! the data directory:
//!
//! ```text
//! {data_dir}/session/
//! ├── token        # raw token string
//! └── user.json    # identity record, verbatim from the server
//! ```

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::client::UserInfo;
use thiserror::Error;

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

#[derive(Debug, Error)]
pub enum SessionStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Session Data
// ============================================================================

/// In-memory session state.
///
/// Token and identity are written together, so readers never see one
/// without the other.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    token: Option<String>,
    user: Option<UserInfo>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

// ============================================================================
// Read-only View
// ============================================================================

/// Read-only handle on the session, handed to the gateway and the guard
#[derive(Debug, Clone)]
pub struct SessionView {
    inner: Arc<RwLock<SessionData>>,
}

impl SessionView {
    /// True iff a token is present
    pub fn has_session(&self) -> bool {
        self.inner.read().token.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.inner.read().user.clone()
    }

    pub fn snapshot(&self) -> SessionData {
        self.inner.read().clone()
    }

    /// `Authorization` header value for the current token
    pub fn bearer(&self) -> Option<String> {
        self.inner.read().token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Attach the bearer credential when a token is present.
    ///
    /// The request is returned unchanged when there is no session.
    pub fn attach(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }
}

// ============================================================================
// Owner
// ============================================================================

/// Owner of the session state.
///
/// All operations are total. Persistence failures are logged and the
/// in-memory state stays authoritative.
#[derive(Debug)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionData>>,
    storage: Option<SessionStorage>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Memory-only store, starts empty
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionData::default())),
            storage: None,
        }
    }

    /// Durable store, restoring any session saved by a previous run
    pub fn with_storage(storage: SessionStorage) -> Self {
        let data = match storage.load() {
            Ok(Some((token, user))) => {
                tracing::debug!(username = %user.username, "Session restored from disk");
                SessionData {
                    token: Some(token),
                    user: Some(user),
                }
            }
            Ok(None) => SessionData::default(),
            Err(e) => {
                tracing::warn!("Failed to restore session, starting signed out: {}", e);
                SessionData::default()
            }
        };

        Self {
            inner: Arc::new(RwLock::new(data)),
            storage: Some(storage),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            inner: self.inner.clone(),
        }
    }

    pub fn has_session(&self) -> bool {
        self.inner.read().token.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.inner.read().user.clone()
    }

    /// Store token and identity together
    pub fn establish(&self, token: impl Into<String>, user: UserInfo) {
        let token = token.into();

        if let Some(storage) = &self.storage
            && let Err(e) = storage.save(&token, &user)
        {
            tracing::warn!("Failed to persist session: {}", e);
        }

        let mut data = self.inner.write();
        data.token = Some(token);
        data.user = Some(user);
        tracing::debug!("Session established");
    }

    /// Remove token and identity. Idempotent.
    ///
    /// Returns `true` when there was something to remove.
    pub fn clear(&self) -> bool {
        let had_session = {
            let mut data = self.inner.write();
            let had = !data.is_empty();
            data.token = None;
            data.user = None;
            had
        };

        if let Some(storage) = &self.storage
            && let Err(e) = storage.clear()
        {
            tracing::warn!("Failed to remove persisted session: {}", e);
        }

        if had_session {
            tracing::debug!("Session cleared");
        }
        had_session
    }
}

// ============================================================================
// Durable Storage
// ============================================================================

/// File-backed key/value pair holding the token and the identity record
#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    pub fn save(&self, token: &str, user: &UserInfo) -> Result<(), SessionStorageError> {
        fs::create_dir_all(&self.dir)?;
        let user_json = serde_json::to_string_pretty(user)?;
        fs::write(self.user_path(), user_json)?;
        fs::write(self.token_path(), token)?;
        Ok(())
    }

    /// Load a saved session.
    ///
    /// Returns `None` unless both entries exist and parse; a half-written
    /// pair is discarded.
    pub fn load(&self) -> Result<Option<(String, UserInfo)>, SessionStorageError> {
        let token_path = self.token_path();
        let user_path = self.user_path();

        match (token_path.exists(), user_path.exists()) {
            (false, false) => return Ok(None),
            (true, true) => {}
            _ => {
                tracing::warn!("Incomplete persisted session, discarding");
                self.clear()?;
                return Ok(None);
            }
        }

        let token = fs::read_to_string(&token_path)?;
        if token.is_empty() {
            self.clear()?;
            return Ok(None);
        }

        let user: UserInfo = match serde_json::from_str(&fs::read_to_string(&user_path)?) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Unreadable identity record, discarding session: {}", e);
                self.clear()?;
                return Ok(None);
            }
        };

        Ok(Some((token, user)))
    }

    /// Remove both entries; missing files are fine
    pub fn clear(&self) -> Result<(), SessionStorageError> {
        for path in [self.token_path(), self.user_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
