//! Login flow
//!
//! `Idle -> Submitting -> {Authenticated | Failed}`. `Failed` is
//! re-enterable: the next submission goes back to `Submitting`.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::client::UserInfo;
use thiserror::Error;

use crate::api::BadgeApi;
use crate::error::FailureKind;
use crate::route::{Navigator, Route};
use crate::session::SessionStore;

pub const MSG_EMPTY_CREDENTIALS: &str = "الرجاء إدخال اسم المستخدم وكلمة المرور";
pub const MSG_LOGIN_FAILED: &str = "اسم المستخدم أو كلمة المرور غير صحيحة";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Rejected locally, no request was sent
    #[error("Username and password are required")]
    EmptyCredentials,

    /// The remote call failed; the kind is for diagnostics only
    #[error("Login rejected ({0})")]
    Rejected(FailureKind),
}

impl LoginError {
    /// Message shown to the operator
    pub fn user_message(&self) -> &'static str {
        match self {
            LoginError::EmptyCredentials => MSG_EMPTY_CREDENTIALS,
            LoginError::Rejected(_) => MSG_LOGIN_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginPhase {
    Idle,
    Submitting,
    Authenticated,
    Failed(LoginError),
}

impl LoginPhase {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            LoginPhase::Failed(e) => Some(e.user_message()),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, LoginPhase::Submitting)
    }
}

pub struct LoginFlow {
    api: Arc<dyn BadgeApi>,
    session: Arc<SessionStore>,
    navigator: Navigator,
    phase: Mutex<LoginPhase>,
}

impl LoginFlow {
    pub fn new(api: Arc<dyn BadgeApi>, session: Arc<SessionStore>, navigator: Navigator) -> Self {
        Self {
            api,
            session,
            navigator,
            phase: Mutex::new(LoginPhase::Idle),
        }
    }

    pub fn phase(&self) -> LoginPhase {
        self.phase.lock().clone()
    }

    fn set_phase(&self, phase: LoginPhase) {
        tracing::debug!(?phase, "Login phase");
        *self.phase.lock() = phase;
    }

    /// Submit credentials.
    ///
    /// On success the session is established and the navigator moves to
    /// `/generator`.
    pub async fn submit(&self, username: &str, password: &str) -> Result<UserInfo, LoginError> {
        if username.trim().is_empty() || password.is_empty() {
            let err = LoginError::EmptyCredentials;
            self.set_phase(LoginPhase::Failed(err.clone()));
            return Err(err);
        }

        self.set_phase(LoginPhase::Submitting);

        match self.api.authenticate(username, password).await {
            Ok(resp) => {
                self.session.establish(resp.token, resp.user.clone());
                self.set_phase(LoginPhase::Authenticated);
                tracing::info!(username = %resp.user.username, "Operator logged in");
                self.navigator.navigate(Route::Generator);
                Ok(resp.user)
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind(), "Login error: {}", e);
                let err = LoginError::Rejected(e.kind());
                self.set_phase(LoginPhase::Failed(err.clone()));
                Err(err)
            }
        }
    }
}
