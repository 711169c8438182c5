//! Client-related types shared between the API and its consumers
//!
//! Request/response bodies of `POST /auth/login`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Operator identity as issued by the auth endpoint.
///
/// Only `username` is interpreted. Every other field is kept verbatim so the
/// record can be persisted and restored exactly as the server sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub username: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserInfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_keeps_unknown_fields() {
        let raw = r#"{"username":"amal","id":3,"role":"admin"}"#;
        let user: UserInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(user.username, "amal");
        assert_eq!(user.extra.get("role").unwrap(), "admin");

        let back: serde_json::Value = serde_json::to_value(&user).unwrap();
        assert_eq!(back, serde_json::from_str::<serde_json::Value>(raw).unwrap());
    }

    #[test]
    fn test_login_response_parse() {
        let raw = r#"{"token":"abc","user":{"username":"amal"}}"#;
        let resp: LoginResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.user, UserInfo::new("amal"));
    }
}
