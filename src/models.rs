use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Username/password pair presented by a user.
///
/// Lives only for the duration of one authentication call. The password is
/// redacted from `Debug` output so a credential can never leak through a log
/// statement.
#[derive(Clone, Deserialize)]
pub struct Credential {
    pub username: String,
    password: String,
}

impl Credential {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Both username and password are non-empty
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body accepted by the `/login` endpoint
pub type LoginRequest = Credential;

/// Successful outcome of authenticating against the legacy provider
#[derive(Clone)]
pub struct LegacyAuthResult {
    /// Signed identity token, never empty
    pub id_token: String,
}

impl fmt::Debug for LegacyAuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyAuthResult")
            .field("id_token", &"<redacted>")
            .finish()
    }
}
