//! In-memory legacy authenticator

use crate::legacy::{AuthError, LegacyAuthenticator};
use crate::models::{Credential, LegacyAuthResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Accepts exactly one username/password pair and answers with a fixed token
pub struct MockLegacyAuthenticator {
    username: String,
    password: String,
    id_token: String,
    calls: AtomicUsize,
}

impl MockLegacyAuthenticator {
    #[must_use]
    pub fn new(username: &str, password: &str, id_token: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            id_token: id_token.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `authenticate` calls so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LegacyAuthenticator for MockLegacyAuthenticator {
    async fn authenticate(&self, credential: &Credential) -> Result<LegacyAuthResult, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if credential.username == self.username && credential.password() == self.password {
            Ok(LegacyAuthResult {
                id_token: self.id_token.clone(),
            })
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}
