//! Authentication against the legacy user pool

use crate::cognito::{CognitoClient, InitiateAuthResponse};
use crate::models::{Credential, LegacyAuthResult};
use crate::utils::logging::LoggingHelper;
use async_trait::async_trait;
use thiserror::Error;

/// Legacy authentication failure.
///
/// Wrong password, unknown user, network failure and provider outage are
/// deliberately indistinguishable to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,
}

/// Verifies a credential against the legacy identity provider
#[async_trait]
pub trait LegacyAuthenticator: Send + Sync {
    /// Authenticate with a single password-grant request
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] for every failure mode
    async fn authenticate(&self, credential: &Credential) -> Result<LegacyAuthResult, AuthError>;
}

/// [`LegacyAuthenticator`] backed by a Cognito user pool
#[derive(Debug, Clone)]
pub struct CognitoLegacyAuthenticator {
    client: CognitoClient,
}

impl CognitoLegacyAuthenticator {
    #[must_use]
    pub fn new(client: CognitoClient) -> Self {
        Self { client }
    }

    /// Reduce a parsed response to an auth result; `None` when no usable
    /// identity token was issued
    fn into_auth_result(response: InitiateAuthResponse) -> Option<LegacyAuthResult> {
        if let Some(challenge) = &response.challenge_name {
            log::warn!("Legacy provider answered with challenge {challenge} instead of tokens");
        }
        let result = response.authentication_result?;
        let id_token = result.id_token.filter(|token| !token.is_empty())?;

        Some(LegacyAuthResult { id_token })
    }
}

#[async_trait]
impl LegacyAuthenticator for CognitoLegacyAuthenticator {
    async fn authenticate(&self, credential: &Credential) -> Result<LegacyAuthResult, AuthError> {
        if !credential.is_complete() {
            LoggingHelper::log_legacy_auth_failure(&credential.username, "empty username or password");
            return Err(AuthError::UserNotFound);
        }

        let response = match self.client.initiate_auth(credential).await {
            Ok(response) => response,
            Err(e) => {
                LoggingHelper::log_legacy_auth_failure(&credential.username, &e.to_string());
                return Err(AuthError::UserNotFound);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            LoggingHelper::log_legacy_auth_failure(
                &credential.username,
                &format!("status {status}: {error_text}"),
            );
            return Err(AuthError::UserNotFound);
        }

        let parsed = match response.json::<InitiateAuthResponse>().await {
            Ok(parsed) => parsed,
            Err(e) => {
                LoggingHelper::log_legacy_auth_failure(&credential.username, &e.to_string());
                return Err(AuthError::UserNotFound);
            }
        };
        log::debug!("Legacy authentication result: {:?}", parsed.authentication_result);

        let Some(result) = Self::into_auth_result(parsed) else {
            LoggingHelper::log_legacy_auth_failure(&credential.username, "no identity token issued");
            return Err(AuthError::UserNotFound);
        };

        LoggingHelper::log_legacy_auth_success(&credential.username, self.client.name());
        Ok(result)
    }
}
