//! Login pass-through to the new user pool
//!
//! Stateless: the credential is forwarded as-is and whatever the pool answers
//! is relayed back without normalization.

use crate::cognito::CognitoClient;
use crate::models::LoginRequest;
use crate::utils::logging::LoggingHelper;
use serde_json::{json, Value};

/// Relayed provider answer
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub status: u16,
    pub body: Value,
}

impl LoginOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone)]
pub struct LoginPassThrough {
    client: CognitoClient,
}

impl LoginPassThrough {
    #[must_use]
    pub fn new(client: CognitoClient) -> Self {
        Self { client }
    }

    /// Forward a login to the new pool.
    ///
    /// A 2xx answer becomes `200` with the pool's body and any other status
    /// becomes `500` with the raw error body. If the request cannot be sent or
    /// the body is cut short, the result is `500` with `{"message": ...}`.
    pub async fn forward(&self, request: &LoginRequest) -> LoginOutcome {
        LoggingHelper::log_login_forwarded(&request.username, self.client.name());

        let response = match self.client.initiate_auth(request).await {
            Ok(response) => response,
            Err(e) => return Self::transport_failure(request, &e),
        };

        let upstream_status = response.status();
        let raw = match response.bytes().await {
            Ok(raw) => raw,
            Err(e) => return Self::transport_failure(request, &e),
        };
        LoggingHelper::log_login_result(&request.username, Some(upstream_status.as_u16()));

        let body = serde_json::from_slice(&raw)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&raw).into_owned()));

        LoginOutcome {
            status: if upstream_status.is_success() { 200 } else { 500 },
            body,
        }
    }

    /// No complete answer was received from the pool
    fn transport_failure(request: &LoginRequest, error: &reqwest::Error) -> LoginOutcome {
        LoggingHelper::log_login_result(&request.username, None);
        LoginOutcome {
            status: 500,
            body: json!({ "message": error.to_string() }),
        }
    }
}
