//! Cognito `InitiateAuth` client
//!
//! Both the legacy authenticator and the login pass-through talk to a Cognito
//! user pool through the same JSON-over-HTTP protocol. This module owns the
//! wire types and the request itself; interpreting the response is left to the
//! caller.

use crate::models::Credential;
use crate::settings::ProviderSettings;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const AMZ_TARGET_HEADER: &str = "X-Amz-Target";
const INITIATE_AUTH_TARGET: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthRequest<'a> {
    pub auth_parameters: AuthParameters<'a>,
    pub auth_flow: &'a str,
    pub client_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AuthParameters<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for InitiateAuthRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitiateAuthRequest")
            .field("username", &self.auth_parameters.username)
            .field("auth_flow", &self.auth_flow)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthResponse {
    pub authentication_result: Option<AuthenticationResult>,
    pub challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

impl fmt::Debug for AuthenticationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let presence = |token: &Option<String>| if token.is_some() { "present" } else { "missing" };
        f.debug_struct("AuthenticationResult")
            .field("id_token", &presence(&self.id_token))
            .field("access_token", &presence(&self.access_token))
            .field("refresh_token", &presence(&self.refresh_token))
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// A resolved app client of one user pool
#[derive(Debug, Clone)]
pub struct CognitoClient {
    name: String,
    endpoint: String,
    client_id: String,
    auth_flow: String,
    http_client: reqwest::Client,
}

impl CognitoClient {
    /// Build a client from provider settings
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no endpoint or client ID
    pub fn from_settings(settings: &ProviderSettings, http_client: reqwest::Client) -> Result<Self> {
        let endpoint = settings
            .get_endpoint()
            .ok_or_else(|| anyhow!("Provider {} has no endpoint", settings.name))?;
        let client_id = settings
            .get_client_id()
            .ok_or_else(|| anyhow!("Provider {} has no client ID", settings.name))?;

        Ok(Self {
            name: settings.name.clone(),
            endpoint,
            client_id,
            auth_flow: settings.auth_flow.clone(),
            http_client,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a single password-grant `InitiateAuth` request
    ///
    /// The raw response is returned whatever its status; callers decide how
    /// to treat provider errors.
    ///
    /// # Errors
    ///
    /// Returns an error only if the request could not be sent or no response
    /// was received.
    pub async fn initiate_auth(
        &self,
        credential: &Credential,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let request = InitiateAuthRequest {
            auth_parameters: AuthParameters {
                username: &credential.username,
                password: credential.password(),
            },
            auth_flow: &self.auth_flow,
            client_id: &self.client_id,
        };
        log::debug!("Sending {request:?} to {} ({})", self.name, self.endpoint);

        // Content type goes first, `.json()` only sets `application/json` when none is present
        self.http_client
            .post(&self.endpoint)
            .header(AMZ_TARGET_HEADER, INITIATE_AUTH_TARGET)
            .header(reqwest::header::CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .json(&request)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_request_wire_format() {
        let request = InitiateAuthRequest {
            auth_parameters: AuthParameters {
                username: "steven",
                password: "hunter2",
            },
            auth_flow: "USER_PASSWORD_AUTH",
            client_id: "client-123",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "AuthParameters": {"USERNAME": "steven", "PASSWORD": "hunter2"},
                "AuthFlow": "USER_PASSWORD_AUTH",
                "ClientId": "client-123"
            })
        );
    }

    #[test]
    fn test_request_debug_hides_password() {
        let request = InitiateAuthRequest {
            auth_parameters: AuthParameters {
                username: "steven",
                password: "hunter2",
            },
            auth_flow: "USER_PASSWORD_AUTH",
            client_id: "client-123",
        };
        assert!(!format!("{request:?}").contains("hunter2"));
    }

    #[test]
    fn test_response_parses_challenge_without_result() {
        let response: InitiateAuthResponse = serde_json::from_value(json!({
            "ChallengeName": "NEW_PASSWORD_REQUIRED",
            "ChallengeParameters": {},
            "Session": "opaque"
        }))
        .unwrap();
        assert!(response.authentication_result.is_none());
        assert_eq!(response.challenge_name.as_deref(), Some("NEW_PASSWORD_REQUIRED"));
    }

    #[test]
    fn test_from_settings_requires_client_id() {
        let settings = ProviderSettings {
            client_id_env: None,
            ..ProviderSettings::legacy_default()
        };
        assert!(CognitoClient::from_settings(&settings, reqwest::Client::new()).is_err());

        let settings = ProviderSettings {
            client_id: Some("client-123".to_string()),
            client_id_env: None,
            ..ProviderSettings::legacy_default()
        };
        let client = CognitoClient::from_settings(&settings, reqwest::Client::new()).unwrap();
        assert_eq!(client.name(), "legacy");
        assert_eq!(client.endpoint(), "https://cognito-idp.ap-southeast-2.amazonaws.com/");
    }

    #[tokio::test]
    async fn test_initiate_auth_sends_amz_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(AMZ_TARGET_HEADER, INITIATE_AUTH_TARGET))
            .and(header("Content-Type", AMZ_JSON_CONTENT_TYPE))
            .and(body_json(json!({
                "AuthParameters": {"USERNAME": "steven", "PASSWORD": "hunter2"},
                "AuthFlow": "USER_PASSWORD_AUTH",
                "ClientId": "client-123"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let settings = ProviderSettings {
            endpoint: Some(server.uri()),
            client_id: Some("client-123".to_string()),
            client_id_env: None,
            ..ProviderSettings::legacy_default()
        };
        let client = CognitoClient::from_settings(&settings, reqwest::Client::new()).unwrap();
        let response = client
            .initiate_auth(&Credential::new("steven", "hunter2"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
