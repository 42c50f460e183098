//! Pre-built test data

use super::constants::{
    LEGACY_CLIENT_ID, NEW_CLIENT_ID, TEST_ACCOUNT_ID, TEST_CONTACT_ID, TEST_NAME,
    TEST_PARTY_CODE, TEST_PASSWORD, TEST_SUBJECT, TEST_USERNAME,
};
use crate::migration::trigger::{TriggerEvent, USER_MIGRATION_AUTHENTICATION};
use crate::settings::{BridgeSettings, ProviderSettings};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};

pub struct TestFixtures;

impl TestFixtures {
    /// Claims as issued by the legacy pool for the test user
    #[must_use]
    pub fn legacy_claims() -> Value {
        json!({
            "sub": TEST_SUBJECT,
            "role": "Account Holder",
            "email_verified": true,
            "custom:partycode": TEST_PARTY_CODE,
            "iss": "https://cognito-idp.ap-southeast-2.amazonaws.com/ap-southeast-2_EXAMPLE",
            "custom:accountid": TEST_ACCOUNT_ID,
            "cognito:username": TEST_SUBJECT,
            "custom:contactid": TEST_CONTACT_ID,
            "aud": LEGACY_CLIENT_ID,
            "token_use": "id",
            "auth_time": 1_664_930_476,
            "name": TEST_NAME,
            "exp": 1_664_934_076,
            "iat": 1_664_930_476,
            "email": TEST_USERNAME
        })
    }

    /// Unsigned compact JWT carrying `claims`
    #[must_use]
    pub fn id_token(claims: &Value) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","kid":"test"}"#);
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.dGVzdC1zaWduYXR1cmU")
    }

    /// Legacy identity token for the test user
    #[must_use]
    pub fn legacy_id_token() -> String {
        Self::id_token(&Self::legacy_claims())
    }

    /// Successful `InitiateAuth` response body
    #[must_use]
    pub fn initiate_auth_success(id_token: &str) -> Value {
        json!({
            "AuthenticationResult": {
                "AccessToken": "access-token",
                "ExpiresIn": 3600,
                "IdToken": id_token,
                "RefreshToken": "refresh-token",
                "TokenType": "Bearer"
            },
            "ChallengeParameters": {}
        })
    }

    /// `InitiateAuth` error body for a wrong password
    #[must_use]
    pub fn initiate_auth_not_authorized() -> Value {
        json!({
            "__type": "NotAuthorizedException",
            "message": "Incorrect username or password."
        })
    }

    /// Raw migration trigger event as the new pool sends it
    #[must_use]
    pub fn raw_trigger_event(trigger_source: &str, password: &str) -> Value {
        json!({
            "version": "1",
            "triggerSource": trigger_source,
            "region": "ap-southeast-2",
            "userPoolId": "ap-southeast-2_NEWPOOL",
            "userName": TEST_USERNAME,
            "callerContext": {
                "awsSdkVersion": "aws-sdk-unknown-unknown",
                "clientId": NEW_CLIENT_ID
            },
            "request": {
                "password": password,
                "validationData": null,
                "clientMetadata": null
            },
            "response": {
                "userAttributes": null,
                "finalUserStatus": null,
                "messageAction": null,
                "desiredDeliveryMediums": null,
                "forceAliasCreation": null
            }
        })
    }

    /// Authentication-migration event for the test user
    ///
    /// # Panics
    ///
    /// Panics if the fixture JSON does not match [`TriggerEvent`]
    #[must_use]
    pub fn migration_event() -> TriggerEvent {
        serde_json::from_value(Self::raw_trigger_event(
            USER_MIGRATION_AUTHENTICATION,
            TEST_PASSWORD,
        ))
        .expect("fixture event should parse")
    }

    /// Settings with both providers pointed at `endpoint`
    #[must_use]
    pub fn settings_for_endpoint(endpoint: &str) -> BridgeSettings {
        BridgeSettings {
            legacy_provider: ProviderSettings {
                endpoint: Some(endpoint.to_string()),
                client_id: Some(LEGACY_CLIENT_ID.to_string()),
                client_id_env: None,
                ..ProviderSettings::legacy_default()
            },
            new_provider: ProviderSettings {
                endpoint: Some(endpoint.to_string()),
                client_id: Some(NEW_CLIENT_ID.to_string()),
                client_id_env: None,
                ..ProviderSettings::new_provider_default()
            },
            ..BridgeSettings::default()
        }
    }
}
