//! User-migration trigger event
//!
//! Mirrors the JSON event a Cognito user pool sends to its migration trigger.
//! Fields the bridge does not interpret are kept in `extra` maps so the event
//! returned to the pool carries everything it was given.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Trigger source fired when an unknown user signs in
pub const USER_MIGRATION_AUTHENTICATION: &str = "UserMigration_Authentication";

/// Trigger source fired when an unknown user starts a password reset
pub const USER_MIGRATION_FORGOT_PASSWORD: &str = "UserMigration_ForgotPassword";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub trigger_source: String,
    pub user_name: String,
    #[serde(default)]
    pub request: TriggerRequest,
    #[serde(default)]
    pub response: TriggerResponse,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TriggerEvent {
    #[must_use]
    pub fn is_authentication_migration(&self) -> bool {
        self.trigger_source == USER_MIGRATION_AUTHENTICATION
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub final_user_status: Option<FinalUserStatus>,
    #[serde(default)]
    pub message_action: Option<MessageAction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalUserStatus {
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageAction {
    Suppress,
}

/// The pool sends `null` for an empty attribute map
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_event() -> Value {
        json!({
            "version": "1",
            "triggerSource": "UserMigration_Authentication",
            "region": "ap-southeast-2",
            "userPoolId": "ap-southeast-2_EXAMPLE",
            "userName": "test@x.com",
            "callerContext": {
                "awsSdkVersion": "aws-sdk-unknown-unknown",
                "clientId": "5q5f5ttrv0bj36gouc972qfb0l"
            },
            "request": {
                "password": "hunter2",
                "validationData": null,
                "clientMetadata": {"source": "web"}
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

    #[test]
    fn test_parse_pool_event() {
        let event: TriggerEvent = serde_json::from_value(raw_event()).unwrap();
        assert!(event.is_authentication_migration());
        assert_eq!(event.user_name, "test@x.com");
        assert_eq!(event.request.password.as_deref(), Some("hunter2"));
        assert!(event.response.user_attributes.is_empty());
        assert_eq!(event.response.final_user_status, None);
        assert_eq!(event.extra["userPoolId"], "ap-southeast-2_EXAMPLE");
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let event: TriggerEvent = serde_json::from_value(raw_event()).unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["callerContext"]["clientId"], "5q5f5ttrv0bj36gouc972qfb0l");
        assert_eq!(value["request"]["clientMetadata"]["source"], "web");
        assert!(value["response"]
            .as_object()
            .unwrap()
            .contains_key("forceAliasCreation"));
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_value(FinalUserStatus::Confirmed).unwrap(),
            json!("CONFIRMED")
        );
        assert_eq!(
            serde_json::to_value(MessageAction::Suppress).unwrap(),
            json!("SUPPRESS")
        );
    }

    #[test]
    fn test_forgot_password_is_not_authentication() {
        let mut value = raw_event();
        value["triggerSource"] = json!(USER_MIGRATION_FORGOT_PASSWORD);
        let event: TriggerEvent = serde_json::from_value(value).unwrap();
        assert!(!event.is_authentication_migration());
    }
}
