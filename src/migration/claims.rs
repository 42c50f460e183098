//! Legacy identity claims and their mapping onto new-pool attributes

use crate::utils::jwt::{decode_jwt_payload, JwtDecodeError};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const ATTR_NAME: &str = "name";
pub const ATTR_EMAIL: &str = "email";
pub const ATTR_EMAIL_VERIFIED: &str = "email_verified";
pub const ATTR_PARTY_CODE: &str = "custom:partycode";
pub const ATTR_LEGACY_ACCOUNT_ID: &str = "custom:legacyaccountId";
pub const ATTR_LEGACY_CONTACT_ID: &str = "custom:legacycontactId";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimDecodeError {
    #[error("malformed identity token: {0}")]
    Malformed(#[from] JwtDecodeError),
    #[error("identity token is missing required claims: {0}")]
    MissingClaims(String),
}

/// Claims carried by a legacy identity token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityClaims {
    #[serde(rename = "sub")]
    pub subject: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "custom:partycode")]
    pub party_code: String,
    #[serde(rename = "custom:accountid")]
    pub legacy_account_id: String,
    #[serde(rename = "custom:contactid")]
    pub legacy_contact_id: String,
}

impl IdentityClaims {
    /// Decode claims from an identity token without verifying its signature
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed or any required claim is
    /// missing or not a string.
    pub fn from_id_token(id_token: &str) -> Result<Self, ClaimDecodeError> {
        let payload = decode_jwt_payload(id_token)?;
        serde_json::from_value(payload).map_err(|e| ClaimDecodeError::MissingClaims(e.to_string()))
    }

    /// Attributes for the migrated user, keyed by new-pool attribute name
    #[must_use]
    pub fn to_user_attributes(&self) -> BTreeMap<String, String> {
        [
            (ATTR_NAME, self.name.as_str()),
            (ATTR_EMAIL, self.email.as_str()),
            (ATTR_EMAIL_VERIFIED, "true"),
            (ATTR_PARTY_CODE, self.party_code.as_str()),
            (ATTR_LEGACY_ACCOUNT_ID, self.legacy_account_id.as_str()),
            (ATTR_LEGACY_CONTACT_ID, self.legacy_contact_id.as_str()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
    }
}
