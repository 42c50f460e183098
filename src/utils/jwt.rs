//! JWT payload decoding
//!
//! Tokens handled here were issued moments earlier by the identity provider
//! over the same TLS connection, so only the payload is decoded. The
//! signature segment is never checked.

use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JwtDecodeError {
    #[error("Invalid JWT format")]
    InvalidFormat,
    #[error("Base64 decode failed")]
    Base64,
    #[error("UTF-8 decode failed")]
    Utf8,
    #[error("JSON parse failed")]
    Json,
}

/// Decode the payload segment of a compact JWT into a JSON value
///
/// # Errors
///
/// Returns an error if the token does not have three segments, or the payload
/// is not base64url-encoded UTF-8 JSON.
pub fn decode_jwt_payload(token: &str) -> Result<Value, JwtDecodeError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts[1].is_empty() {
        return Err(JwtDecodeError::InvalidFormat);
    }

    let payload_b64 = parts[1];
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| general_purpose::STANDARD.decode(payload_b64))
        .map_err(|_| JwtDecodeError::Base64)?;

    let payload_str = String::from_utf8(payload_bytes).map_err(|_| JwtDecodeError::Utf8)?;

    serde_json::from_str(&payload_str).map_err(|_| JwtDecodeError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &[u8]) -> String {
        general_purpose::URL_SAFE_NO_PAD.encode(value)
    }

    #[test]
    fn test_decode_payload() {
        let token = format!(
            "{}.{}.sig",
            encode(br#"{"alg":"RS256"}"#),
            encode(br#"{"sub":"abc","name":"Steven"}"#)
        );
        let payload = decode_jwt_payload(&token).unwrap();
        assert_eq!(payload, json!({"sub": "abc", "name": "Steven"}));
    }

    #[test]
    fn test_signature_is_not_checked() {
        let token = format!("header.{}.not-a-real-signature", encode(br#"{"sub":"abc"}"#));
        assert!(decode_jwt_payload(&token).is_ok());
    }

    #[test]
    fn test_decode_rejects_wrong_segment_count() {
        assert_eq!(decode_jwt_payload("abc"), Err(JwtDecodeError::InvalidFormat));
        assert_eq!(decode_jwt_payload("a.b"), Err(JwtDecodeError::InvalidFormat));
        assert_eq!(decode_jwt_payload("a.b.c.d"), Err(JwtDecodeError::InvalidFormat));
        assert_eq!(decode_jwt_payload("a..c"), Err(JwtDecodeError::InvalidFormat));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert_eq!(
            decode_jwt_payload("completely.inv@lid!.token"),
            Err(JwtDecodeError::Base64)
        );
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        let token = format!("h.{}.s", encode(&[0xff, 0xfe, 0xfd]));
        assert_eq!(decode_jwt_payload(&token), Err(JwtDecodeError::Utf8));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let token = format!("h.{}.s", encode(b"not json"));
        assert_eq!(decode_jwt_payload(&token), Err(JwtDecodeError::Json));
    }
}
