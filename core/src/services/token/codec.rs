//! Compact JWS serialization: `base64url(header).base64url(payload).base64url(signature)`

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::{crypto, Algorithm, DecodingKey, EncodingKey};

use crate::domain::entities::token::{Claims, Token, TokenHeader};
use crate::errors::TokenError;

/// Stateless encoder/decoder for the three-segment token form
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenCodec;

impl TokenCodec {
    /// Splits and decodes a token string. The signature is not checked.
    pub fn decode(token: &str) -> Result<Token, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(TokenError::malformed(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        }
        let (header_segment, payload_segment, signature) = (segments[0], segments[1], segments[2]);

        let header_bytes = decode_segment(header_segment, "header")?;
        let header: TokenHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| TokenError::malformed(format!("invalid header: {}", e)))?;

        let payload_bytes = decode_segment(payload_segment, "payload")?;
        let claims: Claims = serde_json::from_slice(&payload_bytes)
            .map_err(|e| TokenError::malformed(format!("invalid payload: {}", e)))?;

        if signature.is_empty() {
            return Err(TokenError::malformed("empty signature"));
        }

        let signing_input = format!("{}.{}", header_segment, payload_segment);
        Ok(Token::new(header, claims, signing_input, signature.to_string()))
    }

    /// Checks the token's signature against `key`.
    ///
    /// Returns false when the token declares any algorithm other than
    /// `expected`, whatever its signature, so a token cannot choose how it
    /// is verified.
    pub fn verify(token: &Token, key: &DecodingKey, expected: Algorithm) -> bool {
        if token.algorithm() != expected {
            tracing::warn!(
                declared = ?token.algorithm(),
                expected = ?expected,
                "Rejected token with unexpected algorithm"
            );
            return false;
        }

        crypto::verify(
            token.signature(),
            token.signing_input().as_bytes(),
            key,
            expected,
        )
        .unwrap_or(false)
    }

    /// Signs `claims` and returns the compact token string
    pub fn encode(
        claims: &Claims,
        key: &EncodingKey,
        algorithm: Algorithm,
    ) -> Result<String, TokenError> {
        let header = serde_json::to_vec(&TokenHeader::new(algorithm)).map_err(|e| {
            TokenError::SigningFailed {
                message: e.to_string(),
            }
        })?;
        let payload = serde_json::to_vec(claims).map_err(|e| TokenError::SigningFailed {
            message: e.to_string(),
        })?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = crypto::sign(signing_input.as_bytes(), key, algorithm).map_err(|e| {
            TokenError::SigningFailed {
                message: e.to_string(),
            }
        })?;

        Ok(format!("{}.{}", signing_input, signature))
    }
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::malformed(format!("{} is not base64url: {}", name, e)))
}
