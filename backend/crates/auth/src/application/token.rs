//! Access Token Service
//!
//! Stateless signed access tokens. A token is
//! `base64url(claims JSON) . base64url(HMAC-SHA256(secret, payload))`
//! where the claims carry the user id and issue/expiry instants in Unix
//! milliseconds. Nothing is stored server-side; validity is purely the
//! signature plus the expiry check, so there is no revocation list and
//! logout is client-side token discard.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Signed token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id
    pub sub: Uuid,
    /// Issued at (Unix ms)
    pub iat: i64,
    /// Expires at (Unix ms)
    pub exp: i64,
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a signed access token for a user
    pub fn issue(&self, user_id: &UserId) -> AuthResult<String> {
        let now_ms = Utc::now().timestamp_millis();
        let claims = TokenClaims {
            sub: *user_id.as_uuid(),
            iat: now_ms,
            exp: now_ms + self.config.token_ttl_ms(),
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("Failed to encode token claims: {e}")))?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = HmacSha256::new_from_slice(&self.config.token_secret)
            .map_err(|e| AuthError::Internal(format!("Invalid token secret: {e}")))?;
        mac.update(payload_b64.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            payload_b64,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify a token and return the user id it was issued for
    ///
    /// The signature is checked before the payload is parsed, so malformed
    /// claims in a correctly-signed token are the only way to reach the
    /// parse step.
    pub fn verify(&self, token: &str) -> AuthResult<UserId> {
        let (payload_b64, signature_b64) = match token.split_once('.') {
            Some(parts) if !parts.1.contains('.') => parts,
            _ => return Err(AuthError::TokenInvalid),
        };

        let mut mac = HmacSha256::new_from_slice(&self.config.token_secret)
            .map_err(|e| AuthError::Internal(format!("Invalid token secret: {e}")))?;
        mac.update(payload_b64.as_bytes());

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::TokenInvalid)?;

        // Constant-time comparison inside the hmac crate
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::TokenInvalid)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::TokenInvalid)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)?;

        if Utc::now().timestamp_millis() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(UserId::from_uuid(claims.sub))
    }
}
