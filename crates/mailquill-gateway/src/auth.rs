// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session tokens and the auth middleware.
//!
//! Login issues an expiring HMAC-SHA256-signed bearer token
//! (`base64url(claims).hex(signature)`). The middleware guards every
//! `/api/chats*` route; when no token secret is configured, all guarded
//! requests are rejected (fail-closed).

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use mailquill_core::MailquillError;

type HmacSha256 = Hmac<Sha256>;

/// Verified caller identity, inserted into request extensions by the
/// middleware.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

/// Signed token claims.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    /// Subject: the user id.
    sub: String,
    /// Expiry as unix seconds.
    exp: i64,
}

/// An issued session token plus its expiry.
#[derive(Debug, Clone, Serialize)]
pub struct SessionToken {
    pub token: String,
    /// RFC 3339 expiry timestamp.
    pub expires_at: String,
}

/// Token signing/verification keys.
#[derive(Clone)]
pub struct AuthKeys {
    secret: Option<Vec<u8>>,
    ttl_secs: i64,
}

impl std::fmt::Debug for AuthKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthKeys")
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl AuthKeys {
    /// Keys from configuration. `secret: None` disables issuing and makes
    /// every guarded route reject.
    pub fn new(secret: Option<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.map(String::into_bytes),
            ttl_secs: ttl_secs as i64,
        }
    }

    fn mac(&self) -> Result<HmacSha256, MailquillError> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| MailquillError::Auth("no token secret configured".to_string()))?;
        HmacSha256::new_from_slice(secret)
            .map_err(|e| MailquillError::Auth(format!("invalid token secret: {e}")))
    }

    /// Issues a signed token for `user_id`.
    pub fn issue(&self, user_id: &str) -> Result<SessionToken, MailquillError> {
        let ttl = chrono::TimeDelta::try_seconds(self.ttl_secs)
            .unwrap_or_else(chrono::TimeDelta::zero);
        let expires = chrono::Utc::now() + ttl;
        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: expires.timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&claims)
                .map_err(|e| MailquillError::Auth(format!("failed to encode claims: {e}")))?,
        );

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(SessionToken {
            token: format!("{payload}.{signature}"),
            expires_at: expires.to_rfc3339(),
        })
    }

    /// Verifies a token and returns the identity it names.
    pub fn verify(&self, token: &str) -> Result<Identity, MailquillError> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| MailquillError::Auth("malformed session token".to_string()))?;

        let signature = hex::decode(signature)
            .map_err(|_| MailquillError::Auth("malformed token signature".to_string()))?;
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| MailquillError::Auth("invalid token signature".to_string()))?;

        let claims: TokenClaims = serde_json::from_slice(
            &URL_SAFE_NO_PAD
                .decode(payload)
                .map_err(|_| MailquillError::Auth("malformed token payload".to_string()))?,
        )
        .map_err(|_| MailquillError::Auth("malformed token claims".to_string()))?;

        if claims.exp <= chrono::Utc::now().timestamp() {
            return Err(MailquillError::Auth("session token expired".to_string()));
        }

        Ok(Identity {
            user_id: claims.sub,
        })
    }

    /// Identity from an `Authorization: Bearer` header, if present and valid.
    pub fn identity_from_headers(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))?;
        self.verify(token).ok()
    }
}

/// Middleware requiring a valid session token.
///
/// On success the verified [`Identity`] is inserted into request extensions
/// for handlers to consume.
pub async fn require_session(
    State(auth): State<AuthKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    match auth.identity_from_headers(request.headers()) {
        Some(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Hashes a password with argon2id and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, MailquillError> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    Ok(argon2::Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| MailquillError::Auth(format!("failed to hash password: {e}")))?
        .to_string())
}

/// Verifies a password against a stored argon2 hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    PasswordHash::new(stored_hash)
        .map(|parsed| {
            argon2::Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> AuthKeys {
        AuthKeys::new(Some("0123456789abcdef0123456789abcdef".to_string()), 3600)
    }

    #[test]
    fn issue_then_verify_roundtrips() {
        let keys = keys();
        let session = keys.issue("user-42").unwrap();
        let identity = keys.verify(&session.token).unwrap();
        assert_eq!(identity.user_id, "user-42");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = keys();
        let session = keys.issue("user-42").unwrap();

        let (payload, signature) = session.token.split_once('.').unwrap();
        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::json!({"sub": "someone-else", "exp": i64::MAX}).to_string(),
        );
        let forged = format!("{forged_claims}.{signature}");
        assert!(keys.verify(&forged).is_err());

        let garbled = format!("{payload}.deadbeef");
        assert!(keys.verify(&garbled).is_err());
        assert!(keys.verify("not-a-token").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = AuthKeys::new(Some("0123456789abcdef0123456789abcdef".to_string()), 0);
        let session = keys.issue("user-42").unwrap();
        assert!(keys.verify(&session.token).is_err());
    }

    #[test]
    fn missing_secret_fails_closed() {
        let keys = AuthKeys::new(None, 3600);
        assert!(keys.issue("user-42").is_err());
        assert!(keys.verify("anything.deadbeef").is_err());
    }

    #[test]
    fn wrong_secret_does_not_verify() {
        let session = keys().issue("user-42").unwrap();
        let other = AuthKeys::new(Some("ffffffffffffffffffffffffffffffff".to_string()), 3600);
        assert!(other.verify(&session.token).is_err());
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert_ne!(hash, "hunter2hunter2");
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("hunter2hunter2", "not-a-phc-string"));
    }

    #[test]
    fn debug_redacts_secret() {
        let debug = format!("{:?}", keys());
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("[redacted]"));
    }
}
