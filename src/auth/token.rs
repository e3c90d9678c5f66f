// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the configured shared secret. The
//! algorithm is pinned and expiry is checked with zero leeway, so an expired
//! or downgraded token is rejected outright. Every verification failure is
//! normalized into a negative [`TokenValidation`]; nothing in this module
//! panics or propagates a crypto error to callers.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::TokenValidation;

use super::claim::{Claim, VALUE_TYPE_INTEGER64};

/// Claim type of the generated unique token id.
pub const JTI_CLAIM: &str = "jti";

/// Claim type of the generated issued-at timestamp.
pub const IAT_CLAIM: &str = "iat";

/// JWT payload of a session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    iss: String,
    aud: String,
    exp: i64,
    iat: i64,
    jti: String,
    claims: Vec<Claim>,
}

/// A freshly minted session token plus the identifiers derived from it.
#[derive(Debug, Clone)]
pub struct MintedToken {
    /// The signed compact JWT.
    pub token: String,
    /// Unique token id, also used as the session id for credential caching.
    pub jti: String,
    /// Expiry instant encoded in the token.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign session token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    issuer: String,
    audience: String,
    expiration: Duration,
}

impl TokenService {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        expiration_minutes: i64,
    ) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            expiration: Duration::minutes(expiration_minutes),
        }
    }

    /// Mint a session token from the given claim set.
    ///
    /// Two generated claims are appended: the unique token id (`jti`, a
    /// random UUID) and the issued-at timestamp (`iat`, Unix seconds,
    /// integer64-typed). Both are also set as registered JWT claims.
    pub fn mint(&self, claims: &[Claim]) -> Result<MintedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + self.expiration;
        let jti = Uuid::new_v4().to_string();

        let mut all_claims = claims.to_vec();
        all_claims.push(Claim::new(JTI_CLAIM, &jti));
        all_claims.push(Claim::with_value_type(
            IAT_CLAIM,
            now.timestamp().to_string(),
            VALUE_TYPE_INTEGER64,
        ));

        let payload = SessionClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: jti.clone(),
            claims: all_claims,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(MintedToken {
            token,
            jti,
            expires_at,
        })
    }

    /// Verify a session token, failing closed.
    ///
    /// Returns a negative result on a blank or malformed token, a bad
    /// signature, an issuer/audience mismatch, expiry (no grace window), or
    /// any algorithm other than HS256.
    pub fn verify(&self, token: &str) -> TokenValidation {
        if token.trim().is_empty() {
            return TokenValidation::invalid("Invalid or expired token");
        }

        match self.decode(token) {
            Ok(payload) => TokenValidation::valid(payload.claims),
            Err(err) => TokenValidation::invalid(describe(&err)),
        }
    }

    /// `verify` reduced to its boolean.
    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_valid
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expired means expired: no clock-skew grace.
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }
}

fn describe(err: &jsonwebtoken::errors::Error) -> &'static str {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => "Token has expired",
        ErrorKind::InvalidSignature => "Token signature is invalid",
        ErrorKind::InvalidIssuer => "Token issuer is invalid",
        ErrorKind::InvalidAudience => "Token audience is invalid",
        ErrorKind::InvalidAlgorithm => "Token algorithm is not allowed",
        ErrorKind::ImmatureSignature => "Token is not yet valid",
        _ => "Token is malformed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-key-0123456789abcdef";

    fn service() -> TokenService {
        TokenService::new(SECRET, "auth-gateway", "gateway-clients", 60)
    }

    fn sign(payload: &SessionClaims, secret: &str, algorithm: Algorithm) -> String {
        encode(
            &Header::new(algorithm),
            payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn payload_expiring_at(exp: i64) -> SessionClaims {
        SessionClaims {
            iss: "auth-gateway".to_string(),
            aud: "gateway-clients".to_string(),
            exp,
            iat: Utc::now().timestamp(),
            jti: "test-jti".to_string(),
            claims: vec![Claim::new("role", "User")],
        }
    }

    #[test]
    fn verify_accepts_minted_token_with_claim_superset() {
        let service = service();
        let supplied = vec![Claim::new("role", "Admin"), Claim::new("email", "a@b.com")];

        let minted = service.mint(&supplied).unwrap();
        let outcome = service.verify(&minted.token);

        assert!(outcome.is_valid);
        for claim in &supplied {
            assert!(outcome.claims.contains(claim));
        }
        let jti = outcome
            .claims
            .iter()
            .find(|c| c.claim_type == JTI_CLAIM)
            .unwrap();
        assert_eq!(jti.value, minted.jti);
        let iat = outcome
            .claims
            .iter()
            .find(|c| c.claim_type == IAT_CLAIM)
            .unwrap();
        assert_eq!(iat.value_type, VALUE_TYPE_INTEGER64);
    }

    #[test]
    fn verify_rejects_token_expired_one_second_ago() {
        let service = service();
        let payload = payload_expiring_at(Utc::now().timestamp() - 1);
        let token = sign(&payload, SECRET, Algorithm::HS256);

        let outcome = service.verify(&token);
        assert!(!outcome.is_valid);
        assert!(outcome.claims.is_empty());
        assert_eq!(outcome.error_message.as_deref(), Some("Token has expired"));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let service = service();
        let minted = service.mint(&[Claim::new("role", "User")]).unwrap();

        let (head, signature) = minted.token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { "B" } else { "A" };
        let token = format!("{head}.{flipped}{}", &signature[1..]);

        assert!(!service.verify(&token).is_valid);
    }

    #[test]
    fn verify_rejects_payload_tampering() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let service = service();
        let minted = service.mint(&[Claim::new("role", "User")]).unwrap();

        // Rewrite the role claim inside the payload, keeping the signature.
        let parts: Vec<&str> = minted.token.split('.').collect();
        let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(payload.replace("\"User\"", "\"Admin\""));
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(!service.verify(&forged).is_valid);
    }

    #[test]
    fn verify_rejects_issuer_mismatch() {
        let service = service();
        let other = TokenService::new(SECRET, "someone-else", "gateway-clients", 60);

        let minted = other.mint(&[]).unwrap();
        let outcome = service.verify(&minted.token);
        assert!(!outcome.is_valid);
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("Token issuer is invalid")
        );
    }

    #[test]
    fn verify_rejects_audience_mismatch() {
        let service = service();
        let other = TokenService::new(SECRET, "auth-gateway", "another-audience", 60);

        let minted = other.mint(&[]).unwrap();
        assert!(!service.verify(&minted.token).is_valid);
    }

    #[test]
    fn verify_rejects_non_hs256_algorithm() {
        let service = service();
        let payload = payload_expiring_at(Utc::now().timestamp() + 3600);
        let token = sign(&payload, SECRET, Algorithm::HS384);

        let outcome = service.verify(&token);
        assert!(!outcome.is_valid);
    }

    #[test]
    fn verify_rejects_blank_and_garbage_tokens() {
        let service = service();
        assert!(!service.verify("").is_valid);
        assert!(!service.verify("   ").is_valid);
        assert!(!service.verify("not.a.jwt").is_valid);
    }

    #[test]
    fn is_valid_mirrors_verify() {
        let service = service();
        let minted = service.mint(&[]).unwrap();
        assert!(service.is_valid(&minted.token));
        assert!(!service.is_valid("garbage"));
    }
}
