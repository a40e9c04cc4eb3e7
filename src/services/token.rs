//! Token service
//!
//! Issues and verifies the signed bearer tokens that authenticate API
//! requests. Tokens are stateless: everything needed to verify one is the
//! token itself plus the server secret, so no session storage is involved.
//!
//! # Format
//!
//! A token is three base64url segments joined by dots, in the JWT layout:
//!
//! ```text
//! base64url(header) . base64url(claims) . base64url(signature)
//! ```
//!
//! The header is the fixed string `{"alg":"HS256","typ":"JWT"}`. The claims
//! carry the username as subject plus issued-at and expiry timestamps. The
//! signature is HMAC-SHA256 over the first two segments.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use data_encoding::BASE64URL_NOPAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The fixed token header, identifying the signing algorithm
const TOKEN_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Claims carried inside a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the username this token was issued for
    pub sub: String,
    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

/// Why a token failed verification.
///
/// The three cases are deliberately distinct: a garbled token, a token
/// signed with the wrong secret, and a genuine token past its expiry are
/// different situations even though all of them end in a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token does not have the expected three-segment structure
    #[error("Malformed token")]
    Malformed,
    /// The signature does not match the token contents
    #[error("Invalid token signature")]
    InvalidSignature,
    /// The token was validly signed but its expiry has passed
    #[error("Token expired")]
    Expired,
}

/// Service for issuing and verifying bearer tokens
pub struct TokenService {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service with the given signing secret and
    /// token lifetime in days
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issue a token for the given username, valid from now
    pub fn issue(&self, username: &str) -> Result<String> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token for the given username as of the given instant.
    ///
    /// Exposed separately so tests can simulate clock movement without
    /// sleeping through a real expiry window.
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = TokenClaims {
            sub: username.to_string(),
            iat,
            exp: iat + self.ttl.num_seconds(),
        };

        let header = BASE64URL_NOPAD.encode(TOKEN_HEADER.as_bytes());
        let payload = BASE64URL_NOPAD.encode(
            &serde_json::to_vec(&claims).context("Failed to serialize token claims")?,
        );

        let signing_input = format!("{}.{}", header, payload);
        let signature = BASE64URL_NOPAD.encode(&self.sign(signing_input.as_bytes()));

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verify a token and return its claims, checking expiry against now
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token and return its claims, checking expiry against the
    /// given instant.
    ///
    /// Verification never touches storage: the signature proves the claims
    /// are ours, and the expiry check needs only the clock.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(TokenError::Malformed);
        }

        let signature = BASE64URL_NOPAD
            .decode(parts[2].as_bytes())
            .map_err(|_| TokenError::Malformed)?;

        // Signature is checked before the claims are even decoded, so a
        // tampered payload is always reported as a signature failure.
        let signing_input = format!("{}.{}", parts[0], parts[1]);
        let mut mac = self.keyed_mac();
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let payload = BASE64URL_NOPAD
            .decode(parts[1].as_bytes())
            .map_err(|_| TokenError::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.keyed_mac();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }

    fn keyed_mac(&self) -> HmacSha256 {
        // HMAC is defined for keys of any length, so this cannot fail
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length")
    }
}
