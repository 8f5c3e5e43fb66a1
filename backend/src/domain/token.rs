//! Shared-secret bearer token minting and verification.
//!
//! Tokens are compact two-part strings: a base64url-encoded JSON claims
//! document and a hex-encoded keyed SHA-256 digest over it. The digest keys
//! the secret on both sides of the payload, and verification recomputes it
//! before trusting any claim. This is mock-grade signing for a development
//! backend; it is not a substitute for a real token service and must not be
//! promoted to one.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::error::DomainError;

/// Separator byte between secret and payload inside the digest input.
const DIGEST_SEPARATOR: u8 = 0x1f;

/// Default access-token lifetime, matching the original 24h JWT expiry.
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 24 * 60 * 60;

/// Refresh tokens live a week; the client stores but never exchanges them.
const REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims carried inside a token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the account email.
    sub: String,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
    /// `access` or `refresh`.
    kind: TokenKind,
}

/// Which half of the token pair a claim set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token attached to authenticated requests.
    Access,
    /// Longer-lived token reserved for future refresh support.
    Refresh,
}

/// Access and refresh tokens minted together at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Bearer token for authenticated requests.
    pub access: String,
    /// Companion refresh token.
    pub refresh: String,
}

/// Mints and verifies bearer tokens against a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Zeroizing<Vec<u8>>,
    access_ttl: Duration,
}

impl TokenSigner {
    /// Create a signer with the given secret and access-token lifetime.
    pub fn new(secret: impl Into<Vec<u8>>, access_ttl_secs: i64) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            access_ttl: Duration::seconds(access_ttl_secs),
        }
    }

    /// Mint an access/refresh pair for the given account email.
    pub fn mint_pair(&self, email: &str) -> Result<TokenPair, DomainError> {
        let now = Utc::now().timestamp();
        let access = self.encode(&Claims {
            sub: email.to_owned(),
            iat: now,
            exp: now + self.access_ttl.num_seconds(),
            kind: TokenKind::Access,
        })?;
        let refresh = self.encode(&Claims {
            sub: email.to_owned(),
            iat: now,
            exp: now + REFRESH_TTL_SECS,
            kind: TokenKind::Refresh,
        })?;
        Ok(TokenPair { access, refresh })
    }

    /// Verify an access token and return its subject email.
    ///
    /// Fails on malformed structure, a digest mismatch, a non-access token,
    /// or an expired claim. All failures collapse to the same unauthorized
    /// message so callers cannot probe the distinction.
    pub fn verify_access(&self, token: &str) -> Result<String, DomainError> {
        let unauthorized = || DomainError::unauthorized("please login again");
        let (payload_b64, digest_hex) = token.split_once('.').ok_or_else(unauthorized)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| unauthorized())?;
        let expected = self.digest(&payload);
        let presented = hex::decode(digest_hex).map_err(|_| unauthorized())?;
        if !constant_time_eq(&expected, &presented) {
            return Err(unauthorized());
        }
        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| unauthorized())?;
        if claims.kind != TokenKind::Access {
            return Err(unauthorized());
        }
        if claims.exp <= Utc::now().timestamp() {
            return Err(unauthorized());
        }
        Ok(claims.sub)
    }

    fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        let payload = serde_json::to_vec(claims)
            .map_err(|err| DomainError::internal(format!("claims serialization failed: {err}")))?;
        let digest = self.digest(&payload);
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            hex::encode(digest)
        ))
    }

    /// Secret-wrapped digest: `sha256(secret || sep || payload || sep || secret)`.
    fn digest(&self, payload: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_slice());
        hasher.update([DIGEST_SEPARATOR]);
        hasher.update(payload);
        hasher.update([DIGEST_SEPARATOR]);
        hasher.update(self.secret.as_slice());
        hasher.finalize().into()
    }
}

/// Timing-independent byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret".to_vec(), DEFAULT_ACCESS_TTL_SECS)
    }

    #[rstest]
    fn mint_and_verify_round_trip() {
        let pair = signer().mint_pair("a@b.com").expect("mint succeeds");
        assert!(!pair.access.is_empty());
        assert!(!pair.refresh.is_empty());
        let subject = signer().verify_access(&pair.access).expect("valid token");
        assert_eq!(subject, "a@b.com");
    }

    #[rstest]
    fn refresh_token_is_not_accepted_as_access() {
        let pair = signer().mint_pair("a@b.com").expect("mint succeeds");
        assert!(signer().verify_access(&pair.refresh).is_err());
    }

    #[rstest]
    fn tampered_payload_is_rejected() {
        let pair = signer().mint_pair("a@b.com").expect("mint succeeds");
        let (payload, digest) = pair.access.split_once('.').expect("two parts");
        let forged_claims = serde_json::json!({
            "sub": "intruder@evil.com",
            "iat": 0,
            "exp": i64::MAX,
            "kind": "access",
        });
        let forged_payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&forged_claims).expect("serializable"),
        );
        assert_ne!(forged_payload, payload);
        let forged = format!("{forged_payload}.{digest}");
        assert!(signer().verify_access(&forged).is_err());
    }

    #[rstest]
    fn wrong_secret_is_rejected() {
        let pair = signer().mint_pair("a@b.com").expect("mint succeeds");
        let other = TokenSigner::new(b"another-secret".to_vec(), DEFAULT_ACCESS_TTL_SECS);
        assert!(other.verify_access(&pair.access).is_err());
    }

    #[rstest]
    fn expired_token_is_rejected() {
        let expired = TokenSigner::new(b"test-secret".to_vec(), -60);
        let pair = expired.mint_pair("a@b.com").expect("mint succeeds");
        assert!(signer().verify_access(&pair.access).is_err());
    }

    #[rstest]
    #[case("")]
    #[case("no-dot-here")]
    #[case("!!!.not-hex")]
    fn malformed_tokens_are_rejected(#[case] token: &str) {
        assert!(signer().verify_access(token).is_err());
    }
}
