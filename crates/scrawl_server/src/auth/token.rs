//! Pad-scoped credential issuance and verification.
//!
//! A credential is a compact HS256 JWT binding a pad id to the server
//! signing key. The claim set is exactly `{id, iat, exp}` and the server
//! keeps no per-credential state; the signature is the only record that
//! the credential was ever issued.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error,
};
use serde::{Deserialize, Serialize};

/// Cryptographic validity window of an issued credential, in seconds.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims embedded in a pad credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Pad id this credential is bound to.
    pub id: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch (`iat` + 24h).
    pub exp: i64,
}

/// Issue a signed credential scoped to `pad_id`.
pub fn issue(pad_id: &str, signing_key: &[u8]) -> Result<String, Error> {
    issue_at(pad_id, signing_key, chrono::Utc::now().timestamp())
}

/// Issue a credential with an explicit issued-at timestamp.
pub fn issue_at(pad_id: &str, signing_key: &[u8], iat: i64) -> Result<String, Error> {
    let claims = Claims {
        id: pad_id.to_string(),
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
}

/// Verify a raw credential token against the pad being accessed.
///
/// Checks run in order and short-circuit: signature (only HS256 is
/// accepted; a token header asserting any other algorithm is rejected
/// outright), expiry with zero leeway, then the id binding as an exact
/// string match. Every decode or verification error maps to `false`;
/// nothing about which check failed leaves this function.
pub fn authorize(pad_id: &str, token: &str, signing_key: &[u8]) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    match decode::<Claims>(token, &DecodingKey::from_secret(signing_key), &validation) {
        Ok(data) => data.claims.id == pad_id,
        Err(_) => false,
    }
}
