//! Token verification: parse, authenticate, check age, decode.
//!
//! Ordering is a hard invariant: structural parsing, then signature
//! verification, then the optional age check, and only then payload
//! deserialization. Forged input bytes are never decompressed or
//! deserialized.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::alg::Algorithm;
use crate::error::TokenError;
use crate::keys::Key;
use crate::payload;
use crate::token::{unix_now, Token};

/// Unsign-side configuration. Default algorithm HS256, no age limit.
///
/// There is no compression setting here: the payload bytes carry their own
/// codec marker, so decoding is independent of what the signer chose.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsignOptions {
    pub algorithm: Algorithm,
    pub max_age: Option<Duration>,
}

impl UnsignOptions {
    pub fn new(algorithm: Algorithm) -> Self {
        UnsignOptions {
            algorithm,
            ..Default::default()
        }
    }

    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }
}

/// Verify a wire token and return its payload.
///
/// Fails with a malformed-token error if the wire shape is wrong, with
/// `BadSignature` if authentication fails, and with `Expired` if `max_age`
/// is configured and exceeded.
pub fn unsign<T: DeserializeOwned>(
    wire: &str,
    key: &Key,
    options: &UnsignOptions,
) -> Result<T, TokenError> {
    unsign_at(wire, key, options, unix_now())
}

/// Verify with an explicit `now`, the clock injection point for tests.
pub fn unsign_at<T: DeserializeOwned>(
    wire: &str,
    key: &Key,
    options: &UnsignOptions,
    now: i64,
) -> Result<T, TokenError> {
    let token = Token::parse(wire)?;

    options
        .algorithm
        .verify_message(&token.signing_input(), &token.signature, key)?;

    if let Some(max_age) = options.max_age {
        // Negative age (a future-dated stamp) is tolerated as clock skew;
        // only exceeding max_age rejects, and exact equality passes.
        let age = now - token.stamp;
        let limit = max_age.as_secs();
        if age > limit as i64 {
            tracing::debug!(age, max_age = limit, "token rejected as expired");
            return Err(TokenError::Expired {
                age,
                max_age: limit,
            });
        }
    }

    tracing::trace!(algorithm = %options.algorithm, "token verified");

    payload::decode(&token.input)
}
