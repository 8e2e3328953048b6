//! Token construction: serialize, salt, timestamp, sign, encode.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;

use crate::alg::Algorithm;
use crate::error::TokenError;
use crate::keys::Key;
use crate::payload::{self, Compression};
use crate::token::{unix_now, Token, SALT_LEN};

/// Sign-side configuration. Defaults: HS256, zlib compression.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignOptions {
    pub algorithm: Algorithm,
    pub compression: Compression,
}

impl SignOptions {
    pub fn new(algorithm: Algorithm) -> Self {
        SignOptions {
            algorithm,
            ..Default::default()
        }
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

/// Sign `value` into a wire token.
///
/// Draws a fresh 8-byte salt from the OS CSPRNG and stamps the current time,
/// so two signings of the same value under the same key produce different
/// tokens. The key must match the configured algorithm's family.
pub fn sign<T: Serialize>(
    value: &T,
    key: &Key,
    options: &SignOptions,
) -> Result<String, TokenError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    sign_at(value, key, options, salt, unix_now())
}

/// Sign with an explicit salt and stamp.
///
/// Deterministic given fixed inputs; this is the injection point for tests
/// and for callers that manage their own clock. `sign` is a thin wrapper
/// over it.
pub fn sign_at<T: Serialize>(
    value: &T,
    key: &Key,
    options: &SignOptions,
    salt: [u8; SALT_LEN],
    stamp: i64,
) -> Result<String, TokenError> {
    let input = payload::encode(value, options.compression)?;

    let mut token = Token {
        input,
        signature: Vec::new(),
        salt,
        stamp,
    };
    token.signature = options.algorithm.sign_message(&token.signing_input(), key)?;

    tracing::trace!(
        algorithm = %options.algorithm,
        input_len = token.input.len(),
        signature_len = token.signature.len(),
        "signed token"
    );

    Ok(token.encode())
}
