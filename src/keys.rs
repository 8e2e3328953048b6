//! Key material for token signing and verification.
//!
//! Each algorithm family consumes a different key shape: HMAC algorithms take
//! raw secret bytes (same bytes on both sides), RSA algorithms take an
//! `RsaPrivateKey` to sign and an `RsaPublicKey` to verify, and the ECDSA
//! algorithms take the matching curve's signing/verifying key. `Key` wraps all
//! of them behind one type so the algorithm dispatch can pull out the shape it
//! needs and fail with `KeyTypeMismatch` when handed the wrong family.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::TokenError;

/// Key material for one of the supported algorithm families.
///
/// The HMAC secret is wrapped in `Zeroizing` so it is zeroed from memory when
/// dropped.
#[derive(Clone)]
pub enum Key {
    /// Shared secret bytes for HS256/HS512.
    Secret(Zeroizing<Vec<u8>>),
    /// RSA private key for signing with RS256/RS512/PS256/PS512.
    RsaPrivate(rsa::RsaPrivateKey),
    /// RSA public key for verifying RS256/RS512/PS256/PS512.
    RsaPublic(rsa::RsaPublicKey),
    /// P-256 private key for signing with ES256.
    P256Private(p256::ecdsa::SigningKey),
    /// P-256 public key for verifying ES256.
    P256Public(p256::ecdsa::VerifyingKey),
    /// P-521 private key for signing with ES512.
    P521Private(p521::ecdsa::SigningKey),
    /// P-521 public key for verifying ES512.
    P521Public(p521::ecdsa::VerifyingKey),
}

impl Key {
    /// Create a shared-secret key from bytes.
    pub fn secret(secret: impl Into<Vec<u8>>) -> Self {
        Key::Secret(Zeroizing::new(secret.into()))
    }

    pub fn rsa_private(key: rsa::RsaPrivateKey) -> Self {
        Key::RsaPrivate(key)
    }

    pub fn rsa_public(key: rsa::RsaPublicKey) -> Self {
        Key::RsaPublic(key)
    }

    pub fn p256_private(key: p256::ecdsa::SigningKey) -> Self {
        Key::P256Private(key)
    }

    pub fn p256_public(key: p256::ecdsa::VerifyingKey) -> Self {
        Key::P256Public(key)
    }

    pub fn p521_private(key: p521::ecdsa::SigningKey) -> Self {
        Key::P521Private(key)
    }

    pub fn p521_public(key: p521::ecdsa::VerifyingKey) -> Self {
        Key::P521Public(key)
    }

    /// Key family name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Secret(_) => "secret",
            Key::RsaPrivate(_) => "RSA private",
            Key::RsaPublic(_) => "RSA public",
            Key::P256Private(_) => "P-256 private",
            Key::P256Public(_) => "P-256 public",
            Key::P521Private(_) => "P-521 private",
            Key::P521Public(_) => "P-521 public",
        }
    }

    pub fn as_secret(&self) -> Result<&[u8], TokenError> {
        match self {
            Key::Secret(secret) => Ok(secret),
            _ => Err(self.mismatch("secret")),
        }
    }

    pub fn as_rsa_private(&self) -> Result<&rsa::RsaPrivateKey, TokenError> {
        match self {
            Key::RsaPrivate(key) => Ok(key),
            _ => Err(self.mismatch("RSA private")),
        }
    }

    pub fn as_rsa_public(&self) -> Result<&rsa::RsaPublicKey, TokenError> {
        match self {
            Key::RsaPublic(key) => Ok(key),
            _ => Err(self.mismatch("RSA public")),
        }
    }

    pub fn as_p256_private(&self) -> Result<&p256::ecdsa::SigningKey, TokenError> {
        match self {
            Key::P256Private(key) => Ok(key),
            _ => Err(self.mismatch("P-256 private")),
        }
    }

    pub fn as_p256_public(&self) -> Result<&p256::ecdsa::VerifyingKey, TokenError> {
        match self {
            Key::P256Public(key) => Ok(key),
            _ => Err(self.mismatch("P-256 public")),
        }
    }

    pub fn as_p521_private(&self) -> Result<&p521::ecdsa::SigningKey, TokenError> {
        match self {
            Key::P521Private(key) => Ok(key),
            _ => Err(self.mismatch("P-521 private")),
        }
    }

    pub fn as_p521_public(&self) -> Result<&p521::ecdsa::VerifyingKey, TokenError> {
        match self {
            Key::P521Public(key) => Ok(key),
            _ => Err(self.mismatch("P-521 public")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> TokenError {
        TokenError::KeyTypeMismatch {
            expected,
            actual: self.kind(),
        }
    }
}

// Manual impl so secret bytes never end up in debug output.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key::{}", self.kind())
    }
}

impl From<&[u8]> for Key {
    fn from(secret: &[u8]) -> Self {
        Key::secret(secret)
    }
}

impl From<&str> for Key {
    fn from(secret: &str) -> Self {
        Key::secret(secret.as_bytes())
    }
}
