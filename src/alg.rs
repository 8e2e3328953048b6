//! Algorithm registry: maps an algorithm identifier to its signer and
//! verifier.
//!
//! The mapping is fixed at build time — dispatch is a total `match` over the
//! enum, so an in-process lookup can never miss. The only place an unknown
//! algorithm can appear is the string-parsing edge (`Algorithm::from_str`),
//! which fails fast with `UnsupportedAlgorithm`.
//!
//! HMAC verification goes through `Mac::verify_slice`, which compares tags in
//! constant time. All verification failures collapse to `BadSignature` so the
//! error carries no information about how the primitive rejected the input.

use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rsa::{pkcs1v15, pss};
use sha2::{Sha256, Sha512};
use signature::{RandomizedSigner, SignatureEncoding, Signer, Verifier};

use crate::error::TokenError;
use crate::keys::Key;

/// Identifier for one of the supported MAC / digital-signature schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// HMAC with SHA-256 (default).
    #[default]
    HS256,
    /// HMAC with SHA-512.
    HS512,
    /// RSA PKCS#1 v1.5 with SHA-256.
    RS256,
    /// RSA PKCS#1 v1.5 with SHA-512.
    RS512,
    /// RSA-PSS with SHA-256.
    PS256,
    /// RSA-PSS with SHA-512.
    PS512,
    /// ECDSA over P-256 with SHA-256.
    ES256,
    /// ECDSA over P-521 with SHA-512.
    ES512,
}

impl Algorithm {
    /// Parse an algorithm name. Unknown names are a configuration error.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, TokenError> {
        match s {
            "HS256" => Ok(Algorithm::HS256),
            "HS512" => Ok(Algorithm::HS512),
            "RS256" => Ok(Algorithm::RS256),
            "RS512" => Ok(Algorithm::RS512),
            "PS256" => Ok(Algorithm::PS256),
            "PS512" => Ok(Algorithm::PS512),
            "ES256" => Ok(Algorithm::ES256),
            "ES512" => Ok(Algorithm::ES512),
            _ => Err(TokenError::UnsupportedAlgorithm(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS512 => "RS512",
            Algorithm::PS256 => "PS256",
            Algorithm::PS512 => "PS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES512 => "ES512",
        }
    }

    /// True for the MAC (shared-secret) schemes.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Algorithm::HS256 | Algorithm::HS512)
    }

    /// Compute the MAC or digital signature over `message` with `key`.
    ///
    /// The key must match the algorithm family: secret bytes for HS*, an RSA
    /// private key for RS*/PS*, the curve's signing key for ES*.
    pub fn sign_message(&self, message: &[u8], key: &Key) -> Result<Vec<u8>, TokenError> {
        match self {
            Algorithm::HS256 => hs256_tag(message, key.as_secret()?),
            Algorithm::HS512 => hs512_tag(message, key.as_secret()?),
            Algorithm::RS256 => {
                let signing_key = pkcs1v15::SigningKey::<Sha256>::new(key.as_rsa_private()?.clone());
                let sig = signing_key.try_sign(message).map_err(signing_failed)?;
                Ok(sig.to_vec())
            }
            Algorithm::RS512 => {
                let signing_key = pkcs1v15::SigningKey::<Sha512>::new(key.as_rsa_private()?.clone());
                let sig = signing_key.try_sign(message).map_err(signing_failed)?;
                Ok(sig.to_vec())
            }
            Algorithm::PS256 => {
                let signing_key = pss::BlindedSigningKey::<Sha256>::new(key.as_rsa_private()?.clone());
                let sig = signing_key
                    .try_sign_with_rng(&mut OsRng, message)
                    .map_err(signing_failed)?;
                Ok(sig.to_vec())
            }
            Algorithm::PS512 => {
                let signing_key = pss::BlindedSigningKey::<Sha512>::new(key.as_rsa_private()?.clone());
                let sig = signing_key
                    .try_sign_with_rng(&mut OsRng, message)
                    .map_err(signing_failed)?;
                Ok(sig.to_vec())
            }
            Algorithm::ES256 => {
                let sig: p256::ecdsa::Signature =
                    key.as_p256_private()?.try_sign(message).map_err(signing_failed)?;
                Ok(sig.to_vec())
            }
            Algorithm::ES512 => {
                let sig: p521::ecdsa::Signature =
                    key.as_p521_private()?.try_sign(message).map_err(signing_failed)?;
                Ok(sig.to_vec())
            }
        }
    }

    /// Check `signature` over `message` with `key`.
    ///
    /// Any verification failure is reported as `BadSignature`. A wrong key
    /// family still surfaces as `KeyTypeMismatch` — that is a caller error,
    /// not a forgery signal.
    pub fn verify_message(
        &self,
        message: &[u8],
        signature: &[u8],
        key: &Key,
    ) -> Result<(), TokenError> {
        match self {
            Algorithm::HS256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(key.as_secret()?)
                    .map_err(|_| TokenError::BadSignature)?;
                mac.update(message);
                mac.verify_slice(signature).map_err(|_| TokenError::BadSignature)
            }
            Algorithm::HS512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(key.as_secret()?)
                    .map_err(|_| TokenError::BadSignature)?;
                mac.update(message);
                mac.verify_slice(signature).map_err(|_| TokenError::BadSignature)
            }
            Algorithm::RS256 => {
                let verifying_key =
                    pkcs1v15::VerifyingKey::<Sha256>::new(key.as_rsa_public()?.clone());
                let sig = pkcs1v15::Signature::try_from(signature)
                    .map_err(|_| TokenError::BadSignature)?;
                verifying_key
                    .verify(message, &sig)
                    .map_err(|_| TokenError::BadSignature)
            }
            Algorithm::RS512 => {
                let verifying_key =
                    pkcs1v15::VerifyingKey::<Sha512>::new(key.as_rsa_public()?.clone());
                let sig = pkcs1v15::Signature::try_from(signature)
                    .map_err(|_| TokenError::BadSignature)?;
                verifying_key
                    .verify(message, &sig)
                    .map_err(|_| TokenError::BadSignature)
            }
            Algorithm::PS256 => {
                let verifying_key = pss::VerifyingKey::<Sha256>::new(key.as_rsa_public()?.clone());
                let sig =
                    pss::Signature::try_from(signature).map_err(|_| TokenError::BadSignature)?;
                verifying_key
                    .verify(message, &sig)
                    .map_err(|_| TokenError::BadSignature)
            }
            Algorithm::PS512 => {
                let verifying_key = pss::VerifyingKey::<Sha512>::new(key.as_rsa_public()?.clone());
                let sig =
                    pss::Signature::try_from(signature).map_err(|_| TokenError::BadSignature)?;
                verifying_key
                    .verify(message, &sig)
                    .map_err(|_| TokenError::BadSignature)
            }
            Algorithm::ES256 => {
                let sig = p256::ecdsa::Signature::from_slice(signature)
                    .map_err(|_| TokenError::BadSignature)?;
                key.as_p256_public()?
                    .verify(message, &sig)
                    .map_err(|_| TokenError::BadSignature)
            }
            Algorithm::ES512 => {
                let sig = p521::ecdsa::Signature::from_slice(signature)
                    .map_err(|_| TokenError::BadSignature)?;
                key.as_p521_public()?
                    .verify(message, &sig)
                    .map_err(|_| TokenError::BadSignature)
            }
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn signing_failed(err: signature::Error) -> TokenError {
    TokenError::SigningFailed(err.to_string())
}

fn hs256_tag(message: &[u8], secret: &[u8]) -> Result<Vec<u8>, TokenError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|e| TokenError::SigningFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hs512_tag(message: &[u8], secret: &[u8]) -> Result<Vec<u8>, TokenError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret)
        .map_err(|e| TokenError::SigningFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
