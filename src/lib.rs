//! saltstamp: salted, timestamped message-signing tokens.
//!
//! `sign` serializes a payload (optionally compressed), binds it to an 8-byte
//! random salt and an 8-byte big-endian creation timestamp, authenticates the
//! triple with a keyed signature, and emits a 4-segment base64url wire token.
//! `unsign` verifies the signature before touching the payload, optionally
//! enforces a maximum token age, and returns the original value.
//!
//! Supported algorithms: HS256/HS512 (HMAC), RS256/RS512 (RSA PKCS#1 v1.5),
//! PS256/PS512 (RSA-PSS), ES256/ES512 (ECDSA P-256 / P-521).
//!
//! ```no_run
//! use saltstamp::{sign, unsign, Key, SignOptions, UnsignOptions};
//!
//! # fn main() -> Result<(), saltstamp::TokenError> {
//! let key = Key::secret(b"shared-secret".as_slice());
//! let token = sign(&"hello", &key, &SignOptions::default())?;
//! let payload: String = unsign(&token, &key, &UnsignOptions::default())?;
//! assert_eq!(payload, "hello");
//! # Ok(())
//! # }
//! ```

pub mod alg;
pub mod error;
pub mod keys;
pub mod payload;
pub mod sign;
pub mod token;
pub mod verify;

pub use alg::Algorithm;
pub use error::TokenError;
pub use keys::Key;
pub use payload::Compression;
pub use sign::{sign, sign_at, SignOptions};
pub use token::{Token, SALT_LEN, STAMP_LEN};
pub use verify::{unsign, unsign_at, UnsignOptions};
