//! Token wire format.
//!
//! On the wire a token is four unpadded base64url segments joined by `.`, in
//! fixed order:
//!
//! ```text
//! B64U(input) "." B64U(signature) "." B64U(salt) "." B64U(stamp)
//! ```
//!
//! `input` is the self-describing serialized payload, `salt` is 8 random
//! bytes, and `stamp` is the creation time as 8 big-endian bytes (signed Unix
//! seconds). The signature covers `input || salt || stamp`, never `input`
//! alone, so a salt or stamp swapped in from another token invalidates the
//! signature.
//!
//! Anything that does not split into exactly 4 non-empty, decodable segments
//! with 8-byte salt and stamp is a malformed token — a distinct failure class
//! from signature rejection, surfaced before any verification runs.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::TokenError;

/// Salt length in bytes.
pub const SALT_LEN: usize = 8;

/// Timestamp length in bytes (big-endian signed Unix seconds).
pub const STAMP_LEN: usize = 8;

/// A decoded token: the four segments of the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Serialized (optionally compressed) payload bytes.
    pub input: Vec<u8>,
    /// MAC or digital signature over `input || salt || stamp`.
    pub signature: Vec<u8>,
    /// 8 random bytes drawn fresh at signing time.
    pub salt: [u8; SALT_LEN],
    /// Creation time, Unix seconds.
    pub stamp: i64,
}

impl Token {
    /// The candidate-for-signing buffer: `input || salt || stamp_be`.
    ///
    /// Computed identically on the sign and verify paths; this is the only
    /// material ever handed to a signature primitive.
    pub fn signing_input(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.input.len() + SALT_LEN + STAMP_LEN);
        buf.extend_from_slice(&self.input);
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.stamp.to_be_bytes());
        buf
    }

    /// Encode as the 4-segment wire string.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut wire = String::new();
        wire.push_str(&URL_SAFE_NO_PAD.encode(&self.input));
        wire.push('.');
        wire.push_str(&URL_SAFE_NO_PAD.encode(&self.signature));
        wire.push('.');
        wire.push_str(&URL_SAFE_NO_PAD.encode(self.salt));
        wire.push('.');
        wire.push_str(&URL_SAFE_NO_PAD.encode(self.stamp.to_be_bytes()));
        wire
    }

    /// Parse a wire string back into its four segments.
    pub fn parse(wire: &str) -> Result<Token, TokenError> {
        let segments: Vec<&str> = wire.split('.').collect();
        if segments.len() != 4 || segments.iter().any(|s| s.is_empty()) {
            return Err(TokenError::MalformedToken {
                found: segments.len(),
            });
        }

        let input = decode_segment(segments[0], "input")?;
        let signature = decode_segment(segments[1], "signature")?;
        let salt_bytes = decode_segment(segments[2], "salt")?;
        let stamp_bytes = decode_segment(segments[3], "stamp")?;

        let salt: [u8; SALT_LEN] =
            salt_bytes
                .as_slice()
                .try_into()
                .map_err(|_| TokenError::InvalidSegmentLength {
                    segment: "salt",
                    expected: SALT_LEN,
                    actual: salt_bytes.len(),
                })?;
        let stamp_be: [u8; STAMP_LEN] =
            stamp_bytes
                .as_slice()
                .try_into()
                .map_err(|_| TokenError::InvalidSegmentLength {
                    segment: "stamp",
                    expected: STAMP_LEN,
                    actual: stamp_bytes.len(),
                })?;

        Ok(Token {
            input,
            signature,
            salt,
            stamp: i64::from_be_bytes(stamp_be),
        })
    }
}

fn decode_segment(segment: &str, name: &'static str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::InvalidSegmentEncoding { segment: name })
}

/// Current wall-clock time as signed Unix seconds.
pub(crate) fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        // Pre-epoch clocks are a misconfiguration; represent them as negative
        // seconds rather than panicking.
        Err(err) => -(err.duration().as_secs() as i64),
    }
}
