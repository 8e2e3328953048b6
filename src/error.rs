use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token: expected 4 dot-separated segments, found {found}")]
    MalformedToken { found: usize },

    #[error("malformed token: {segment} segment is not valid base64url")]
    InvalidSegmentEncoding { segment: &'static str },

    #[error("malformed token: {segment} segment must be {expected} bytes, got {actual}")]
    InvalidSegmentLength {
        segment: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("key type mismatch: algorithm requires a {expected} key, got {actual}")]
    KeyTypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("bad signature: token corrupt or manipulated")]
    BadSignature,

    #[error("token expired: age {age}s exceeds max_age {max_age}s")]
    Expired { age: i64, max_age: u64 },

    #[error("payload encoding failed: {0}")]
    PayloadEncode(String),

    #[error("payload decoding failed: {0}")]
    PayloadDecode(String),
}

impl TokenError {
    /// True for structural failures that never reached signature verification.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            TokenError::MalformedToken { .. }
                | TokenError::InvalidSegmentEncoding { .. }
                | TokenError::InvalidSegmentLength { .. }
        )
    }
}
