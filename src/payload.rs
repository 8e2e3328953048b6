//! Self-describing payload codec: serde serialization plus optional
//! compression.
//!
//! The encoded form is a one-byte codec marker followed by the body, so the
//! decoder never needs to be told which compression was used at signing time.
//! Decoding only ever runs on authenticated bytes — the token codec verifies
//! the signature before calling `decode`.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TokenError;

const MARKER_RAW: u8 = 0;
const MARKER_ZLIB: u8 = 1;
const MARKER_ZSTD: u8 = 2;

/// zstd compression level; 1 keeps the codec in the same "fast" class as the
/// zlib default.
const ZSTD_LEVEL: i32 = 1;

/// Payload compression codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Store the serialized bytes as-is.
    None,
    /// zlib at the fast compression level (default).
    #[default]
    Zlib,
    /// zstd at level 1.
    Zstd,
}

impl Compression {
    fn marker(self) -> u8 {
        match self {
            Compression::None => MARKER_RAW,
            Compression::Zlib => MARKER_ZLIB,
            Compression::Zstd => MARKER_ZSTD,
        }
    }
}

/// Serialize `value` to JSON and apply the chosen codec.
pub fn encode<T: Serialize>(value: &T, compression: Compression) -> Result<Vec<u8>, TokenError> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::PayloadEncode(e.to_string()))?;

    let mut out = Vec::with_capacity(json.len() + 1);
    out.push(compression.marker());

    match compression {
        Compression::None => out.extend_from_slice(&json),
        Compression::Zlib => {
            let mut encoder = ZlibEncoder::new(&mut out, flate2::Compression::fast());
            encoder
                .write_all(&json)
                .and_then(|()| encoder.finish().map(|_| ()))
                .map_err(|e| TokenError::PayloadEncode(e.to_string()))?;
        }
        Compression::Zstd => {
            let compressed = zstd::stream::encode_all(json.as_slice(), ZSTD_LEVEL)
                .map_err(|e| TokenError::PayloadEncode(e.to_string()))?;
            out.extend_from_slice(&compressed);
        }
    }

    Ok(out)
}

/// Invert `encode`: dispatch on the marker byte, decompress, deserialize.
pub fn decode<T: DeserializeOwned>(input: &[u8]) -> Result<T, TokenError> {
    let (&marker, body) = input
        .split_first()
        .ok_or_else(|| TokenError::PayloadDecode("empty payload".into()))?;

    let json = match marker {
        MARKER_RAW => body.to_vec(),
        MARKER_ZLIB => {
            let mut decoder = ZlibDecoder::new(body);
            let mut json = Vec::new();
            decoder
                .read_to_end(&mut json)
                .map_err(|e| TokenError::PayloadDecode(e.to_string()))?;
            json
        }
        MARKER_ZSTD => zstd::stream::decode_all(body)
            .map_err(|e| TokenError::PayloadDecode(e.to_string()))?,
        _ => {
            return Err(TokenError::PayloadDecode(format!(
                "unknown compression marker {marker}"
            )));
        }
    };

    serde_json::from_slice(&json).map_err(|e| TokenError::PayloadDecode(e.to_string()))
}
