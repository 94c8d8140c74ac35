//! Signature codec.
//!
//! Turns a set of signatures into an opaque string that can be embedded in a
//! deferred type token, and back. The set is serialized as a length-prefixed
//! list (`<byte-len>:<signature>` repeated), brotli-compressed and encoded as
//! URL-safe unpadded base64. The base64 alphabet (`A-Z a-z 0-9 - _`) never
//! contains `#` or the token sentinels, so the payload needs no escaping, and
//! signatures may contain any character.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use drex_common::limits::{
    CODEC_BUFFER_SIZE, CODEC_LGWIN, CODEC_QUALITY, MAX_DECOMPRESSED_BYTES,
};
use std::io::{Read, Write};

/// Separator between a length prefix and the entry it measures.
const LENGTH_DELIMITER: char = ':';

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("compression failed: {0}")]
    Compress(#[source] std::io::Error),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid brotli data: {0}")]
    Decompress(#[source] std::io::Error),
    #[error("decompressed payload exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("decompressed payload is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("malformed signature list at byte {offset}")]
    MalformedList { offset: usize },
}

/// Lossless string <-> token-safe string codec.
pub struct SignatureCodec;

impl SignatureCodec {
    /// Compress `blob` into a token-safe string.
    pub fn compress(blob: &str) -> Result<String, CodecError> {
        let mut writer = brotli::CompressorWriter::new(
            Vec::new(),
            CODEC_BUFFER_SIZE,
            CODEC_QUALITY,
            CODEC_LGWIN,
        );
        writer
            .write_all(blob.as_bytes())
            .map_err(CodecError::Compress)?;
        // `into_inner` finishes the stream.
        let compressed = writer.into_inner();
        Ok(URL_SAFE_NO_PAD.encode(compressed))
    }

    /// Inverse of `compress`.
    ///
    /// Output beyond `MAX_DECOMPRESSED_BYTES` is rejected before it is fully
    /// inflated.
    pub fn decompress(token: &str) -> Result<String, CodecError> {
        let compressed = URL_SAFE_NO_PAD.decode(token)?;
        let decoder = brotli::Decompressor::new(compressed.as_slice(), CODEC_BUFFER_SIZE);

        let mut out = Vec::new();
        decoder
            .take(MAX_DECOMPRESSED_BYTES as u64 + 1)
            .read_to_end(&mut out)
            .map_err(CodecError::Decompress)?;
        if out.len() > MAX_DECOMPRESSED_BYTES {
            return Err(CodecError::TooLarge {
                limit: MAX_DECOMPRESSED_BYTES,
            });
        }
        Ok(String::from_utf8(out)?)
    }

    /// Encode a signature sequence as a compressed token payload.
    pub fn encode_signatures<I, S>(signatures: I) -> Result<String, CodecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::compress(&join_signatures(signatures))
    }

    /// Decode a payload produced by `encode_signatures`.
    pub fn decode_signatures(payload: &str) -> Result<Vec<String>, CodecError> {
        split_signatures(&Self::decompress(payload)?)
    }
}

/// Serialize signatures as `<byte-len>:<signature>` entries.
pub fn join_signatures<I, S>(signatures: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for signature in signatures {
        let signature = signature.as_ref();
        out.push_str(&signature.len().to_string());
        out.push(LENGTH_DELIMITER);
        out.push_str(signature);
    }
    out
}

/// Parse the output of `join_signatures`.
pub fn split_signatures(joined: &str) -> Result<Vec<String>, CodecError> {
    let mut out = Vec::new();
    let mut offset = 0;

    while offset < joined.len() {
        let rest = &joined[offset..];
        let Some(delimiter) = rest.find(LENGTH_DELIMITER) else {
            return Err(CodecError::MalformedList { offset });
        };
        let len: usize = rest[..delimiter]
            .parse()
            .map_err(|_| CodecError::MalformedList { offset })?;

        let start = offset + delimiter + LENGTH_DELIMITER.len_utf8();
        let end = start
            .checked_add(len)
            .filter(|&end| end <= joined.len())
            .ok_or(CodecError::MalformedList { offset })?;
        let signature = joined
            .get(start..end)
            .ok_or(CodecError::MalformedList { offset })?;

        out.push(signature.to_string());
        offset = end;
    }
    Ok(out)
}
