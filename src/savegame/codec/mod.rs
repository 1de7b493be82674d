//! Codec strategies for the supported save-file encodings.
//!
//! Each strategy pairs a `decode` for one specific byte representation with
//! the `encode` that reproduces it. The format probe walks an ordered list
//! of these until one decode succeeds, so adding an encoding is a pure
//! extension: implement [`CodecStrategy`] and append it to the list.
//!
//! # Submodules
//!
//! - [`text`][]: representations carried as UTF-8 text (plain JSON, base64,
//!   base64+zlib, both lz-string flavors)
//! - [`binary`][]: representations probed on the raw byte buffer (zlib,
//!   MessagePack)

pub mod binary;
pub mod text;

use std::fmt;
use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::trace;
use serde_json::Value;
use thiserror::Error;

use super::types::error::{Result, SaveError};
use super::types::models::FormatTag;

pub use binary::{MessagePackStrategy, ZlibJsonStrategy};
pub use text::{
    Base64JsonStrategy, Base64ZlibJsonStrategy, LzBase64JsonStrategy, LzRawJsonStrategy,
    PlainJsonStrategy,
};

/// Default cap on decompressed payload size. A compressed blob that inflates
/// past this is rejected before any JSON parsing happens.
pub const DEFAULT_MAX_DECOMPRESSED: usize = 256 * 1024 * 1024;

/// A single strategy declining the input it was offered.
///
/// This never crosses the probe boundary: the probe logs the reason at
/// `trace!` and falls through to the next strategy in the list.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Inapplicable(String);

impl Inapplicable {
    /// Wrap any failure as a rejection of the current strategy.
    pub fn because(reason: impl fmt::Display) -> Self {
        Inapplicable(reason.to_string())
    }
}

/// Outcome of a single strategy's decode attempt.
pub type DecodeAttempt = std::result::Result<Value, Inapplicable>;

/// A paired decode/encode unit for one specific byte representation.
pub trait CodecStrategy: Send + Sync {
    /// The tag identifying this strategy.
    fn tag(&self) -> FormatTag;

    /// Try to decode `bytes` as this strategy's representation.
    ///
    /// Any failure (malformed wrapper, inflate error, invalid JSON, a
    /// non-structured result) is reported as [`Inapplicable`], never
    /// propagated.
    fn decode(&self, bytes: &[u8]) -> DecodeAttempt;

    /// Encode `value` back into this strategy's representation.
    ///
    /// # Errors
    /// [`SaveError::EncodeFailure`] if the value cannot be serialized in
    /// this representation.
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;
}

/// The built-in strategies in their fixed probing order.
///
/// Order matters: some encodings are prefixes or supersets of others, and
/// the first successful decode wins.
pub fn default_strategies() -> Vec<Box<dyn CodecStrategy>> {
    strategies_with_limit(DEFAULT_MAX_DECOMPRESSED)
}

/// As [`default_strategies`], with an explicit decompressed-size cap for the
/// zlib-backed strategies.
pub fn strategies_with_limit(max_decompressed: usize) -> Vec<Box<dyn CodecStrategy>> {
    vec![
        Box::new(PlainJsonStrategy),
        Box::new(Base64JsonStrategy),
        Box::new(Base64ZlibJsonStrategy::new(max_decompressed)),
        Box::new(LzBase64JsonStrategy),
        Box::new(LzRawJsonStrategy),
        Box::new(ZlibJsonStrategy::new(max_decompressed)),
        Box::new(MessagePackStrategy),
    ]
}

/// Strict UTF-8 view of the input; non-text input is inapplicable.
pub(crate) fn utf8_text(bytes: &[u8]) -> std::result::Result<&str, Inapplicable> {
    std::str::from_utf8(bytes).map_err(|e| Inapplicable::because(format!("not UTF-8 text: {}", e)))
}

/// Parse JSON text and require a structured top-level value.
pub(crate) fn parse_structured_json(text: &str) -> DecodeAttempt {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Inapplicable::because(format!("invalid JSON: {}", e)))?;
    require_structured(value)
}

/// Saves are objects or arrays; a bare scalar is not a decode success.
/// Keeps scalar-shaped text (a lone number, say) from shadowing strategies
/// later in the probing order.
pub(crate) fn require_structured(value: Value) -> DecodeAttempt {
    if value.is_object() || value.is_array() {
        Ok(value)
    } else {
        Err(Inapplicable::because("decoded value is not an object or array"))
    }
}

/// Compact, stable JSON serialization shared by every encode path.
pub(crate) fn json_text(value: &Value) -> String {
    value.to_string()
}

/// Zlib-inflate `payload`, rejecting output larger than `max_len`.
pub(crate) fn inflate(payload: &[u8], max_len: usize) -> std::result::Result<Vec<u8>, Inapplicable> {
    let mut decoder = ZlibDecoder::new(payload).take(max_len as u64 + 1);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| Inapplicable::because(format!("zlib inflate failed: {}", e)))?;
    if decompressed.len() > max_len {
        return Err(Inapplicable::because(format!(
            "decompressed payload exceeds the {} byte cap",
            max_len
        )));
    }
    trace!(
        "Inflated {} bytes -> {} bytes",
        payload.len(),
        decompressed.len()
    );
    Ok(decompressed)
}

/// Zlib-deflate at the default compression level.
pub(crate) fn deflate(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Map a strategy-level serialization error to the crate error type.
pub(crate) fn encode_failure(format: FormatTag, reason: impl fmt::Display) -> SaveError {
    SaveError::EncodeFailure {
        format,
        reason: reason.to_string(),
    }
}
