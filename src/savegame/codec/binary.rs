//! Binary-path codec strategies: representations probed on the raw buffer.

use log::trace;
use serde_json::Value;

use super::{
    deflate, encode_failure, inflate, json_text, parse_structured_json, require_structured,
    CodecStrategy, DecodeAttempt, Inapplicable,
};
use crate::savegame::types::error::Result;
use crate::savegame::types::models::FormatTag;

/// ASCII signature of the RPG Maker MV save container.
pub const RPGMV_SIGNATURE: [u8; 5] = [0x52, 0x50, 0x47, 0x4D, 0x56];

/// Fixed size of the RPGMV container header, skipped before inflating.
pub const RPGMV_HEADER_LEN: usize = 16;

/// Zlib-compressed JSON, probed directly on the byte buffer with no text
/// wrapping.
///
/// Buffers longer than the fixed header that start with the RPGMV signature
/// have the 16-byte container header stripped before inflating. The header
/// is a detection aid only and is never re-added on encode; the format
/// family loads without it. A non-RPGMV file that happens to start with the
/// signature bytes is mis-stripped; that false positive is accepted for
/// compatibility.
pub struct ZlibJsonStrategy {
    max_decompressed: usize,
}

impl ZlibJsonStrategy {
    pub fn new(max_decompressed: usize) -> Self {
        Self { max_decompressed }
    }

    fn payload<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        if bytes.len() > RPGMV_HEADER_LEN && bytes[..RPGMV_SIGNATURE.len()] == RPGMV_SIGNATURE {
            trace!(
                "RPGMV signature detected, skipping {}-byte container header",
                RPGMV_HEADER_LEN
            );
            &bytes[RPGMV_HEADER_LEN..]
        } else {
            bytes
        }
    }
}

impl CodecStrategy for ZlibJsonStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::ZlibJson
    }

    fn decode(&self, bytes: &[u8]) -> DecodeAttempt {
        let inflated = inflate(self.payload(bytes), self.max_decompressed)?;
        let text = String::from_utf8(inflated)
            .map_err(|e| Inapplicable::because(format!("inflated payload is not UTF-8: {}", e)))?;
        parse_structured_json(&text)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        deflate(json_text(value).as_bytes()).map_err(|e| encode_failure(self.tag(), e))
    }
}

/// MessagePack-encoded structured value.
pub struct MessagePackStrategy;

impl CodecStrategy for MessagePackStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::MessagePack
    }

    fn decode(&self, bytes: &[u8]) -> DecodeAttempt {
        let value: Value = rmp_serde::from_slice(bytes)
            .map_err(|e| Inapplicable::because(format!("not MessagePack: {}", e)))?;
        require_structured(value)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        rmp_serde::to_vec(value).map_err(|e| encode_failure(self.tag(), e))
    }
}
