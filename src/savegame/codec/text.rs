//! Text-path codec strategies: representations carried as UTF-8 text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

use super::{
    deflate, encode_failure, inflate, json_text, parse_structured_json, utf8_text, CodecStrategy,
    DecodeAttempt, Inapplicable,
};
use crate::savegame::types::error::Result;
use crate::savegame::types::models::FormatTag;

/// Bare JSON text.
pub struct PlainJsonStrategy;

impl CodecStrategy for PlainJsonStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::PlainJson
    }

    fn decode(&self, bytes: &[u8]) -> DecodeAttempt {
        parse_structured_json(utf8_text(bytes)?)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        Ok(json_text(value).into_bytes())
    }
}

/// Base64-wrapped JSON text.
pub struct Base64JsonStrategy;

impl CodecStrategy for Base64JsonStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Base64Json
    }

    fn decode(&self, bytes: &[u8]) -> DecodeAttempt {
        let inner = decode_base64(utf8_text(bytes)?)?;
        let text = String::from_utf8(inner)
            .map_err(|e| Inapplicable::because(format!("base64 payload is not UTF-8: {}", e)))?;
        parse_structured_json(&text)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        Ok(BASE64.encode(json_text(value)).into_bytes())
    }
}

/// Base64-wrapped, zlib-compressed JSON.
pub struct Base64ZlibJsonStrategy {
    max_decompressed: usize,
}

impl Base64ZlibJsonStrategy {
    pub fn new(max_decompressed: usize) -> Self {
        Self { max_decompressed }
    }
}

impl CodecStrategy for Base64ZlibJsonStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Base64ZlibJson
    }

    fn decode(&self, bytes: &[u8]) -> DecodeAttempt {
        let compressed = decode_base64(utf8_text(bytes)?)?;
        let inflated = inflate(&compressed, self.max_decompressed)?;
        let text = String::from_utf8(inflated)
            .map_err(|e| Inapplicable::because(format!("inflated payload is not UTF-8: {}", e)))?;
        parse_structured_json(&text)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let deflated =
            deflate(json_text(value).as_bytes()).map_err(|e| encode_failure(self.tag(), e))?;
        Ok(BASE64.encode(deflated).into_bytes())
    }
}

/// LZ-string compressed JSON, base64 flavor.
pub struct LzBase64JsonStrategy;

impl CodecStrategy for LzBase64JsonStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::LzBase64Json
    }

    fn decode(&self, bytes: &[u8]) -> DecodeAttempt {
        let text = utf8_text(bytes)?;
        let units = lz_str::decompress_from_base64(text.trim())
            .ok_or_else(|| Inapplicable::because("lz-string base64 decompression failed"))?;
        let json = String::from_utf16(&units)
            .map_err(|e| Inapplicable::because(format!("decompressed text is not UTF-16: {}", e)))?;
        parse_structured_json(&json)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        Ok(lz_str::compress_to_base64(json_text(value).as_str()).into_bytes())
    }
}

/// LZ-string compressed JSON, raw flavor.
///
/// The compressed form is the UTF-8 text whose UTF-16 code units are the
/// compressor's output. A compressor output containing unpaired surrogates
/// has no text form and is reported as an encode failure; such data would
/// not survive a JS-string file write either.
pub struct LzRawJsonStrategy;

impl CodecStrategy for LzRawJsonStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::LzRawJson
    }

    fn decode(&self, bytes: &[u8]) -> DecodeAttempt {
        let text = utf8_text(bytes)?;
        let units = lz_str::decompress(text)
            .ok_or_else(|| Inapplicable::because("lz-string raw decompression failed"))?;
        let json = String::from_utf16(&units)
            .map_err(|e| Inapplicable::because(format!("decompressed text is not UTF-16: {}", e)))?;
        parse_structured_json(&json)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let units = lz_str::compress(json_text(value).as_str());
        let text = String::from_utf16(&units)
            .map_err(|_| encode_failure(self.tag(), "compressor output is not valid UTF-16"))?;
        Ok(text.into_bytes())
    }
}

/// Base64-decode `text`, ignoring any embedded whitespace.
fn decode_base64(text: &str) -> std::result::Result<Vec<u8>, Inapplicable> {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(stripped.as_bytes())
        .map_err(|e| Inapplicable::because(format!("malformed base64: {}", e)))
}
