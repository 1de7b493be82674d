//! Data structures flowing through the save-file codec pipeline.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::error::SaveError;

/// Identifier of the codec strategy that decoded a save file.
///
/// Every tag maps to exactly one strategy capable of both decoding bytes in
/// that representation and encoding a value back into it. The tag returned
/// by a probe must be carried by the caller for the lifetime of the editing
/// session and handed back unchanged on every encode; re-probing an edited
/// value could resolve to a different strategy and silently change the
/// container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    /// Bare JSON text.
    PlainJson,
    /// Base64-wrapped JSON text.
    Base64Json,
    /// Base64-wrapped, zlib-compressed JSON.
    Base64ZlibJson,
    /// Zlib-compressed JSON probed on the raw byte buffer.
    ZlibJson,
    /// LZ-string compressed JSON, base64 flavor.
    LzBase64Json,
    /// LZ-string compressed JSON, raw flavor.
    LzRawJson,
    /// MessagePack-encoded structured value.
    MessagePack,
}

impl FormatTag {
    /// All tags, listed in probing order.
    pub const ALL: [FormatTag; 7] = [
        FormatTag::PlainJson,
        FormatTag::Base64Json,
        FormatTag::Base64ZlibJson,
        FormatTag::LzBase64Json,
        FormatTag::LzRawJson,
        FormatTag::ZlibJson,
        FormatTag::MessagePack,
    ];

    /// Stable string form, suitable for persisting alongside an editing
    /// session. Round-trips through [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::PlainJson => "plain-json",
            FormatTag::Base64Json => "base64-json",
            FormatTag::Base64ZlibJson => "base64-zlib-json",
            FormatTag::ZlibJson => "zlib-json",
            FormatTag::LzBase64Json => "lz-base64-json",
            FormatTag::LzRawJson => "lz-raw-json",
            FormatTag::MessagePack => "messagepack",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = SaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain-json" => Ok(FormatTag::PlainJson),
            "base64-json" => Ok(FormatTag::Base64Json),
            "base64-zlib-json" => Ok(FormatTag::Base64ZlibJson),
            "zlib-json" => Ok(FormatTag::ZlibJson),
            "lz-base64-json" => Ok(FormatTag::LzBase64Json),
            "lz-raw-json" => Ok(FormatTag::LzRawJson),
            "messagepack" => Ok(FormatTag::MessagePack),
            _ => Err(SaveError::UnknownTag(s.to_string())),
        }
    }
}

/// A raw uploaded file: the byte payload and the name it arrived under.
///
/// The file name informs only the content classifier; the format probe never
/// consults it.
#[derive(Debug, Clone)]
pub struct RawInput {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

impl RawInput {
    pub fn new(bytes: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
        }
    }
}

/// Successful probe outcome: the decoded value plus the tag of the strategy
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub value: Value,
    pub format: FormatTag,
}

/// Bytes ready to hand back to the user, created fresh on every save
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutput {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    /// Extension chosen by the container policy, dot included ("" when the
    /// policy preserves an original name that had no extension).
    pub suggested_extension: String,
    /// `<original-base-name>_edited<extension>`.
    pub suggested_file_name: String,
}
