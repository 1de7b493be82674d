//! Re-encoding an edited value under its original container format.

use log::info;
use serde_json::Value;

use super::codec::{default_strategies, CodecStrategy};
use super::types::category::{extension_of, SaveCategory};
use super::types::error::{Result, SaveError};
use super::types::models::{EncodeOutput, FormatTag};

/// Re-applies the strategy named by a stored [`FormatTag`] to produce
/// output bytes, plus the MIME type and file-name suggestion for the
/// download.
///
/// The tag must be the one the probe returned for the original upload. It
/// is a required parameter rather than rediscovered state: an edited value
/// could re-encode validly under several strategies, and picking a
/// different one would silently change the container format out from under
/// the game.
pub struct RoundTripEncoder {
    strategies: Vec<Box<dyn CodecStrategy>>,
}

impl RoundTripEncoder {
    /// An encoder over the built-in strategies.
    pub fn new() -> Self {
        Self::with_strategies(default_strategies())
    }

    /// An encoder over an explicit strategy list.
    pub fn with_strategies(strategies: Vec<Box<dyn CodecStrategy>>) -> Self {
        Self { strategies }
    }

    /// Encode `value` under `format`, deriving the output name from
    /// `original_file_name`.
    ///
    /// # Errors
    /// [`SaveError::EncodeFailure`] if no registered strategy carries the
    /// tag, or the strategy cannot serialize the value. Never retried.
    pub fn encode(
        &self,
        value: &Value,
        format: FormatTag,
        original_file_name: &str,
    ) -> Result<EncodeOutput> {
        let strategy = self
            .strategies
            .iter()
            .find(|s| s.tag() == format)
            .ok_or_else(|| SaveError::EncodeFailure {
                format,
                reason: "no strategy registered for this tag".to_string(),
            })?;

        let bytes = strategy.encode(value)?;
        let suggested_extension = suggested_extension(format, original_file_name);
        let suggested_file_name = edited_file_name(original_file_name, &suggested_extension);
        info!(
            "Encoded {} bytes as {} -> {}",
            bytes.len(),
            format,
            suggested_file_name
        );

        Ok(EncodeOutput {
            bytes,
            mime_type: mime_type(format),
            suggested_extension,
            suggested_file_name,
        })
    }
}

impl Default for RoundTripEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// MIME type of each container format.
fn mime_type(format: FormatTag) -> &'static str {
    match format {
        FormatTag::PlainJson => "application/json",
        FormatTag::Base64Json
        | FormatTag::Base64ZlibJson
        | FormatTag::LzBase64Json
        | FormatTag::LzRawJson => "text/plain",
        FormatTag::ZlibJson | FormatTag::MessagePack => "application/octet-stream",
    }
}

/// Output-extension policy.
///
/// Plain and base64 JSON always come back as `.json`. The compressed
/// containers keep the original extension only when the source classifies
/// as an RPG save (the compressed-save family); the raw lz-string and
/// MessagePack containers keep it unconditionally. The asymmetry between
/// the last two groups mirrors one known game-container format and is kept
/// as observed.
fn suggested_extension(format: FormatTag, original_file_name: &str) -> String {
    let original = extension_of(original_file_name);
    match format {
        FormatTag::PlainJson | FormatTag::Base64Json => ".json".to_string(),
        FormatTag::Base64ZlibJson | FormatTag::ZlibJson | FormatTag::LzBase64Json => {
            if SaveCategory::from_file_name(original_file_name) == SaveCategory::Rpg {
                original.to_string()
            } else {
                ".json".to_string()
            }
        }
        FormatTag::LzRawJson | FormatTag::MessagePack => original.to_string(),
    }
}

/// `<original-base-name>_edited<extension>`.
fn edited_file_name(original_file_name: &str, extension: &str) -> String {
    let original_extension = extension_of(original_file_name);
    let base = &original_file_name[..original_file_name.len() - original_extension.len()];
    format!("{}_edited{}", base, extension)
}
