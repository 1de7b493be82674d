//! Ordered-fallback classification of unknown save bytes.

use log::{debug, info, trace};

use super::codec::{default_strategies, CodecStrategy};
use super::types::error::{Result, SaveError};
use super::types::models::{ParseResult, RawInput};

/// Classifies unknown save bytes by trying each codec strategy in order.
///
/// The strategy list is fixed at construction and probed front to back; the
/// first strategy whose decode succeeds determines both the decoded value
/// and the format tag the caller must hand back when re-encoding. Order
/// matters because some encodings are prefixes or supersets of others: an
/// input valid under two strategies always resolves to the earlier one.
///
/// Probing holds no state between calls, so a single probe can serve
/// concurrent, independent files. It also has no concept of a "current
/// file": a caller that submits a new file while an earlier probe is still
/// in flight must discard the stale result itself, e.g. by tagging requests
/// with a sequence number and ignoring out-of-date responses.
pub struct FormatProbe {
    strategies: Vec<Box<dyn CodecStrategy>>,
}

impl FormatProbe {
    /// A probe over the built-in strategies in their fixed order.
    pub fn new() -> Self {
        Self::with_strategies(default_strategies())
    }

    /// A probe over an explicit strategy list. The list order is the probing
    /// order.
    pub fn with_strategies(strategies: Vec<Box<dyn CodecStrategy>>) -> Self {
        Self { strategies }
    }

    /// Decode `input`, returning the value and the tag of the strategy that
    /// produced it.
    ///
    /// # Errors
    /// [`SaveError::UnrecognizedFormat`] if every strategy rejects the
    /// input. No partial result is carried: a value is either fully decoded
    /// or the whole operation fails.
    pub fn probe(&self, input: &RawInput) -> Result<ParseResult> {
        debug!("Probing {} ({} bytes)", input.file_name, input.bytes.len());
        for strategy in &self.strategies {
            match strategy.decode(&input.bytes) {
                Ok(value) => {
                    info!("{} decoded as {}", input.file_name, strategy.tag());
                    return Ok(ParseResult {
                        value,
                        format: strategy.tag(),
                    });
                }
                Err(reason) => {
                    trace!("{}: {} rejected: {}", input.file_name, strategy.tag(), reason);
                }
            }
        }
        Err(SaveError::UnrecognizedFormat)
    }
}

impl Default for FormatProbe {
    fn default() -> Self {
        Self::new()
    }
}
