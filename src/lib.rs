//! # savegame-codec
//!
//! A codec pipeline for game save files that carry no reliable format
//! marker. Unknown bytes are fed through an ordered chain of codec
//! strategies (plain JSON, base64, zlib, both lz-string flavors,
//! MessagePack); the first successful decode yields a JSON value together
//! with the tag of the strategy that matched. An edited value plus that
//! same tag later re-encodes into bytes the originating game can still
//! load.
//!
//! Decoding and encoding are pure transforms: the crate keeps no state
//! between calls and is safe to use concurrently for independent files.
//! It also has no notion of a "current file". Callers that let probes
//! race (a user dropping a new save while the previous one is still
//! decoding) must discard stale results themselves, for instance by
//! sequence-numbering requests.

pub mod savegame;

// Re-export the main types for convenience
pub use savegame::{
    EncodeOutput, FormatProbe, FormatTag, ParseResult, RawInput, Result, RoundTripEncoder,
    SaveCategory, SaveError,
};
