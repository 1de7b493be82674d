//! Core save-file codec module.

pub mod codec;
pub mod encoder;
pub mod probe;
pub mod types;

pub use encoder::RoundTripEncoder;
pub use probe::FormatProbe;
pub use types::category::SaveCategory;
pub use types::error::{Result, SaveError};
pub use types::models::{EncodeOutput, FormatTag, ParseResult, RawInput};
