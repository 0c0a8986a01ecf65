//! Bidirectional vCard 3.0 codec for contact records.
//!
//! [`decode`] parses vCard text and maps its properties onto the fixed
//! slots of a [`ContactRecord`]; values with no free slot are folded
//! into the note as marker lines instead of being dropped. [`encode`]
//! renders a record back to vCard text with a fixed property order, so
//! a decode of the output reproduces the record.
//!
//! ```
//! use tessen_vcard::vcard::{DecodeOptions, EncodeOptions, decode, encode};
//!
//! let input = "BEGIN:VCARD\nVERSION:3.0\nFN:John Smith\nEND:VCARD\n";
//! let record = decode(input, &DecodeOptions::default())?;
//! assert_eq!(record.file_as.as_deref(), Some("John Smith"));
//!
//! let text = encode(&record, &EncodeOptions::default());
//! assert!(text.contains("FN:John Smith"));
//! # Ok::<(), tessen_vcard::error::VcardError>(())
//! ```

pub mod build;
pub mod core;
mod map;
pub mod parse;

#[cfg(test)]
mod tests;

pub use parse::{ParseError, ParseErrorKind, ParseResult};

use crate::error::VcardResult;
use tessen_core::constants::PROD_ID;
use tessen_core::contact::ContactRecord;
use tracing::debug;

/// Which note representation [`decode`] populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyShape {
    /// The flat legacy body.
    Legacy,
    /// The typed body with an explicit content type.
    #[default]
    Typed,
}

/// Options for [`decode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Maximum note length in bytes; `0` disables truncation.
    pub truncation_size: usize,
    /// Note representation to populate.
    pub body_shape: BodyShape,
}

impl From<&tessen_core::config::CodecConfig> for DecodeOptions {
    fn from(cfg: &tessen_core::config::CodecConfig) -> Self {
        Self {
            truncation_size: cfg.truncation_size,
            body_shape: if cfg.typed_note_body {
                BodyShape::Typed
            } else {
                BodyShape::Legacy
            },
        }
    }
}

/// Options for [`encode`].
#[derive(Clone, Copy)]
pub struct EncodeOptions<'a> {
    /// Rebuild FN from the name components even when a file-as value is
    /// stored.
    pub always_override_file_as: bool,
    /// PRODID value for the envelope.
    pub prod_id: &'a str,
    /// Display-name builder used when FN has to be derived.
    pub build_file_as: &'a (dyn Fn(&str, &str, &str, &str) -> String + Sync),
}

impl Default for EncodeOptions<'_> {
    fn default() -> Self {
        Self {
            always_override_file_as: false,
            prod_id: PROD_ID,
            build_file_as: &tessen_core::util::build_file_as,
        }
    }
}

impl<'a> From<&'a tessen_core::config::CodecConfig> for EncodeOptions<'a> {
    fn from(cfg: &'a tessen_core::config::CodecConfig) -> Self {
        Self {
            always_override_file_as: cfg.always_override_file_as,
            prod_id: &cfg.prod_id,
            ..Self::default()
        }
    }
}

impl std::fmt::Debug for EncodeOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodeOptions")
            .field("always_override_file_as", &self.always_override_file_as)
            .field("prod_id", &self.prod_id)
            .finish_non_exhaustive()
    }
}

/// Decodes vCard text into a contact record.
///
/// ## Errors
/// Returns [`crate::error::VcardError::ParseError`] carrying
/// [`ParseErrorKind::NotAVCard`] when the input has content lines but
/// no `BEGIN:VCARD`.
pub fn decode(input: &str, opts: &DecodeOptions) -> VcardResult<ContactRecord> {
    debug!(bytes = input.len(), "decoding vCard");
    let bag = parse::parse(input)?;
    Ok(map::decode::map_properties(&bag, opts))
}

/// Encodes a contact record as vCard 3.0 text.
#[must_use]
pub fn encode(record: &ContactRecord, opts: &EncodeOptions<'_>) -> String {
    debug!("encoding contact record");
    map::encode::encode_record(record, opts)
}
