use thiserror::Error;

/// Codec-level errors
#[derive(Error, Debug)]
pub enum VcardError {
    #[error("Parse error: {0}")]
    ParseError(#[from] crate::vcard::parse::ParseError),
}

pub type VcardResult<T> = std::result::Result<T, VcardError>;
