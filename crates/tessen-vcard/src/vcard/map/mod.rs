//! Field mapping between contact records and vCard properties.

pub(crate) mod decode;
pub(crate) mod encode;
