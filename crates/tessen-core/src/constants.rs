//! Process-wide codec constants.

/// Product identifier emitted on every generated vCard.
pub const PROD_ID: &str = "-//tessen//vCard 3.0//EN";

/// vCard version emitted by the encoder.
pub const VCARD_VERSION: &str = "3.0";

/// Width at which emitted property values are folded, in octets.
pub const FOLD_WIDTH: usize = 50;
