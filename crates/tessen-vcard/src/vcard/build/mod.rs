//! vCard text emission helpers.

mod fold;

pub use fold::{chunk_at, emit_property};
