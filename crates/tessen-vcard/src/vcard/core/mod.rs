//! Core types shared by the parser and the field mappers.

mod parameter;
mod property;

pub use parameter::{ParamKind, ParamSet, classify_bare};
pub use property::{DecodedProperty, PropertyBag};
