//! vCard 3.0 codec for the tessen mobile-sync bridge.
//!
//! The only entry points collaborators use are [`vcard::decode`] and
//! [`vcard::encode`]; everything else is plumbing underneath them.

pub mod error;
pub mod vcard;
