//! The structured contact record exchanged with the sync engine.
//!
//! A [`ContactRecord`] is created fresh per decode call and is immutable
//! input per encode call. It has no identity or persistence of its own;
//! ownership and storage belong entirely to the calling collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which of the three address groups a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    /// Home address group.
    Home,
    /// Business (work) address group.
    Business,
    /// Catch-all group for untyped or unrecognized addresses.
    Other,
}

/// One address group (street, city, state, postal code, country).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl ContactAddress {
    /// Returns whether every component is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }
}

/// Content type of a typed note body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Plain text.
    PlainText,
    /// HTML markup.
    Html,
}

/// The richer note representation used by protocol version 12 and later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedBody {
    pub body_type: BodyType,
    pub data: String,
    /// Set when the note was cut at the caller-supplied truncation size.
    pub truncated: bool,
    /// Byte length of the note before truncation.
    pub estimated_size: usize,
}

/// The legacy plain-text note representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyBody {
    pub data: String,
    pub truncated: bool,
    /// Byte length of the note before truncation.
    pub size: usize,
}

/// A contact as the mobile-sync protocol sees it.
///
/// All fields are optional; the decode mapper fills them following the
/// fixed priority and overflow rules, and the encode mapper walks them
/// in a fixed table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    // Identity
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub title: Option<String>,
    pub suffix: Option<String>,
    pub nickname: Option<String>,
    pub file_as: Option<String>,

    // Organization
    pub company_name: Option<String>,
    pub job_title: Option<String>,

    // Email slots, priority-ordered
    pub email1: Option<String>,
    pub email2: Option<String>,
    pub email3: Option<String>,

    // Instant-messaging slots, priority-ordered
    pub im1: Option<String>,
    pub im2: Option<String>,
    pub im3: Option<String>,

    // Telephone slots
    pub home_phone: Option<String>,
    pub home2_phone: Option<String>,
    pub business_phone: Option<String>,
    pub business2_phone: Option<String>,
    pub business_fax: Option<String>,
    pub home_fax: Option<String>,
    pub mobile_phone: Option<String>,
    pub car_phone: Option<String>,
    pub pager_phone: Option<String>,
    pub mms: Option<String>,
    pub radio_phone: Option<String>,
    pub company_main_phone: Option<String>,
    pub assistant_phone: Option<String>,

    // Address groups
    pub home_address: ContactAddress,
    pub business_address: ContactAddress,
    pub other_address: ContactAddress,

    // Relations
    pub spouse: Option<String>,
    pub manager_name: Option<String>,
    pub assistant_name: Option<String>,

    /// Calendar date only, no time or timezone.
    pub birthday: Option<NaiveDate>,
    pub webpage: Option<String>,
    pub categories: Vec<String>,

    /// Legacy note shape (protocol versions before 12).
    pub body: Option<LegacyBody>,
    /// Typed note shape (protocol version 12 and later).
    pub as_body: Option<TypedBody>,

    /// Decoded photo bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<u8>>,
}

impl ContactRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the address group for `kind`.
    #[must_use]
    pub fn address(&self, kind: AddressKind) -> &ContactAddress {
        match kind {
            AddressKind::Home => &self.home_address,
            AddressKind::Business => &self.business_address,
            AddressKind::Other => &self.other_address,
        }
    }

    /// Returns the mutable address group for `kind`.
    pub fn address_mut(&mut self, kind: AddressKind) -> &mut ContactAddress {
        match kind {
            AddressKind::Home => &mut self.home_address,
            AddressKind::Business => &mut self.business_address,
            AddressKind::Other => &mut self.other_address,
        }
    }

    /// Returns whether no field has been populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_is_empty() {
        assert!(ContactRecord::new().is_empty());
    }

    #[test]
    fn populated_record_is_not_empty() {
        let record = ContactRecord {
            email1: Some("a@example.com".to_string()),
            ..ContactRecord::default()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn address_mut_targets_group() {
        let mut record = ContactRecord::new();
        record.address_mut(AddressKind::Business).city = Some("Springfield".to_string());
        assert_eq!(
            record.business_address.city.as_deref(),
            Some("Springfield")
        );
        assert!(record.home_address.is_empty());
        assert!(record.other_address.is_empty());
    }
}
