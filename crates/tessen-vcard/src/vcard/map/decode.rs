//! Field mapper, decode direction.
//!
//! Assigns decoded property values into the contact record's named
//! slots. Properties are processed in a fixed order (email, im, tel,
//! adr, then the singular properties) so the overflow lines collected
//! in the note accumulator are deterministic.

use tessen_core::contact::{AddressKind, BodyType, ContactRecord, LegacyBody, TypedBody};
use tracing::debug;

use crate::vcard::core::{ParamSet, PropertyBag};
use crate::vcard::parse::parse_bday;
use crate::vcard::{BodyShape, DecodeOptions};

/// Collects overflow lines during one decode pass.
///
/// Overflow is never an error: when every dedicated slot for a property
/// is taken, the value is rendered as a synthetic `MARKER:value` line
/// and prepended to the note, newest first.
#[derive(Debug, Default)]
struct NoteAccumulator {
    lines: Vec<String>,
}

impl NoteAccumulator {
    fn overflow(&mut self, marker: &str, value: &str) {
        debug!(marker, "slot overflow, folding value into note");
        self.lines.push(format!("{marker}:{value}"));
    }

    /// Renders the final note text: overflow lines newest-first,
    /// followed by the base note content.
    fn finish(self, base: Option<String>) -> String {
        let mut out = String::new();
        for line in self.lines.iter().rev() {
            out.push_str(line);
            out.push_str("\r\n");
        }
        if let Some(base) = base {
            out.push_str(&base);
        }
        out
    }
}

/// Maps a parsed property bag onto a fresh contact record.
pub(crate) fn map_properties(bag: &PropertyBag, opts: &DecodeOptions) -> ContactRecord {
    let mut record = ContactRecord::new();
    let mut note = NoteAccumulator::default();

    map_emails(bag, &mut record, &mut note);
    map_ims(bag, &mut record, &mut note);
    map_tels(bag, &mut record, &mut note);
    map_addresses(bag, &mut record);
    map_singular(bag, &mut record);
    map_photo(bag, &mut record);
    map_note(bag, note, opts, &mut record);

    record
}

/// Fills the first empty slot; returns false when all are taken.
fn fill_slots(slots: [&mut Option<String>; 3], value: &str) -> bool {
    for slot in slots {
        if slot.is_none() {
            *slot = Some(value.to_string());
            return true;
        }
    }
    false
}

fn map_emails(bag: &PropertyBag, record: &mut ContactRecord, note: &mut NoteAccumulator) {
    for prop in bag.named("email") {
        let Some(value) = prop.first_value() else {
            continue;
        };
        let slots = [
            &mut record.email1,
            &mut record.email2,
            &mut record.email3,
        ];
        if !fill_slots(slots, value) {
            let first_type = prop.params.first_type().unwrap_or_default();
            note.overflow(&format!("EMAIL#TYPE={first_type}"), value);
        }
    }
}

fn map_ims(bag: &PropertyBag, record: &mut ContactRecord, note: &mut NoteAccumulator) {
    for prop in bag.named("impp") {
        let Some(value) = prop.first_value() else {
            continue;
        };
        let slots = [&mut record.im1, &mut record.im2, &mut record.im3];
        if !fill_slots(slots, value) {
            let first_type = prop.params.first_type().unwrap_or_default();
            note.overflow(&format!("IMPP#TYPE={first_type}"), value);
        }
    }
}

/// A telephone slot on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TelSlot {
    Home,
    Home2,
    Business,
    Business2,
    BusinessFax,
    HomeFax,
    Mobile,
    Car,
    Pager,
    Mms,
    Radio,
    CompanyMain,
    Assistant,
}

fn tel_slot_mut(record: &mut ContactRecord, slot: TelSlot) -> &mut Option<String> {
    match slot {
        TelSlot::Home => &mut record.home_phone,
        TelSlot::Home2 => &mut record.home2_phone,
        TelSlot::Business => &mut record.business_phone,
        TelSlot::Business2 => &mut record.business2_phone,
        TelSlot::BusinessFax => &mut record.business_fax,
        TelSlot::HomeFax => &mut record.home_fax,
        TelSlot::Mobile => &mut record.mobile_phone,
        TelSlot::Car => &mut record.car_phone,
        TelSlot::Pager => &mut record.pager_phone,
        TelSlot::Mms => &mut record.mms,
        TelSlot::Radio => &mut record.radio_phone,
        TelSlot::CompanyMain => &mut record.company_main_phone,
        TelSlot::Assistant => &mut record.assistant_phone,
    }
}

/// One entry of the telephone priority policy.
///
/// Rules are evaluated in table order; the first match wins. Slots are
/// tried in order, and `pref_promotes` enables the PREF promotion swap
/// at the second slot.
struct TelRule {
    applies: fn(&ParamSet) -> bool,
    slots: &'static [TelSlot],
    pref_promotes: bool,
    marker: &'static str,
}

fn is_home(p: &ParamSet) -> bool {
    p.has_type("HOME") && !p.has_type("FAX")
}
fn is_car(p: &ParamSet) -> bool {
    p.has_type("CAR")
}
fn is_pager(p: &ParamSet) -> bool {
    p.has_type("PAGER")
}
fn is_cell(p: &ParamSet) -> bool {
    p.has_type("CELL")
}
fn is_work(p: &ParamSet) -> bool {
    p.has_type("WORK") && !p.has_type("FAX")
}
fn is_fax_home(p: &ParamSet) -> bool {
    p.has_type("FAX") && p.has_type("HOME")
}
fn is_fax_work(p: &ParamSet) -> bool {
    p.has_type("FAX") && p.has_type("WORK")
}
fn is_fax(p: &ParamSet) -> bool {
    p.has_type("FAX")
}
fn is_text(p: &ParamSet) -> bool {
    p.has_type("TEXT")
}
fn is_other(p: &ParamSet) -> bool {
    p.has_type("OTHER")
}
fn is_msg(p: &ParamSet) -> bool {
    p.has_type("MSG")
}
fn is_voice(p: &ParamSet) -> bool {
    p.has_type("VOICE")
}

/// The telephone classification policy, in priority order.
///
/// HOME and WORK step aside when FAX is also present so that combined
/// FAX types land on the fax slots and round-trip against the encode
/// table.
const TEL_RULES: &[TelRule] = &[
    TelRule {
        applies: is_home,
        slots: &[TelSlot::Home, TelSlot::Home2],
        pref_promotes: true,
        marker: "TEL#TYPE=HOME;TYPE=OTHER",
    },
    TelRule {
        applies: is_car,
        slots: &[TelSlot::Car],
        pref_promotes: false,
        marker: "TEL#TYPE=CAR#TYPE=OTHER",
    },
    TelRule {
        applies: is_pager,
        slots: &[TelSlot::Pager],
        pref_promotes: false,
        marker: "TEL#TYPE=PAGER#TYPE=OTHER",
    },
    TelRule {
        applies: is_cell,
        slots: &[TelSlot::Mobile],
        pref_promotes: false,
        marker: "TEL#TYPE=CELL#TYPE=OTHER",
    },
    TelRule {
        applies: is_work,
        slots: &[TelSlot::Business, TelSlot::Business2, TelSlot::CompanyMain],
        pref_promotes: true,
        marker: "TEL#TYPE=WORK#TYPE=OTHER",
    },
    TelRule {
        applies: is_fax_home,
        slots: &[TelSlot::HomeFax],
        pref_promotes: false,
        marker: "TEL#TYPE=FAX#TYPE=HOME#TYPE=OTHER",
    },
    TelRule {
        applies: is_fax_work,
        slots: &[TelSlot::BusinessFax],
        pref_promotes: false,
        marker: "TEL#TYPE=FAX#TYPE=WORK#TYPE=OTHER",
    },
    TelRule {
        applies: is_fax,
        slots: &[TelSlot::BusinessFax, TelSlot::HomeFax],
        pref_promotes: false,
        marker: "TEL#TYPE=FAX#TYPE=OTHER",
    },
    TelRule {
        applies: is_text,
        slots: &[TelSlot::Mms],
        pref_promotes: false,
        marker: "TEL#TYPE=TEXT#TYPE=OTHER",
    },
    TelRule {
        applies: is_other,
        slots: &[TelSlot::Radio],
        pref_promotes: false,
        marker: "TEL#TYPE=OTHER#TYPE=OTHER",
    },
    TelRule {
        applies: is_msg,
        slots: &[TelSlot::CompanyMain],
        pref_promotes: false,
        marker: "TEL#TYPE=MSG#TYPE=OTHER",
    },
    TelRule {
        applies: is_voice,
        slots: &[TelSlot::Assistant],
        pref_promotes: false,
        marker: "TEL#TYPE=VOICE#TYPE=OTHER",
    },
];

fn place_tel(
    record: &mut ContactRecord,
    rule: &TelRule,
    params: &ParamSet,
    value: &str,
    note: &mut NoteAccumulator,
) {
    for (idx, slot) in rule.slots.iter().enumerate() {
        if tel_slot_mut(record, *slot).is_some() {
            continue;
        }

        if idx == 1 && rule.pref_promotes && params.has_type("PREF") {
            // Most-recently-seen-preferred: demote the existing primary
            // and let the new value take its place.
            let primary = tel_slot_mut(record, rule.slots[0]).take();
            *tel_slot_mut(record, rule.slots[1]) = primary;
            *tel_slot_mut(record, rule.slots[0]) = Some(value.to_string());
        } else {
            *tel_slot_mut(record, *slot) = Some(value.to_string());
        }
        return;
    }

    note.overflow(rule.marker, value);
}

fn map_tels(bag: &PropertyBag, record: &mut ContactRecord, note: &mut NoteAccumulator) {
    for prop in bag.named("tel") {
        let Some(value) = prop.first_value() else {
            continue;
        };
        match TEL_RULES.iter().find(|rule| (rule.applies)(&prop.params)) {
            Some(rule) => place_tel(record, rule, &prop.params, value, note),
            None => note.overflow("TEL", value),
        }
    }
}

fn address_kind(params: &ParamSet) -> AddressKind {
    if params.types().is_empty() {
        AddressKind::Other
    } else if params.has_type("HOME") {
        AddressKind::Home
    } else if params.has_type("WORK") {
        AddressKind::Business
    } else {
        AddressKind::Other
    }
}

fn map_addresses(bag: &PropertyBag, record: &mut ContactRecord) {
    // ADR components: po-box;extended;street;city;state;postal;country.
    // The first two are unused by the schema. A later address of an
    // already-used category overwrites component-wise.
    for prop in bag.named("adr") {
        let group = record.address_mut(address_kind(&prop.params));
        set_if_present(&mut group.street, prop.component(2));
        set_if_present(&mut group.city, prop.component(3));
        set_if_present(&mut group.state, prop.component(4));
        set_if_present(&mut group.postal_code, prop.component(5));
        set_if_present(&mut group.country, prop.component(6));
    }
}

fn set_if_present(target: &mut Option<String>, value: Option<&str>) {
    if let Some(value) = value {
        *target = Some(value.to_string());
    }
}

fn map_singular(bag: &PropertyBag, record: &mut ContactRecord) {
    set_if_present(&mut record.file_as, bag.first_value("fn"));

    if let Some(n) = bag.first_named("n") {
        set_if_present(&mut record.last_name, n.component(0));
        set_if_present(&mut record.first_name, n.component(1));
        set_if_present(&mut record.middle_name, n.component(2));
        set_if_present(&mut record.title, n.component(3));
        set_if_present(&mut record.suffix, n.component(4));
    }

    set_if_present(&mut record.nickname, bag.first_value("nickname"));
    set_if_present(&mut record.company_name, bag.first_value("org"));
    set_if_present(&mut record.job_title, bag.first_value("role"));
    set_if_present(&mut record.webpage, bag.first_value("url"));
    set_if_present(&mut record.spouse, bag.first_value("x-spouse"));
    set_if_present(&mut record.manager_name, bag.first_value("x-manager"));
    set_if_present(&mut record.assistant_name, bag.first_value("x-assistant"));

    if let Some(raw) = bag.first_value("bday") {
        match parse_bday(raw) {
            Some(date) => record.birthday = Some(date),
            None => debug!(raw, "ignoring unparsable BDAY value"),
        }
    }

    if let Some(categories) = bag.first_named("categories") {
        record.categories = categories
            .values
            .iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect();
    }
}

fn map_photo(bag: &PropertyBag, record: &mut ContactRecord) {
    let Some(prop) = bag.first_named("photo") else {
        return;
    };

    // The photo bytes are decoded per the property's own encoding
    // parameter, independent of outer escaping.
    let bytes = match prop.params.encoding() {
        Some(enc) if enc.eq_ignore_ascii_case("b") || enc.eq_ignore_ascii_case("base64") => {
            crate::vcard::parse::base64_decode_lenient(&prop.raw_value)
        }
        _ => prop.first_value().map(|v| v.as_bytes().to_vec()).unwrap_or_default(),
    };

    if !bytes.is_empty() {
        record.photo = Some(bytes);
    }
}

fn map_note(
    bag: &PropertyBag,
    note: NoteAccumulator,
    opts: &DecodeOptions,
    record: &mut ContactRecord,
) {
    let base = bag
        .first_value("note")
        .map(|v| v.replace("\n ", "\n"))
        .filter(|v| !v.is_empty());

    let text = note.finish(base);
    if text.is_empty() {
        return;
    }

    let estimated_size = text.len();
    let (data, truncated) =
        if opts.truncation_size > 0 && opts.truncation_size < text.len() {
            (utf8_truncate(&text, opts.truncation_size).to_string(), true)
        } else {
            (text, false)
        };

    match opts.body_shape {
        BodyShape::Legacy => {
            record.body = Some(LegacyBody {
                data,
                truncated,
                size: estimated_size,
            });
        }
        BodyShape::Typed => {
            record.as_body = Some(TypedBody {
                body_type: BodyType::PlainText,
                data,
                truncated,
                estimated_size,
            });
        }
    }
}

/// Cuts `s` to at most `max` bytes without splitting a character.
fn utf8_truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
