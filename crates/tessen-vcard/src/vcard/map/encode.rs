//! Field mapper, encode direction.
//!
//! Emits a full vCard 3.0 document from a contact record. Property
//! order is fixed: envelope, FN, the three address groups, then the
//! flat slot table, then BDAY, CATEGORIES, NOTE and PHOTO. Empty slots
//! are skipped entirely.

use base64::{Engine, engine::general_purpose};
use tessen_core::constants::{FOLD_WIDTH, VCARD_VERSION};
use tessen_core::contact::{AddressKind, ContactRecord};

use crate::vcard::EncodeOptions;
use crate::vcard::build::{chunk_at, emit_property};
use crate::vcard::parse::{escape, escape_all};

/// Renders `record` as vCard 3.0 text.
pub(crate) fn encode_record(record: &ContactRecord, opts: &EncodeOptions<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("BEGIN:VCARD".to_string());
    lines.push(format!("VERSION:{VCARD_VERSION}"));
    lines.push(format!("PRODID:{}", opts.prod_id));
    lines.push(emit_property("FN", &escape(&display_name(record, opts))));

    push_addresses(record, &mut lines);
    push_structured_name(record, &mut lines);
    push_slots(record, &mut lines);

    if let Some(birthday) = record.birthday {
        lines.push(format!("BDAY:{}", birthday.format("%Y-%m-%d")));
    }

    if !record.categories.is_empty() {
        lines.push(format!(
            "CATEGORIES:{}",
            escape_all(&record.categories).join(",")
        ));
    }

    if let Some(text) = note_text(record) {
        lines.push(format!("NOTE:{}", escape(text)));
    }

    if let Some(photo) = record.photo.as_deref().filter(|p| !p.is_empty()) {
        let encoded = general_purpose::STANDARD.encode(photo);
        lines.push(format!(
            "PHOTO;ENCODING=BASE64;TYPE=JPEG:\n {}",
            chunk_at(&encoded, FOLD_WIDTH).join("\n ")
        ));
    }

    lines.push("END:VCARD".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    // Folded emission can leave doubled newlines; collapse them so the
    // document stays one property per physical line group.
    out.replace("\n\n", "\n")
}

/// The FN value: the stored file-as, unless it is absent or the
/// override option forces the display-name builder.
fn display_name(record: &ContactRecord, opts: &EncodeOptions<'_>) -> String {
    let existing = record.file_as.as_deref().filter(|s| !s.is_empty());
    match existing {
        Some(value) if !opts.always_override_file_as => value.to_string(),
        _ => (opts.build_file_as)(
            record.last_name.as_deref().unwrap_or(""),
            record.first_name.as_deref().unwrap_or(""),
            record.middle_name.as_deref().unwrap_or(""),
            record.company_name.as_deref().unwrap_or(""),
        ),
    }
}

fn push_addresses(record: &ContactRecord, lines: &mut Vec<String>) {
    let groups = [
        (AddressKind::Business, "ADR;TYPE=WORK"),
        (AddressKind::Home, "ADR;TYPE=HOME"),
        (AddressKind::Other, "ADR;TYPE=OTHER"),
    ];

    for (kind, tag) in groups {
        let adr = record.address(kind);
        if adr.is_empty() {
            continue;
        }
        // Seven positional components; po-box and extended stay empty.
        let value = [
            String::new(),
            String::new(),
            escape_opt(adr.street.as_deref()),
            escape_opt(adr.city.as_deref()),
            escape_opt(adr.state.as_deref()),
            escape_opt(adr.postal_code.as_deref()),
            escape_opt(adr.country.as_deref()),
        ]
        .join(";");
        lines.push(emit_property(tag, &value));
    }
}

fn push_structured_name(record: &ContactRecord, lines: &mut Vec<String>) {
    let components = [
        record.last_name.as_deref(),
        record.first_name.as_deref(),
        record.middle_name.as_deref(),
        record.title.as_deref(),
        record.suffix.as_deref(),
    ];
    if components.iter().all(Option::is_none) {
        return;
    }

    let value = components.map(escape_opt).join(";");
    lines.push(emit_property("N", &value));
}

/// The flat slot table, in emission order. Tags carry the TYPE
/// parameters the decode-direction priority rules key on, so a
/// re-decode lands each value back in its slot.
fn push_slots(record: &ContactRecord, lines: &mut Vec<String>) {
    let slots: [(&str, Option<&str>); 26] = [
        ("EMAIL;TYPE=WORK;TYPE=PREF", record.email1.as_deref()),
        ("EMAIL;TYPE=HOME", record.email2.as_deref()),
        ("EMAIL;TYPE=OTHER", record.email3.as_deref()),
        ("TEL;TYPE=WORK;TYPE=PREF", record.business_phone.as_deref()),
        ("TEL;TYPE=WORK", record.business2_phone.as_deref()),
        ("TEL;TYPE=MSG", record.company_main_phone.as_deref()),
        ("TEL;TYPE=FAX;TYPE=WORK", record.business_fax.as_deref()),
        ("TEL;TYPE=HOME;TYPE=PREF", record.home_phone.as_deref()),
        ("TEL;TYPE=HOME", record.home2_phone.as_deref()),
        ("TEL;TYPE=FAX;TYPE=HOME", record.home_fax.as_deref()),
        ("TEL;TYPE=CELL", record.mobile_phone.as_deref()),
        ("TEL;TYPE=CAR", record.car_phone.as_deref()),
        ("TEL;TYPE=PAGER", record.pager_phone.as_deref()),
        ("TEL;TYPE=TEXT", record.mms.as_deref()),
        ("TEL;TYPE=OTHER", record.radio_phone.as_deref()),
        ("TEL;TYPE=VOICE", record.assistant_phone.as_deref()),
        ("ORG", record.company_name.as_deref()),
        ("ROLE", record.job_title.as_deref()),
        ("URL", record.webpage.as_deref()),
        ("NICKNAME", record.nickname.as_deref()),
        ("IMPP", record.im1.as_deref()),
        ("IMPP", record.im2.as_deref()),
        ("IMPP", record.im3.as_deref()),
        ("X-SPOUSE", record.spouse.as_deref()),
        ("X-MANAGER", record.manager_name.as_deref()),
        ("X-ASSISTANT", record.assistant_name.as_deref()),
    ];

    for (tag, value) in slots {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            continue;
        };
        let value = if tag.starts_with("EMAIL") {
            sanitize_email(value)
        } else {
            value.to_string()
        };
        lines.push(emit_property(tag, &escape(&value)));
    }
}

fn escape_opt(value: Option<&str>) -> String {
    value.map(escape).unwrap_or_default()
}

/// Reduces a display-form address like `"Jane" <jane@x.com>` to the
/// bare address.
fn sanitize_email(value: &str) -> String {
    let trimmed = value.trim_matches('"');
    match trimmed.find('<') {
        Some(start) => {
            let inner = &trimmed[start + 1..];
            inner.strip_suffix('>').unwrap_or(inner).to_string()
        }
        None => trimmed.to_string(),
    }
}

/// Note text to emit: the typed body wins over the legacy body.
fn note_text(record: &ContactRecord) -> Option<&str> {
    record
        .as_body
        .as_ref()
        .map(|b| b.data.as_str())
        .or_else(|| record.body.as_ref().map(|b| b.data.as_str()))
        .filter(|text| !text.is_empty())
}
