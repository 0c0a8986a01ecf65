//! Value escaping and content-transfer decoding.
//!
//! The escaper covers the four vCard-reserved sequences (backslash,
//! semicolon, comma, newline). Content-transfer decoding is
//! best-effort: invalid quoted-printable or base64 input is passed
//! through or dropped rather than failing the whole decode.

use base64::{Engine, engine::general_purpose};
use chrono::NaiveDate;

use super::lexer::split_unescaped;
use crate::vcard::core::ParamSet;

/// Escapes a text value for emission.
///
/// CRLF and lone CR are normalized to LF first; then `\`, `;`, `,` and
/// newline are replaced by their escaped spellings.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            '\n' => result.push_str("\\n"),
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            _ => result.push(c),
        }
    }

    result
}

/// Escapes every string of an ordered sequence.
#[must_use]
pub fn escape_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| escape(v.as_ref())).collect()
}

/// Un-escapes a text value.
///
/// Inverse of [`escape`]; additionally accepts `\N` as a newline escape
/// for interoperability with lenient producers.
#[must_use]
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n' | 'N') => {
                    chars.next();
                    result.push('\n');
                }
                Some(',') => {
                    chars.next();
                    result.push(',');
                }
                Some(';') => {
                    chars.next();
                    result.push(';');
                }
                Some('\\') => {
                    chars.next();
                    result.push('\\');
                }
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Decodes quoted-printable input (RFC 2045), best-effort.
///
/// `=XX` hex pairs become bytes, soft line breaks (`=` before a line
/// ending) are discarded, and invalid sequences pass through unchanged.
#[must_use]
pub fn qp_decode(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'=' {
            result.push(b);
            i += 1;
            continue;
        }

        let hi = bytes.get(i + 1).copied().and_then(hex_value);
        let lo = bytes.get(i + 2).copied().and_then(hex_value);
        if let (Some(hi), Some(lo)) = (hi, lo) {
            result.push((hi << 4) | lo);
            i += 3;
            continue;
        }

        match bytes.get(i + 1) {
            Some(b'\r') if bytes.get(i + 2) == Some(&b'\n') => i += 3,
            Some(b'\n' | b'\r') => i += 2,
            _ => {
                result.push(b);
                i += 1;
            }
        }
    }

    result
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Decodes base64 input, best-effort.
///
/// Whitespace and other non-alphabet characters are discarded first;
/// undecodable input yields an empty buffer rather than an error.
#[must_use]
pub fn base64_decode_lenient(s: &str) -> Vec<u8> {
    let filtered: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();

    general_purpose::STANDARD
        .decode(filtered.as_bytes())
        .or_else(|_| {
            general_purpose::STANDARD_NO_PAD.decode(filtered.trim_end_matches('=').as_bytes())
        })
        .unwrap_or_default()
}

/// Splits a raw value into its ordered components and decodes each one.
///
/// `categories` splits on unescaped commas, every other property on
/// unescaped semicolons. A declared content-transfer encoding takes the
/// place of un-escaping; `7bit`/`8bit` leave the components untouched.
#[must_use]
pub fn decode_components(raw: &str, property: &str, params: &ParamSet) -> Vec<String> {
    let delim = if property == "categories" { ',' } else { ';' };
    let parts = split_unescaped(raw, delim);

    match params.encoding() {
        Some(enc) if is_quoted_printable(enc) => parts
            .into_iter()
            .map(|p| String::from_utf8_lossy(&qp_decode(p)).into_owned())
            .collect(),
        Some(enc) if is_base64(enc) => parts
            .into_iter()
            .map(|p| String::from_utf8_lossy(&base64_decode_lenient(p)).into_owned())
            .collect(),
        Some(_) => parts.into_iter().map(str::to_string).collect(),
        None => parts.into_iter().map(unescape).collect(),
    }
}

fn is_quoted_printable(enc: &str) -> bool {
    enc.eq_ignore_ascii_case("q") || enc.eq_ignore_ascii_case("quoted-printable")
}

fn is_base64(enc: &str) -> bool {
    enc.eq_ignore_ascii_case("b") || enc.eq_ignore_ascii_case("base64")
}

/// Parses a `BDAY` value as a plain calendar date (assumed UTC).
///
/// Accepts `YYYY-MM-DD` and `YYYYMMDD`, with any time suffix ignored.
#[must_use]
pub fn parse_bday(value: &str) -> Option<NaiveDate> {
    let s = value.trim();
    let date_part = s.split('T').next().unwrap_or(s);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(date_part, "%Y%m%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcard::core::ParamKind;

    #[test]
    fn escape_reserved_sequences() {
        assert_eq!(escape("a;b,c\\d\ne"), "a\\;b\\,c\\\\d\\ne");
    }

    #[test]
    fn escape_normalizes_line_endings() {
        assert_eq!(escape("a\r\nb\rc"), "a\\nb\\nc");
    }

    #[test]
    fn unescape_is_inverse_of_escape() {
        let samples = [
            "plain",
            "semi;colon, and comma",
            "back\\slash",
            "multi\nline\ntext",
            "mixed \\; \\, \\\\ soup",
            "",
        ];
        for s in samples {
            assert_eq!(unescape(&escape(s)), s, "round-trip failed for {s:?}");
        }
    }

    #[test]
    fn unescape_accepts_upper_n() {
        assert_eq!(unescape(r"Line1\NLine2"), "Line1\nLine2");
    }

    #[test]
    fn unescape_leaves_unknown_escapes() {
        assert_eq!(unescape(r"a\xb"), r"a\xb");
    }

    #[test]
    fn qp_decodes_hex_pairs() {
        assert_eq!(qp_decode("a=20b"), b"a b");
        assert_eq!(qp_decode("=C3=A9"), "é".as_bytes());
    }

    #[test]
    fn qp_discards_soft_breaks() {
        assert_eq!(qp_decode("foo=\r\nbar"), b"foobar");
        assert_eq!(qp_decode("foo=\nbar"), b"foobar");
    }

    #[test]
    fn qp_passes_invalid_through() {
        assert_eq!(qp_decode("a=ZZb"), b"a=ZZb");
        assert_eq!(qp_decode("trailing="), b"trailing=");
    }

    #[test]
    fn base64_lenient_ignores_whitespace() {
        assert_eq!(base64_decode_lenient("aGVs\n bG8="), b"hello");
    }

    #[test]
    fn base64_lenient_handles_missing_padding() {
        assert_eq!(base64_decode_lenient("aGVsbG8"), b"hello");
    }

    #[test]
    fn components_split_on_property_delimiter() {
        let params = ParamSet::default();
        assert_eq!(
            decode_components("Smith;John;;;", "n", &params),
            vec!["Smith", "John", "", "", ""]
        );
        assert_eq!(
            decode_components("Family,Friends", "categories", &params),
            vec!["Family", "Friends"]
        );
    }

    #[test]
    fn components_unescape_without_encoding() {
        let params = ParamSet::default();
        assert_eq!(
            decode_components(r"1 Main St\, Apt 2", "adr", &params),
            vec!["1 Main St, Apt 2"]
        );
    }

    #[test]
    fn components_decode_quoted_printable() {
        let mut params = ParamSet::default();
        params.add(ParamKind::Encoding, "QUOTED-PRINTABLE");
        assert_eq!(
            decode_components("Caf=C3=A9", "org", &params),
            vec!["Café"]
        );
    }

    #[test]
    fn bday_formats() {
        let expected = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        assert_eq!(parse_bday("1990-06-15"), Some(expected));
        assert_eq!(parse_bday("19900615"), Some(expected));
        assert_eq!(parse_bday("1990-06-15T00:00:00Z"), Some(expected));
        assert_eq!(parse_bday("not a date"), None);
    }
}
