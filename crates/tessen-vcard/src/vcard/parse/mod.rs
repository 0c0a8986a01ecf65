//! vCard 3.0 parsing.
//!
//! Parsing is deliberately tolerant: lines without an unescaped colon
//! are skipped, unknown parameters are discarded, and content-transfer
//! decoding is best-effort. The only hard failure is input whose
//! content lines never announce `BEGIN:VCARD`.

mod error;
mod lexer;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{RawLine, find_unescaped, split_unescaped, tokenize_line, unfold};
pub use values::{
    base64_decode_lenient, decode_components, escape, escape_all, parse_bday, qp_decode, unescape,
};

use tracing::debug;

use crate::vcard::core::{DecodedProperty, ParamKind, ParamSet, PropertyBag, classify_bare};

/// Structural property names that never reach the property bag.
const STRUCTURAL: &[&str] = &["begin", "end", "version"];

/// Parses vCard text into a bag of decoded properties.
///
/// ## Errors
/// Returns [`ParseErrorKind::NotAVCard`] when the input contains
/// content lines but no `BEGIN:VCARD`. Input with zero colon-bearing
/// lines yields an empty bag instead of an error.
pub fn parse(input: &str) -> ParseResult<PropertyBag> {
    let unfolded = unfold(input);

    let mut bag = PropertyBag::default();
    let mut content_lines = 0usize;
    let mut saw_begin = false;

    for line in unfolded.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let Some(raw) = tokenize_line(line) else {
            debug!(line, "skipping line without colon separator");
            continue;
        };
        content_lines += 1;

        if STRUCTURAL.contains(&raw.name.as_str()) {
            if raw.name == "begin" && raw.value.eq_ignore_ascii_case("VCARD") {
                saw_begin = true;
            }
            continue;
        }

        let params = classify_parameters(&raw.param_tokens);
        let values = decode_components(&raw.value, &raw.name, &params);

        bag.push(DecodedProperty {
            name: raw.name,
            params,
            values,
            raw_value: raw.value,
        });
    }

    if content_lines > 0 && !saw_begin {
        return Err(ParseError::not_a_vcard("no BEGIN:VCARD property"));
    }

    Ok(bag)
}

/// Classifies raw parameter tokens into a [`ParamSet`].
///
/// `KEY=VALUE1,VALUE2` tokens are admitted for the known keys; bare
/// tokens go through the shorthand table. Everything else is discarded.
fn classify_parameters(tokens: &[String]) -> ParamSet {
    let mut params = ParamSet::default();

    for token in tokens {
        if let Some(eq) = token.find('=')
            && eq > 0
            && eq + 1 < token.len()
        {
            let key = &token[..eq];
            let Some(kind) = ParamKind::from_key(key) else {
                debug!(token, "discarding parameter with unknown key");
                continue;
            };
            for value in split_unescaped(&token[eq + 1..], ',') {
                if !value.is_empty() {
                    params.add(kind, value);
                }
            }
        } else if let Some(kind) = classify_bare(token) {
            params.add(kind, token.as_str());
        } else {
            debug!(token, "discarding unrecognized bare parameter");
        }
    }

    params
}
