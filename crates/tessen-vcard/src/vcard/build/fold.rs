//! Long-value folding.
//!
//! Values longer than [`FOLD_WIDTH`] octets are emitted as a bare tag
//! followed by continuation lines, each one a space-prefixed chunk.
//! Unfolding removes the newline and one whitespace character, so the
//! logical value reassembles exactly.

use tessen_core::constants::FOLD_WIDTH;

/// Emits one `TAG:value` content line, folding the value when it
/// exceeds the fold width.
#[must_use]
pub fn emit_property(tag: &str, value: &str) -> String {
    if value.len() <= FOLD_WIDTH {
        return format!("{tag}:{value}");
    }

    let chunks = chunk_at(value, FOLD_WIDTH);
    format!("{tag}:\n {}", chunks.join("\n "))
}

/// Splits `value` into chunks of at most `width` bytes, never cutting
/// through a character.
#[must_use]
pub fn chunk_at(value: &str, width: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut len = 0;

    for (i, c) in value.char_indices() {
        if len + c.len_utf8() > width {
            chunks.push(&value[start..i]);
            start = i;
            len = 0;
        }
        len += c.len_utf8();
    }

    if start < value.len() || chunks.is_empty() {
        chunks.push(&value[start..]);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcard::parse::unfold;

    #[test]
    fn short_value_stays_on_one_line() {
        assert_eq!(emit_property("FN", "John Smith"), "FN:John Smith");
    }

    #[test]
    fn long_value_folds_into_continuations() {
        let value = "x".repeat(120);
        let line = emit_property("NOTE", &value);
        assert!(line.starts_with("NOTE:\n "));
        for physical in line.lines().skip(1) {
            assert!(physical.len() <= FOLD_WIDTH + 1);
        }
    }

    #[test]
    fn folded_line_unfolds_to_original() {
        let value = "a".repeat(137);
        let line = emit_property("ORG", &value);
        assert_eq!(unfold(&line), format!("ORG:{value}"));
    }

    #[test]
    fn chunking_respects_char_boundaries() {
        let value = "é".repeat(40);
        for chunk in chunk_at(&value, FOLD_WIDTH) {
            assert!(chunk.len() <= FOLD_WIDTH);
            assert!(!chunk.is_empty());
        }
        assert_eq!(chunk_at(&value, FOLD_WIDTH).concat(), value);
    }

    #[test]
    fn chunk_at_empty_input() {
        assert_eq!(chunk_at("", 50), vec![""]);
    }
}
