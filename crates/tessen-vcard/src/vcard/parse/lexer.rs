//! Line unfolding and content-line tokenizing.
//!
//! vCard folds long logical lines across physical lines; a continuation
//! line starts with a space or tab (RFC 2426 §2.6). Unfolding joins the
//! pieces back together before any line is tokenized.

/// Normalizes line endings and rejoins folded continuation lines.
///
/// NUL bytes are stripped, CRLF and lone CR become LF, and an LF
/// followed by a single space or tab is removed together with that
/// whitespace character, joining the logical line back together.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\0' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                } else {
                    result.push('\n');
                }
            }
            '\n' => {
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                } else {
                    result.push('\n');
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// A tokenized content line before parameter classification.
#[derive(Debug, Clone)]
pub struct RawLine {
    /// Property name, lower-cased.
    pub name: String,
    /// Parameter tokens after the name, still in raw form.
    pub param_tokens: Vec<String>,
    /// Raw value text after the colon.
    pub value: String,
}

/// Tokenizes one logical (already-unfolded) line.
///
/// Returns `None` when the line carries no unescaped colon; such lines
/// are skipped by the caller, never fatal.
#[must_use]
pub fn tokenize_line(line: &str) -> Option<RawLine> {
    let colon = find_unescaped(line, ':')?;

    let field = line[..colon].trim();
    let value = line[colon + 1..].trim();

    let mut tokens = split_unescaped(field, ';')
        .into_iter()
        .filter(|t| !t.is_empty());
    let name = tokens.next()?.to_ascii_lowercase();
    let param_tokens = tokens.map(str::to_string).collect();

    Some(RawLine {
        name,
        param_tokens,
        value: value.to_string(),
    })
}

/// Finds the byte offset of the first unescaped `delim`.
#[must_use]
pub fn find_unescaped(s: &str, delim: char) -> Option<usize> {
    let mut prev_backslash = false;

    for (i, c) in s.char_indices() {
        if c == '\\' {
            prev_backslash = true;
            continue;
        }
        if c == delim && !prev_backslash {
            return Some(i);
        }
        prev_backslash = false;
    }

    None
}

/// Splits on unescaped `delim`, keeping empty segments. The segments
/// are returned still escaped.
#[must_use]
pub fn split_unescaped(s: &str, delim: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_backslash = false;

    for (i, c) in s.char_indices() {
        if c == '\\' {
            prev_backslash = true;
            continue;
        }
        if c == delim && !prev_backslash {
            parts.push(&s[start..i]);
            start = i + delim.len_utf8();
        }
        prev_backslash = false;
    }

    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfold_crlf_continuation() {
        assert_eq!(unfold("ORG:Acme\r\n  Inc"), "ORG:Acme Inc");
    }

    #[test]
    fn unfold_bare_lf_and_tab() {
        assert_eq!(unfold("ORG:Acme\n\tInc"), "ORG:AcmeInc");
    }

    #[test]
    fn unfold_normalizes_cr() {
        assert_eq!(unfold("A\rB"), "A\nB");
    }

    #[test]
    fn unfold_strips_nul() {
        assert_eq!(unfold("A\0B"), "AB");
    }

    #[test]
    fn tokenize_simple() {
        let line = tokenize_line("FN:John Doe").unwrap();
        assert_eq!(line.name, "fn");
        assert!(line.param_tokens.is_empty());
        assert_eq!(line.value, "John Doe");
    }

    #[test]
    fn tokenize_with_params() {
        let line = tokenize_line("TEL;TYPE=HOME,CELL;PREF:555").unwrap();
        assert_eq!(line.name, "tel");
        assert_eq!(line.param_tokens, vec!["TYPE=HOME,CELL", "PREF"]);
        assert_eq!(line.value, "555");
    }

    #[test]
    fn tokenize_no_colon_is_skipped() {
        assert!(tokenize_line("garbage without separator").is_none());
    }

    #[test]
    fn tokenize_keeps_colon_in_value() {
        let line = tokenize_line("URL:https://example.com:8080/a").unwrap();
        assert_eq!(line.value, "https://example.com:8080/a");
    }

    #[test]
    fn escaped_delimiters_do_not_split() {
        let parts = split_unescaped(r"a\;b;c", ';');
        assert_eq!(parts, vec![r"a\;b", "c"]);
    }

    #[test]
    fn split_keeps_empty_segments() {
        let parts = split_unescaped("Smith;John;;;", ';');
        assert_eq!(parts, vec!["Smith", "John", "", "", ""]);
    }
}
