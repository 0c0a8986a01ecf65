//! Parameter classification.
//!
//! vCard 2.1 allowed bare parameter shorthand (`TEL;HOME;CELL:...`)
//! alongside the `KEY=VALUE` form vCard 3.0 standardized
//! (`TEL;TYPE=HOME,CELL:...`). The classifier resolves both through a
//! fixed lookup so the mappers only ever see kinded parameter values.

/// The kind a classified parameter token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// TYPE parameters (HOME, WORK, CELL, media types, mail systems...).
    Type,
    /// VALUE parameters (text, url, content-id...).
    Value,
    /// ENCODING parameters (quoted-printable, base64...).
    Encoding,
    /// LANGUAGE parameters.
    Language,
}

impl ParamKind {
    /// Resolves an explicit `KEY=` parameter key, case-insensitively.
    ///
    /// Unrecognized keys yield `None` and the parameter is discarded.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        if key.eq_ignore_ascii_case("value") {
            Some(Self::Value)
        } else if key.eq_ignore_ascii_case("type") {
            Some(Self::Type)
        } else if key.eq_ignore_ascii_case("encoding") {
            Some(Self::Encoding)
        } else if key.eq_ignore_ascii_case("language") {
            Some(Self::Language)
        } else {
            None
        }
    }
}

/// Resolves a bare parameter token to its kind via the historical
/// vCard 2.1/3.0 shorthand table. Unknown tokens yield `None`.
#[must_use]
pub fn classify_bare(token: &str) -> Option<ParamKind> {
    let lowered = token.to_ascii_lowercase();
    match lowered.as_str() {
        // Address and telephone types
        "dom" | "intl" | "postal" | "parcel" | "home" | "work" | "pref" | "voice" | "fax"
        | "msg" | "cell" | "pager" | "bbs" | "modem" | "car" | "isdn" | "video"
        // Mail systems
        | "aol" | "applelink" | "attmail" | "cis" | "eworld" | "internet" | "ibmmail"
        | "mcimail" | "powershare" | "prodigy" | "tlx" | "x400"
        // Media types
        | "gif" | "cgm" | "wmf" | "bmp" | "met" | "pmb" | "dib" | "pict" | "tiff" | "pdf"
        | "ps" | "jpeg" | "qtime" | "mpeg" | "mpeg2" | "avi" | "wave" | "aiff" | "pcm"
        // Keys
        | "x509" | "pgp" => Some(ParamKind::Type),

        "text" | "inline" | "url" | "cid" | "content-id" => Some(ParamKind::Value),

        "7bit" | "8bit" | "quoted-printable" | "base64" => Some(ParamKind::Encoding),

        _ => None,
    }
}

/// The classified parameters of one property, grouped by kind with the
/// original token spelling and order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    types: Vec<String>,
    values: Vec<String>,
    encodings: Vec<String>,
    languages: Vec<String>,
}

impl ParamSet {
    /// Adds a value under `kind`.
    pub fn add(&mut self, kind: ParamKind, value: impl Into<String>) {
        let bucket = match kind {
            ParamKind::Type => &mut self.types,
            ParamKind::Value => &mut self.values,
            ParamKind::Encoding => &mut self.encodings,
            ParamKind::Language => &mut self.languages,
        };
        bucket.push(value.into());
    }

    /// All `type` values in order of appearance.
    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// The first `type` value, if any.
    #[must_use]
    pub fn first_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    /// Whether a `type` value is present, case-insensitively.
    #[must_use]
    pub fn has_type(&self, value: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(value))
    }

    /// The first `encoding` value, if any.
    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.encodings.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_keys_case_insensitive() {
        assert_eq!(ParamKind::from_key("TYPE"), Some(ParamKind::Type));
        assert_eq!(ParamKind::from_key("encoding"), Some(ParamKind::Encoding));
        assert_eq!(ParamKind::from_key("Language"), Some(ParamKind::Language));
        assert_eq!(ParamKind::from_key("charset"), None);
    }

    #[test]
    fn bare_shorthand_lookup() {
        assert_eq!(classify_bare("HOME"), Some(ParamKind::Type));
        assert_eq!(classify_bare("base64"), Some(ParamKind::Encoding));
        assert_eq!(classify_bare("BASE64"), Some(ParamKind::Encoding));
        assert_eq!(classify_bare("inline"), Some(ParamKind::Value));
        assert_eq!(classify_bare("bogus"), None);
    }

    #[test]
    fn type_lookup_is_case_insensitive() {
        let mut params = ParamSet::default();
        params.add(ParamKind::Type, "Home");
        assert!(params.has_type("HOME"));
        assert!(params.has_type("home"));
        assert!(!params.has_type("WORK"));
    }

    #[test]
    fn first_type_preserves_order() {
        let mut params = ParamSet::default();
        params.add(ParamKind::Type, "WORK");
        params.add(ParamKind::Type, "PREF");
        assert_eq!(params.first_type(), Some("WORK"));
    }
}
