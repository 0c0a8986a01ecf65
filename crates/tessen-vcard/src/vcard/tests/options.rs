//! Configuration to codec-option pass-through.

use tessen_core::config::CodecConfig;

use crate::vcard::{BodyShape, DecodeOptions, EncodeOptions};

fn codec_config() -> CodecConfig {
    CodecConfig {
        truncation_size: 512,
        always_override_file_as: true,
        prod_id: "-//custom//EN".to_string(),
        typed_note_body: false,
    }
}

#[test]
fn decode_options_carry_truncation_and_body_shape() {
    let cfg = codec_config();
    let opts = DecodeOptions::from(&cfg);
    assert_eq!(opts.truncation_size, 512);
    assert_eq!(opts.body_shape, BodyShape::Legacy);
}

#[test]
fn typed_note_body_selects_typed_shape() {
    let cfg = CodecConfig {
        typed_note_body: true,
        ..codec_config()
    };
    let opts = DecodeOptions::from(&cfg);
    assert_eq!(opts.body_shape, BodyShape::Typed);
}

#[test]
fn encode_options_carry_override_and_prod_id() {
    let cfg = codec_config();
    let opts = EncodeOptions::from(&cfg);
    assert!(opts.always_override_file_as);
    assert_eq!(opts.prod_id, "-//custom//EN");
    // Conversion keeps the default display-name builder.
    assert_eq!(
        (opts.build_file_as)("Smith", "John", "", ""),
        "Smith, John"
    );
}
