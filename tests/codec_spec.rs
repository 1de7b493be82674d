use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use savegame_codec::savegame::codec::{
    strategies_with_limit, Base64JsonStrategy, PlainJsonStrategy,
};
use savegame_codec::{
    FormatProbe, FormatTag, ParseResult, RawInput, RoundTripEncoder, SaveCategory, SaveError,
};
use serde_json::json;
use std::io::Write;

/// 16-byte RPGMV container header: the 5 signature bytes plus padding.
const RPGMV_HEADER: [u8; 16] = [
    0x52, 0x50, 0x47, 0x4D, 0x56, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

fn deflate(text: &str) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn probe_bytes(bytes: Vec<u8>, file_name: &str) -> ParseResult {
    FormatProbe::new()
        .probe(&RawInput::new(bytes, file_name))
        .unwrap_or_else(|e| panic!("probe of {} failed: {}", file_name, e))
}

fn probe_err(bytes: Vec<u8>, file_name: &str) -> SaveError {
    FormatProbe::new()
        .probe(&RawInput::new(bytes, file_name))
        .expect_err("probe should have failed")
}

#[test]
fn plain_json_text_decodes_and_reencodes_identically() {
    let parsed = probe_bytes(br#"{"gold":100}"#.to_vec(), "slot1.json");
    assert_eq!(parsed.format, FormatTag::PlainJson);
    assert_eq!(parsed.value, json!({"gold": 100}));

    let output = RoundTripEncoder::new()
        .encode(&parsed.value, parsed.format, "slot1.json")
        .unwrap();
    assert_eq!(output.bytes, br#"{"gold":100}"#);
    assert_eq!(output.mime_type, "application/json");
}

#[test]
fn base64_wrapped_json_decodes() {
    let bytes = BASE64.encode(r#"{"gold":100}"#).into_bytes();
    let parsed = probe_bytes(bytes, "slot1.sav");
    assert_eq!(parsed.format, FormatTag::Base64Json);
    assert_eq!(parsed.value, json!({"gold": 100}));
}

#[test]
fn base64_decode_ignores_embedded_whitespace() {
    let mut text = BASE64.encode(r#"{"gold":100}"#);
    text.insert(4, '\n');
    text.push('\n');
    let parsed = probe_bytes(text.into_bytes(), "slot1.sav");
    assert_eq!(parsed.format, FormatTag::Base64Json);
    assert_eq!(parsed.value, json!({"gold": 100}));
}

#[test]
fn base64_wrapped_zlib_json_decodes() {
    let bytes = BASE64.encode(deflate(r#"{"gold":100}"#)).into_bytes();
    let parsed = probe_bytes(bytes, "slot1.rpgsave");
    assert_eq!(parsed.format, FormatTag::Base64ZlibJson);
    assert_eq!(parsed.value, json!({"gold": 100}));
}

#[test]
fn bare_zlib_json_decodes() {
    let parsed = probe_bytes(deflate(r#"{"gold":100}"#), "world.rvdata2");
    assert_eq!(parsed.format, FormatTag::ZlibJson);
    assert_eq!(parsed.value, json!({"gold": 100}));
}

#[test]
fn lz_base64_compressed_json_decodes() {
    let bytes = lz_str::compress_to_base64(r#"{"gold":100}"#).into_bytes();
    let parsed = probe_bytes(bytes, "file1.rpgsave");
    assert_eq!(parsed.format, FormatTag::LzBase64Json);
    assert_eq!(parsed.value, json!({"gold": 100}));
}

#[test]
fn lz_raw_compressed_json_decodes() {
    let text = String::from_utf16(&lz_str::compress(r#"{"gold":100}"#))
        .expect("fixture payload compresses to valid UTF-16");
    let parsed = probe_bytes(text.into_bytes(), "quick.sol");
    assert_eq!(parsed.format, FormatTag::LzRawJson);
    assert_eq!(parsed.value, json!({"gold": 100}));
}

#[test]
fn messagepack_save_decodes() {
    let bytes = rmp_serde::to_vec(&json!({"hp": 80, "mp": 20})).unwrap();
    let parsed = probe_bytes(bytes, "slot0.sav");
    assert_eq!(parsed.format, FormatTag::MessagePack);
    assert_eq!(parsed.value, json!({"hp": 80, "mp": 20}));
}

#[test]
fn rpgmv_header_is_stripped_before_inflate() {
    let mut bytes = RPGMV_HEADER.to_vec();
    bytes.extend_from_slice(&deflate(r#"{"level":5}"#));
    let parsed = probe_bytes(bytes, "file1.rpgsave");
    assert_eq!(parsed.format, FormatTag::ZlibJson);
    assert_eq!(parsed.value, json!({"level": 5}));

    // The header is a detection aid only: never re-added on encode.
    let output = RoundTripEncoder::new()
        .encode(&parsed.value, parsed.format, "file1.rpgsave")
        .unwrap();
    assert!(!output.bytes.starts_with(b"RPGMV"));
    assert_eq!(output.suggested_file_name, "file1_edited.rpgsave");

    let reparsed = probe_bytes(output.bytes, "file1_edited.rpgsave");
    assert_eq!(reparsed.format, FormatTag::ZlibJson);
    assert_eq!(reparsed.value, json!({"level": 5}));
}

#[test]
fn signature_only_buffer_is_unrecognized() {
    // Exactly 16 bytes: no payload remains after the header, so nothing
    // can inflate.
    let err = probe_err(RPGMV_HEADER.to_vec(), "empty.rpgsave");
    assert!(matches!(err, SaveError::UnrecognizedFormat));
}

#[test]
fn rpgmv_header_with_garbage_payload_is_unrecognized() {
    let mut bytes = RPGMV_HEADER.to_vec();
    bytes.extend_from_slice(&[0x00, 0x01, 0x02, 0x03]);
    let err = probe_err(bytes, "broken.rpgsave");
    assert!(matches!(err, SaveError::UnrecognizedFormat));
}

#[test]
fn unsupported_bytes_fail_with_unrecognized_format() {
    let err = probe_err(vec![0xFF, 0xFE, 0x00, 0x01, 0x80, 0x7F], "mystery.bin");
    assert!(matches!(err, SaveError::UnrecognizedFormat));
}

#[test]
fn empty_input_is_unrecognized() {
    let err = probe_err(Vec::new(), "empty.sav");
    assert!(matches!(err, SaveError::UnrecognizedFormat));
}

#[test]
fn scalar_json_text_is_not_a_recognized_save() {
    for text in ["42", "\"hello\"", "true", "null"] {
        let err = probe_err(text.as_bytes().to_vec(), "scalar.json");
        assert!(
            matches!(err, SaveError::UnrecognizedFormat),
            "{:?} should not decode",
            text
        );
    }
}

#[test]
fn every_format_round_trips_semantically() {
    let value = json!({"gold": 2500, "name": "Alex"});
    let encoder = RoundTripEncoder::new();
    let probe = FormatProbe::new();

    for tag in FormatTag::ALL {
        let output = encoder
            .encode(&value, tag, "slot1.rpgsave")
            .unwrap_or_else(|e| panic!("encode as {} failed: {}", tag, e));
        let parsed = probe
            .probe(&RawInput::new(output.bytes, "slot1.rpgsave"))
            .unwrap_or_else(|e| panic!("re-probe of {} output failed: {}", tag, e));
        assert_eq!(parsed.value, value, "value drifted through {}", tag);
        assert_eq!(
            parsed.format, tag,
            "{} output resolved to a different strategy",
            tag
        );
    }
}

#[test]
fn probing_identical_bytes_is_deterministic() {
    let bytes = BASE64.encode(r#"{"gold":100}"#).into_bytes();
    let probe = FormatProbe::new();
    let first = probe.probe(&RawInput::new(bytes.clone(), "a.sav")).unwrap();
    let second = probe.probe(&RawInput::new(bytes, "a.sav")).unwrap();
    assert_eq!(first.format, second.format);
    assert_eq!(first.value, second.value);
}

#[test]
fn strategies_reject_inputs_for_other_formats() {
    // The fixed probing order only stays deterministic because an earlier
    // strategy genuinely rejects a later format's output.
    let value = json!({"gold": 100});
    let encoder = RoundTripEncoder::new();

    let plain_bytes = encoder
        .encode(&value, FormatTag::PlainJson, "a.json")
        .unwrap()
        .bytes;
    let base64_bytes = encoder
        .encode(&value, FormatTag::Base64Json, "a.sav")
        .unwrap()
        .bytes;

    let base64_only = FormatProbe::with_strategies(vec![Box::new(Base64JsonStrategy)]);
    assert!(base64_only
        .probe(&RawInput::new(plain_bytes, "a.json"))
        .is_err());

    let plain_only = FormatProbe::with_strategies(vec![Box::new(PlainJsonStrategy)]);
    assert!(plain_only
        .probe(&RawInput::new(base64_bytes, "a.sav"))
        .is_err());
}

type ExtensionCase = (FormatTag, &'static str, &'static str, &'static str);

/// (format, original name, expected suggestion, expected MIME) per the
/// container policy table.
const EXTENSION_CASES: &[ExtensionCase] = &[
    (FormatTag::PlainJson, "slot1.rpgsave", "slot1_edited.json", "application/json"),
    (FormatTag::Base64Json, "slot1.rpgsave", "slot1_edited.json", "text/plain"),
    (FormatTag::Base64ZlibJson, "slot1.rpgsave", "slot1_edited.rpgsave", "text/plain"),
    (FormatTag::Base64ZlibJson, "notes.txt", "notes_edited.json", "text/plain"),
    (FormatTag::ZlibJson, "world.rvdata2", "world_edited.rvdata2", "application/octet-stream"),
    (FormatTag::ZlibJson, "blob.bin", "blob_edited.json", "application/octet-stream"),
    (FormatTag::LzBase64Json, "file1.rpgsave", "file1_edited.rpgsave", "text/plain"),
    (FormatTag::LzBase64Json, "scene.dat", "scene_edited.json", "text/plain"),
    (FormatTag::LzRawJson, "global.sol", "global_edited.sol", "text/plain"),
    (FormatTag::MessagePack, "profile.dat", "profile_edited.dat", "application/octet-stream"),
];

#[test]
fn extension_policy_follows_the_container_table() {
    let encoder = RoundTripEncoder::new();
    let value = json!({"gold": 100});
    for (tag, original, expected_name, expected_mime) in EXTENSION_CASES {
        let output = encoder
            .encode(&value, *tag, original)
            .unwrap_or_else(|e| panic!("encode as {} failed: {}", tag, e));
        assert_eq!(
            output.suggested_file_name, *expected_name,
            "file name for {} from {}",
            tag, original
        );
        assert_eq!(
            output.mime_type, *expected_mime,
            "MIME type for {} from {}",
            tag, original
        );
    }
}

const CATEGORY_CASES: &[(&str, SaveCategory)] = &[
    ("slot1.rpgsave", SaveCategory::Rpg),
    ("World.RVDATA2", SaveCategory::Rpg),
    ("save01.lsd", SaveCategory::Rpg),
    ("data.sav", SaveCategory::Rpg),
    ("global.sol", SaveCategory::VisualNovel),
    ("scene.dat", SaveCategory::VisualNovel),
    ("readme.txt", SaveCategory::Unknown),
    ("no_extension", SaveCategory::Unknown),
];

#[test]
fn classifier_maps_extensions_to_categories() {
    for (file_name, expected) in CATEGORY_CASES {
        assert_eq!(
            SaveCategory::from_file_name(file_name),
            *expected,
            "category of {}",
            file_name
        );
    }
}

#[test]
fn format_tags_persist_as_opaque_strings() {
    for tag in FormatTag::ALL {
        let recovered: FormatTag = tag.as_str().parse().unwrap();
        assert_eq!(recovered, tag);
    }
    assert!(matches!(
        "mystery-format".parse::<FormatTag>(),
        Err(SaveError::UnknownTag(_))
    ));
}

#[test]
fn encoding_without_a_registered_strategy_fails() {
    let encoder = RoundTripEncoder::with_strategies(Vec::new());
    let err = encoder
        .encode(&json!({}), FormatTag::PlainJson, "a.json")
        .expect_err("empty strategy set cannot encode");
    assert!(matches!(err, SaveError::EncodeFailure { .. }));
}

#[test]
fn oversized_decompressed_payloads_are_rejected() {
    let padded = format!(r#"{{"pad":"{}"}}"#, "x".repeat(1024));
    let bytes = deflate(&padded);
    let probe = FormatProbe::with_strategies(strategies_with_limit(16));
    let err = probe
        .probe(&RawInput::new(bytes, "bomb.rpgsave"))
        .expect_err("payload over the cap should be rejected");
    assert!(matches!(err, SaveError::UnrecognizedFormat));
}
