//! Integration tests for the settings-document codec.
//!
//! These decode complete documents, the way they look on disk after a real
//! save, through the crate's public API.

use hud_config_core::{
    decode_document, encode_document, AnchorPoint, CoordsPair, DocumentError, OrdinalEnum,
    SettingsDocument,
};

const SAVED_DOCUMENT: &str = r#"{
  "backpackStyle": 1,
  "chromaEnabledSettingIds": [4],
  "chromaFadeWidth": 0.22580644,
  "chromaMode": 1,
  "chromaSpeed": 0.19354838,
  "disabledSettingIds": [2, 11],
  "discordAutoDefault": 0,
  "discordCustomStatuses": ["grinding", "afk"],
  "discordDetails": 1,
  "discordStatus": 10,
  "language": "fr_fr",
  "lastKnownMaxSettingId": 11,
  "perProfileLockedSlots": { "Mango": [9, 10, 36] },
  "perSettingAnchor": { "7": 4, "8": 0 },
  "perSettingBarSize": { "7": [9, 2] },
  "perSettingColor": { "4": 43520, "7": 16777045 },
  "perSettingCoordinates": { "7": [-71, -45], "8": [5, 5] },
  "perSettingScale": { "7": 0.5 },
  "powerOrbStyle": 1,
  "schemaVersion": 7,
  "textStyle": 0,
  "warningSeconds": 6
}"#;

#[test]
fn test_decode_saved_document_reads_every_field() {
    // Act
    let decoded = decode_document(SAVED_DOCUMENT.as_bytes()).expect("valid document");
    let doc = decoded.document;

    // Assert
    assert!(decoded.field_errors.is_empty(), "{:?}", decoded.field_errors);
    assert_eq!(doc.schema_version, Some(7));
    assert_eq!(doc.last_known_max_setting_id, Some(11));
    assert_eq!(doc.warning_seconds, Some(6));
    assert_eq!(doc.language.as_deref(), Some("fr_fr"));
    assert_eq!(doc.discord_status, Some(10));
    assert!(doc.disabled_setting_ids.expect("disabled").contains(&11));
    assert_eq!(
        doc.per_setting_coordinates.expect("coordinates")[&7],
        CoordsPair::new(-71, -45)
    );
    assert_eq!(
        doc.per_setting_anchor.expect("anchors")[&7],
        AnchorPoint::BottomMiddle.ordinal()
    );
    assert_eq!(doc.per_setting_bar_size.expect("sizes")[&7], CoordsPair::new(9, 2));
    assert_eq!(doc.per_setting_color.expect("colors")[&7], 0xFFFF55);
    assert_eq!(
        doc.discord_custom_statuses,
        Some(vec!["grinding".to_string(), "afk".to_string()])
    );
}

#[test]
fn test_reencoding_decoded_document_is_stable() {
    // Arrange
    let first = decode_document(SAVED_DOCUMENT.as_bytes())
        .expect("valid document")
        .document;

    // Act
    let bytes = encode_document(&first).expect("encode");
    let second = decode_document(&bytes).expect("re-decode").document;

    // Assert
    assert_eq!(first, second);
    assert_eq!(bytes, encode_document(&second).expect("encode again"));
}

#[test]
fn test_document_from_older_build_decodes_with_missing_fields() {
    // Arrange: a pre-versioning document with only a handful of keys
    let old = r#"{ "disabledSettingIds": [3], "warningSeconds": 4 }"#;

    // Act
    let doc = decode_document(old.as_bytes()).expect("valid").document;

    // Assert
    assert_eq!(doc.schema_version, None);
    assert_eq!(doc.last_known_max_setting_id, None);
    assert_eq!(doc.per_setting_coordinates, None);
    assert_eq!(
        doc,
        SettingsDocument {
            disabled_setting_ids: Some([3].into_iter().collect()),
            warning_seconds: Some(4),
            ..SettingsDocument::default()
        }
    );
}

#[test]
fn test_partially_corrupt_document_keeps_readable_fields() {
    // Arrange: a bad color entry and a scalar of the wrong type
    let doc = r#"{
        "perSettingColor": { "4": "green", "5": 255 },
        "chromaSpeed": [1],
        "textStyle": 1
    }"#;

    // Act
    let decoded = decode_document(doc.as_bytes()).expect("structurally valid");

    // Assert
    let colors = decoded.document.per_setting_color.expect("colors");
    assert_eq!(colors.len(), 1);
    assert_eq!(colors[&5], 255);
    assert_eq!(decoded.document.chroma_speed, None);
    assert_eq!(decoded.document.text_style, Some(1));
    let paths: Vec<&str> = decoded.field_errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["perSettingColor.4", "chromaSpeed"]);
}

#[test]
fn test_structural_failures_are_distinguished() {
    assert!(matches!(decode_document(b""), Err(DocumentError::Empty)));
    assert!(matches!(
        decode_document(b"{\"a\":"),
        Err(DocumentError::Malformed(_))
    ));
    assert!(matches!(
        decode_document(b"\"settings\""),
        Err(DocumentError::NotAnObject { found: "string" })
    ));
}
