//! Tolerant JSON codec for [`SettingsDocument`].
//!
//! Decoding happens in two stages:
//!
//! 1. **Structural** – the bytes must parse as a JSON object.  Anything else
//!    (empty file, truncated write, a bare array) is a [`DocumentError`] and
//!    the caller discards the whole document.
//! 2. **Per field** – each top-level key is decoded on its own.  A key with the
//!    wrong shape becomes a [`FieldError`] and is treated as absent; all other
//!    keys still decode.  Inside maps and sets a single bad entry is dropped
//!    on its own so the rest of the user's values survive.
//!
//! Numbers are extracted exactly through [`JsonNumber`]: an integer target
//! accepts `4` or `4.0` but rejects `4.5` and anything outside its range.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::warn;

use crate::document::schema::{keys, SettingsDocument};
use crate::domain::geometry::CoordsPair;
use crate::domain::setting::SettingId;

/// The document as a whole could not be read.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input contained no data (or only whitespace).
    #[error("settings document is empty")]
    Empty,

    /// The input is not well-formed JSON.
    #[error("settings document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The input is JSON but its root is not an object.
    #[error("settings document root must be an object, found {found}")]
    NotAnObject { found: &'static str },
}

/// One field (or one entry of a map/set field) could not be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to decode `{path}`: {kind}")]
pub struct FieldError {
    /// Dotted path of the failing value, e.g. `perSettingColor.12`.
    pub path: String,
    pub kind: FieldErrorKind,
}

/// Why a field failed to decode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldErrorKind {
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} is not an exact {width} value")]
    OutOfRange { value: String, width: NumberWidth },

    #[error("map key `{0}` is not a setting id")]
    InvalidKey(String),

    #[error("expected an [x, y] pair, found {len} element(s)")]
    ShortPair { len: usize },
}

/// Target width of a numeric extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberWidth {
    Byte,
    Short,
    Int,
    Long,
    UnsignedInt,
    Float,
    Double,
}

impl fmt::Display for NumberWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumberWidth::Byte => "byte",
            NumberWidth::Short => "short",
            NumberWidth::Int => "int",
            NumberWidth::Long => "long",
            NumberWidth::UnsignedInt => "unsigned int",
            NumberWidth::Float => "float",
            NumberWidth::Double => "double",
        };
        f.write_str(name)
    }
}

/// A primitive that can be extracted exactly from a JSON number.
pub trait JsonNumber: Copy {
    const WIDTH: NumberWidth;

    /// Returns `None` when `number` is not representable without loss of
    /// integral value or range.
    fn from_number(number: &Number) -> Option<Self>;
}

// 2^63; integral f64 values in [-2^63, 2^63) fit an i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

macro_rules! integer_json_number {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl JsonNumber for $ty {
                const WIDTH: NumberWidth = $width;

                fn from_number(number: &Number) -> Option<Self> {
                    if let Some(i) = number.as_i64() {
                        return <$ty>::try_from(i).ok();
                    }
                    if let Some(u) = number.as_u64() {
                        return <$ty>::try_from(u).ok();
                    }
                    let f = number.as_f64()?;
                    if !f.is_finite() || f.fract() != 0.0 || f < -I64_BOUND || f >= I64_BOUND {
                        return None;
                    }
                    <$ty>::try_from(f as i64).ok()
                }
            }
        )*
    };
}

integer_json_number! {
    i8 => NumberWidth::Byte,
    i16 => NumberWidth::Short,
    i32 => NumberWidth::Int,
    i64 => NumberWidth::Long,
    u32 => NumberWidth::UnsignedInt,
}

impl JsonNumber for f32 {
    const WIDTH: NumberWidth = NumberWidth::Float;

    fn from_number(number: &Number) -> Option<Self> {
        let f = number.as_f64()?;
        if f.is_finite() && f.abs() <= f64::from(f32::MAX) {
            Some(f as f32)
        } else {
            None
        }
    }
}

impl JsonNumber for f64 {
    const WIDTH: NumberWidth = NumberWidth::Double;

    fn from_number(number: &Number) -> Option<Self> {
        number.as_f64().filter(|f| f.is_finite())
    }
}

/// Extracts a number of type `N` from `value`.
///
/// # Errors
///
/// [`FieldErrorKind::WrongType`] when `value` is not a number,
/// [`FieldErrorKind::OutOfRange`] when it does not fit `N` exactly.
pub fn extract_number<N: JsonNumber>(value: &Value) -> Result<N, FieldErrorKind> {
    match value {
        Value::Number(number) => N::from_number(number).ok_or_else(|| FieldErrorKind::OutOfRange {
            value: number.to_string(),
            width: N::WIDTH,
        }),
        other => Err(FieldErrorKind::WrongType {
            expected: "number",
            found: value_kind(other),
        }),
    }
}

/// Result of a successful structural decode.
#[derive(Debug, Clone, Default)]
pub struct DecodedDocument {
    pub document: SettingsDocument,
    /// Fields and entries that were skipped, in document order.
    pub field_errors: Vec<FieldError>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decodes a settings document from raw file contents.
///
/// # Errors
///
/// Returns [`DocumentError`] only for structural failures.  Field-level
/// problems are reported in [`DecodedDocument::field_errors`].
pub fn decode_document(bytes: &[u8]) -> Result<DecodedDocument, DocumentError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DocumentError::Empty);
    }
    let root = match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => map,
        other => {
            return Err(DocumentError::NotAnObject {
                found: value_kind(&other),
            })
        }
    };

    let mut reader = FieldReader::new(&root);
    let document = SettingsDocument {
        schema_version: reader.number(keys::SCHEMA_VERSION),
        disabled_setting_ids: reader.id_set(keys::DISABLED_SETTING_IDS),
        per_setting_color: reader.id_map(keys::PER_SETTING_COLOR, extract_number::<u32>),
        per_setting_coordinates: reader.id_map(keys::PER_SETTING_COORDINATES, coords_pair),
        per_setting_bar_size: reader.id_map(keys::PER_SETTING_BAR_SIZE, coords_pair),
        per_setting_anchor: reader.id_map(keys::PER_SETTING_ANCHOR, extract_number::<u32>),
        per_setting_scale: reader.id_map(keys::PER_SETTING_SCALE, extract_number::<f32>),
        per_profile_locked_slots: reader.profile_sets(keys::PER_PROFILE_LOCKED_SLOTS),
        chroma_enabled_setting_ids: reader.id_set(keys::CHROMA_ENABLED_SETTING_IDS),
        warning_seconds: reader.number(keys::WARNING_SECONDS),
        chroma_speed: reader.number(keys::CHROMA_SPEED),
        chroma_fade_width: reader.number(keys::CHROMA_FADE_WIDTH),
        language: reader.string(keys::LANGUAGE),
        text_style: reader.number(keys::TEXT_STYLE),
        backpack_style: reader.number(keys::BACKPACK_STYLE),
        power_orb_style: reader.number(keys::POWER_ORB_STYLE),
        chroma_mode: reader.number(keys::CHROMA_MODE),
        discord_status: reader.number(keys::DISCORD_STATUS),
        discord_details: reader.number(keys::DISCORD_DETAILS),
        discord_auto_default: reader.number(keys::DISCORD_AUTO_DEFAULT),
        discord_custom_statuses: reader.string_list(keys::DISCORD_CUSTOM_STATUSES),
        last_known_max_setting_id: reader.number(keys::LAST_KNOWN_MAX_SETTING_ID),
    };

    Ok(DecodedDocument {
        document,
        field_errors: reader.errors,
    })
}

/// Serializes a document to pretty-printed JSON with a stable key order.
///
/// # Errors
///
/// Only fails if serde_json itself fails, which cannot happen for the types
/// in [`SettingsDocument`].
pub fn encode_document(document: &SettingsDocument) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(document)
}

// ── Field reader ──────────────────────────────────────────────────────────────

/// Walks the top-level object and collects failures instead of aborting.
struct FieldReader<'a> {
    root: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    fn new(root: &'a Map<String, Value>) -> Self {
        Self {
            root,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, path: String, kind: FieldErrorKind) {
        let error = FieldError { path, kind };
        warn!("{error}; using default");
        self.errors.push(error);
    }

    /// Present, non-null value for `key`.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.root.get(key).filter(|v| !v.is_null())
    }

    fn number<N: JsonNumber>(&mut self, key: &'static str) -> Option<N> {
        let value = self.get(key)?;
        match extract_number(value) {
            Ok(n) => Some(n),
            Err(kind) => {
                self.fail(key.to_string(), kind);
                None
            }
        }
    }

    fn string(&mut self, key: &'static str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.fail(key.to_string(), wrong_type("string", other));
                None
            }
        }
    }

    fn array(&mut self, key: &'static str) -> Option<&'a Vec<Value>> {
        match self.get(key)? {
            Value::Array(items) => Some(items),
            other => {
                self.fail(key.to_string(), wrong_type("array", other));
                None
            }
        }
    }

    fn object(&mut self, key: &'static str) -> Option<&'a Map<String, Value>> {
        match self.get(key)? {
            Value::Object(map) => Some(map),
            other => {
                self.fail(key.to_string(), wrong_type("object", other));
                None
            }
        }
    }

    fn id_set(&mut self, key: &'static str) -> Option<BTreeSet<SettingId>> {
        let items = self.array(key)?;
        let mut ids = BTreeSet::new();
        for (i, item) in items.iter().enumerate() {
            match extract_number::<u32>(item) {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(kind) => self.fail(format!("{key}[{i}]"), kind),
            }
        }
        Some(ids)
    }

    fn id_map<T>(
        &mut self,
        key: &'static str,
        entry: fn(&Value) -> Result<T, FieldErrorKind>,
    ) -> Option<BTreeMap<SettingId, T>> {
        let object = self.object(key)?;
        let mut map = BTreeMap::new();
        for (raw_id, value) in object {
            let Ok(id) = raw_id.trim().parse::<SettingId>() else {
                self.fail(
                    format!("{key}.{raw_id}"),
                    FieldErrorKind::InvalidKey(raw_id.clone()),
                );
                continue;
            };
            match entry(value) {
                Ok(decoded) => {
                    map.insert(id, decoded);
                }
                Err(kind) => self.fail(format!("{key}.{raw_id}"), kind),
            }
        }
        Some(map)
    }

    fn string_list(&mut self, key: &'static str) -> Option<Vec<String>> {
        let items = self.array(key)?;
        let mut strings = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => strings.push(s.clone()),
                other => self.fail(format!("{key}[{i}]"), wrong_type("string", other)),
            }
        }
        Some(strings)
    }

    fn profile_sets(&mut self, key: &'static str) -> Option<BTreeMap<String, BTreeSet<i32>>> {
        let object = self.object(key)?;
        let mut profiles = BTreeMap::new();
        for (profile, value) in object {
            let Value::Array(items) = value else {
                self.fail(format!("{key}.{profile}"), wrong_type("array", value));
                continue;
            };
            let mut slots = BTreeSet::new();
            for (i, item) in items.iter().enumerate() {
                match extract_number::<i32>(item) {
                    Ok(slot) => {
                        slots.insert(slot);
                    }
                    Err(kind) => self.fail(format!("{key}.{profile}[{i}]"), kind),
                }
            }
            profiles.insert(profile.clone(), slots);
        }
        Some(profiles)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn coords_pair(value: &Value) -> Result<CoordsPair, FieldErrorKind> {
    let Value::Array(items) = value else {
        return Err(wrong_type("array", value));
    };
    if items.len() < 2 {
        return Err(FieldErrorKind::ShortPair { len: items.len() });
    }
    Ok(CoordsPair::new(
        extract_number::<i32>(&items[0])?,
        extract_number::<i32>(&items[1])?,
    ))
}

fn wrong_type(expected: &'static str, found: &Value) -> FieldErrorKind {
    FieldErrorKind::WrongType {
        expected,
        found: value_kind(found),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_value(value: Value) -> DecodedDocument {
        let bytes = serde_json::to_vec(&value).expect("serialize fixture");
        decode_document(&bytes).expect("structurally valid")
    }

    // ── Structural failures ───────────────────────────────────────────────────

    #[test]
    fn test_decode_empty_bytes_is_structural_failure() {
        assert!(matches!(decode_document(b""), Err(DocumentError::Empty)));
        assert!(matches!(decode_document(b"  \n\t"), Err(DocumentError::Empty)));
    }

    #[test]
    fn test_decode_truncated_json_is_structural_failure() {
        let result = decode_document(br#"{"warningSeconds": 4, "language": "en_"#);
        assert!(matches!(result, Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn test_decode_non_object_root_is_structural_failure() {
        let result = decode_document(b"[1, 2, 3]");
        assert!(matches!(
            result,
            Err(DocumentError::NotAnObject { found: "array" })
        ));
        assert!(matches!(
            decode_document(b"null"),
            Err(DocumentError::NotAnObject { found: "null" })
        ));
    }

    // ── Per-field isolation ───────────────────────────────────────────────────

    #[test]
    fn test_decode_wrong_type_field_is_absent_and_others_survive() {
        // Arrange
        let decoded = decode_value(json!({
            "warningSeconds": "four",
            "chromaSpeed": 0.5,
            "language": "de_de",
        }));

        // Assert
        assert_eq!(decoded.document.warning_seconds, None);
        assert_eq!(decoded.document.chroma_speed, Some(0.5));
        assert_eq!(decoded.document.language.as_deref(), Some("de_de"));
        assert_eq!(decoded.field_errors.len(), 1);
        assert_eq!(decoded.field_errors[0].path, "warningSeconds");
        assert_eq!(
            decoded.field_errors[0].kind,
            FieldErrorKind::WrongType { expected: "number", found: "string" }
        );
    }

    #[test]
    fn test_decode_fractional_integer_is_field_failure() {
        let decoded = decode_value(json!({ "warningSeconds": 4.5, "textStyle": 1.0 }));

        assert_eq!(decoded.document.warning_seconds, None);
        assert_eq!(decoded.document.text_style, Some(1));
        assert!(matches!(
            decoded.field_errors[0].kind,
            FieldErrorKind::OutOfRange { width: NumberWidth::Int, .. }
        ));
    }

    #[test]
    fn test_decode_negative_ordinal_is_field_failure() {
        let decoded = decode_value(json!({ "chromaMode": -1 }));
        assert_eq!(decoded.document.chroma_mode, None);
        assert_eq!(decoded.field_errors.len(), 1);
    }

    #[test]
    fn test_decode_null_field_is_absent_without_error() {
        let decoded = decode_value(json!({ "language": null }));
        assert_eq!(decoded.document.language, None);
        assert!(decoded.field_errors.is_empty());
    }

    #[test]
    fn test_decode_bad_map_entry_is_dropped_and_rest_kept() {
        // Arrange
        let decoded = decode_value(json!({
            "perSettingCoordinates": {
                "3": [10, 20],
                "4": [1],
                "abc": [5, 5],
                "5": "nope",
                "6": [-7, 8, 99],
            }
        }));

        // Act
        let coords = decoded.document.per_setting_coordinates.expect("field present");

        // Assert
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[&3], CoordsPair::new(10, 20));
        assert_eq!(coords[&6], CoordsPair::new(-7, 8));
        assert_eq!(decoded.field_errors.len(), 3);
        assert!(decoded
            .field_errors
            .iter()
            .any(|e| e.kind == FieldErrorKind::InvalidKey("abc".to_string())));
        assert!(decoded
            .field_errors
            .iter()
            .any(|e| e.kind == FieldErrorKind::ShortPair { len: 1 }));
    }

    #[test]
    fn test_decode_wrong_container_type_drops_whole_field() {
        let decoded = decode_value(json!({
            "disabledSettingIds": { "1": true },
            "perSettingColor": [1, 2],
        }));
        assert_eq!(decoded.document.disabled_setting_ids, None);
        assert_eq!(decoded.document.per_setting_color, None);
        assert_eq!(decoded.field_errors.len(), 2);
    }

    #[test]
    fn test_decode_id_set_skips_bad_elements() {
        let decoded = decode_value(json!({ "disabledSettingIds": [1, "2", 3, -4, 3] }));
        let ids = decoded.document.disabled_setting_ids.expect("present");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(decoded.field_errors.len(), 2);
        assert_eq!(decoded.field_errors[0].path, "disabledSettingIds[1]");
    }

    #[test]
    fn test_decode_profile_sets_and_string_list() {
        let decoded = decode_value(json!({
            "perProfileLockedSlots": { "Apple": [9, 12], "Banana": "x" },
            "discordCustomStatuses": ["one", 2, "three"],
        }));

        let profiles = decoded.document.per_profile_locked_slots.expect("present");
        assert_eq!(profiles.len(), 1);
        assert!(profiles["Apple"].contains(&12));
        assert_eq!(
            decoded.document.discord_custom_statuses,
            Some(vec!["one".to_string(), "three".to_string()])
        );
        assert_eq!(decoded.field_errors.len(), 2);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let decoded = decode_value(json!({ "someFutureKey": {"a": 1}, "warningSeconds": 9 }));
        assert_eq!(decoded.document.warning_seconds, Some(9));
        assert!(decoded.field_errors.is_empty());
    }

    // ── Numeric extraction ────────────────────────────────────────────────────

    #[test]
    fn test_extract_number_respects_target_width() {
        assert_eq!(extract_number::<i8>(&json!(127)), Ok(127));
        assert!(matches!(
            extract_number::<i8>(&json!(128)),
            Err(FieldErrorKind::OutOfRange { width: NumberWidth::Byte, .. })
        ));
        assert_eq!(extract_number::<i16>(&json!(-32768)), Ok(-32768));
        assert!(extract_number::<i16>(&json!(40000)).is_err());
        assert_eq!(extract_number::<i64>(&json!(1u64 << 40)), Ok(1i64 << 40));
        assert!(extract_number::<i64>(&json!(u64::MAX)).is_err());
        assert_eq!(extract_number::<u32>(&json!(12.0)), Ok(12));
        assert!(extract_number::<u32>(&json!(-1)).is_err());
    }

    #[test]
    fn test_extract_float_widths() {
        assert_eq!(extract_number::<f32>(&json!(0.25)), Ok(0.25));
        assert_eq!(extract_number::<f32>(&json!(3)), Ok(3.0));
        assert!(extract_number::<f32>(&json!(1e300)).is_err());
        assert_eq!(extract_number::<f64>(&json!(1e300)), Ok(1e300));
    }

    // ── Encoding ──────────────────────────────────────────────────────────────

    #[test]
    fn test_encode_writes_pairs_as_arrays_and_skips_absent_fields() {
        // Arrange
        let mut coords = BTreeMap::new();
        coords.insert(3, CoordsPair::new(10, -20));
        let doc = SettingsDocument {
            schema_version: Some(7),
            per_setting_coordinates: Some(coords),
            ..SettingsDocument::default()
        };

        // Act
        let bytes = encode_document(&doc).expect("encode");
        let value: Value = serde_json::from_slice(&bytes).expect("valid json");

        // Assert
        assert_eq!(
            value,
            json!({ "schemaVersion": 7, "perSettingCoordinates": { "3": [10, -20] } })
        );
    }

    #[test]
    fn test_encoded_document_decodes_to_same_document() {
        let mut scales = BTreeMap::new();
        scales.insert(8, 0.19354838_f32);
        let doc = SettingsDocument {
            per_setting_scale: Some(scales),
            chroma_fade_width: Some(0.22580644),
            discord_custom_statuses: Some(vec!["afk".to_string()]),
            ..SettingsDocument::default()
        };

        let decoded = decode_document(&encode_document(&doc).expect("encode")).expect("decode");

        assert_eq!(decoded.document, doc);
        assert!(decoded.field_errors.is_empty());
    }
}
