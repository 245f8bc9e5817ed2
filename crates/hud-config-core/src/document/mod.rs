//! The persisted settings document and its JSON codec.

pub mod codec;
pub mod schema;

pub use codec::{
    decode_document, encode_document, extract_number, DecodedDocument, DocumentError, FieldError,
    FieldErrorKind, JsonNumber, NumberWidth,
};
pub use schema::{keys, SettingsDocument, CURRENT_SCHEMA_VERSION};
