//! JSON body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use skiff_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct NewPost { title: String }
///
/// let post = NewPost { title: "hello".to_string() };
/// let bytes = to_json(&post).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"title":"hello"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Remove null and empty-string members from a JSON object.
///
/// Non-object values are returned unchanged. Only the top-level mapping
/// is cleaned; nested objects keep their members.
#[must_use]
pub fn clean_json(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) => {
            map.retain(|_, member| match member {
                serde_json::Value::Null => false,
                serde_json::Value::String(s) => !s.is_empty(),
                _ => true,
            });
            serde_json::Value::Object(map)
        }
        other => other,
    }
}

/// Serialize a value to JSON bytes after cleaning the top-level mapping.
///
/// This is the body-formatting counterpart of the query serializer:
/// null and empty-string members are dropped before encoding.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_clean_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    let value = clean_json(serde_json::to_value(value)?);
    to_json(&value)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so a mismatch reports the exact path to
/// the offending member (e.g. `posts[2].title`). This is the runtime
/// schema check applied to response bodies.
///
/// # Errors
///
/// Returns [`crate::Error::SchemaValidation`] if the bytes do not match
/// the expected shape.
///
/// # Example
///
/// ```
/// use skiff_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Post { id: u64 }
///
/// let post: Post = from_json(br#"{"id":42}"#).expect("deserialize");
/// assert_eq!(post, Post { id: 42 });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::schema_validation(e.path().to_string(), e.inner().to_string())
    })
}
