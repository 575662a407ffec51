use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FormatError;

/// Parses one tagged record out of an already-parsed JSON value.
///
/// The `class_name` tag is checked against the closed set first so an
/// unknown tag reports [`FormatError::UnknownClassName`] instead of an
/// opaque variant-mismatch message.
pub(crate) fn from_tagged_value<T: DeserializeOwned>(
    value: Value,
    class_names: &[&str],
) -> Result<T, FormatError> {
    if let Some(tag) = value.get("class_name").and_then(Value::as_str) {
        if !class_names.contains(&tag) {
            log::warn!("rejecting record with unknown class_name '{tag}'");
            return Err(FormatError::UnknownClassName {
                class_name: tag.to_owned(),
            });
        }
    }
    Ok(serde_json::from_value(value)?)
}

pub(crate) fn from_tagged_str<T: DeserializeOwned>(
    s: &str,
    class_names: &[&str],
) -> Result<T, FormatError> {
    from_tagged_value(serde_json::from_str(s)?, class_names)
}
