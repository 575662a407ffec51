use std::fmt;

/// All errors that can occur when reading or writing format records.
#[derive(Debug)]
pub enum FormatError {
    /// The document's `class_name` tag is not part of the schema.
    UnknownClassName { class_name: String },
    /// The document does not match the declared field schema.
    Malformed(serde_json::Error),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClassName { class_name } => {
                write!(f, "unknown class_name: {class_name}")
            }
            Self::Malformed(e) => write!(f, "malformed record: {e}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(e) => Some(e),
            Self::UnknownClassName { .. } => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e)
    }
}
