use thiserror::Error;

/// Why a single wire field could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// Required key absent or explicitly null
    #[error("missing or null")]
    MissingField,

    /// Key present but holding the wrong JSON shape
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// String present but not a recognised date or date-time
    #[error("unparsable timestamp '{value}'")]
    UnparsableTimestamp { value: String },
}

impl DecodeErrorKind {
    /// Stable machine-readable code for the failure
    pub fn code(&self) -> &'static str {
        match self {
            DecodeErrorKind::MissingField => error_codes::MISSING_FIELD,
            DecodeErrorKind::TypeMismatch { .. } => error_codes::TYPE_MISMATCH,
            DecodeErrorKind::UnparsableTimestamp { .. } => error_codes::INVALID_TIMESTAMP,
        }
    }
}

/// A required or present wire field that failed to decode
///
/// `field` is the wire name, extended with a dotted or indexed path when the
/// failure happened inside an embedded record or array (`latest_reading.value`,
/// `results[2].id`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity}.{field}: {kind}")]
pub struct DecodeError {
    pub entity: &'static str,
    pub field: String,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(entity: &'static str, field: impl Into<String>, kind: DecodeErrorKind) -> Self {
        Self {
            entity,
            field: field.into(),
            kind,
        }
    }

    pub fn missing(entity: &'static str, field: impl Into<String>) -> Self {
        Self::new(entity, field, DecodeErrorKind::MissingField)
    }

    /// True for both halves of the "missing or invalid field" family
    pub fn is_missing_or_invalid(&self) -> bool {
        matches!(
            self.kind,
            DecodeErrorKind::MissingField | DecodeErrorKind::TypeMismatch { .. }
        )
    }
}

/// Errors from the text and value level entry points of a model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{entity} must be a JSON object, found {found}")]
    NotAnObject {
        entity: &'static str,
        found: &'static str,
    },

    #[error("{entity} list must be a JSON array, found {found}")]
    NotAnArray {
        entity: &'static str,
        found: &'static str,
    },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl ModelError {
    /// The underlying field failure, if any
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            ModelError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Error codes reported by [`DecodeErrorKind::code`]
pub mod error_codes {
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
    pub const INVALID_TIMESTAMP: &str = "INVALID_TIMESTAMP";
}
