use xlit_core::registry::MethodDescriptor;
use xlit_core::TransliterationError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum XlitError {
    #[error("unknown transliteration method: {id}")]
    UnknownMethod { id: String },
    #[error("input of {len} characters exceeds the maximum of {max}")]
    InputTooLarge { len: u64, max: u64 },
    #[error("invalid input: {msg}")]
    InvalidInput { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl From<TransliterationError> for XlitError {
    fn from(e: TransliterationError) -> Self {
        match e {
            TransliterationError::UnknownMethod(id) => XlitError::UnknownMethod { id },
            TransliterationError::InputTooLarge { len, max } => XlitError::InputTooLarge {
                len: len as u64,
                max: max as u64,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Records (value types, copied across FFI boundary)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct XlitMethod {
    pub id: String,
    pub display_name: String,
    pub language: String,
    pub language_code: String,
    pub source_script: String,
    pub target_script: String,
    pub supports_match_case: bool,
}

impl From<MethodDescriptor> for XlitMethod {
    fn from(d: MethodDescriptor) -> Self {
        Self {
            id: d.id,
            display_name: d.display_name,
            language: d.language,
            language_code: d.language_code,
            source_script: d.source_script,
            target_script: d.target_script,
            supports_match_case: d.supports_match_case,
        }
    }
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct XlitRequest {
    pub method_id: String,
    pub text: String,
    pub match_case: bool,
}

/// Input accepted by the validator, possibly sanitized.
#[derive(Debug, uniffi::Record)]
pub struct XlitValidatedInput {
    pub text: String,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Per-request outcome of a batch call.
#[derive(Debug, PartialEq, uniffi::Enum)]
pub enum XlitBatchResult {
    Ok { text: String },
    Failed { msg: String },
}
