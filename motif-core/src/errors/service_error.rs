//! Service-surface errors.

/// Errors returned by the validation service façade.
///
/// These cover caller-side failures (bad language tag, unreadable file,
/// code passed where a path was expected) and validators disabled at
/// startup. Findings inside a successfully dispatched validation are
/// reported as violations, never as `Err`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{validator} validator is unavailable: {reason}")]
    ValidatorUnavailable { validator: String, reason: String },

    #[error("Failed to read {path}: {message}")]
    FileRead { path: String, message: String },

    #[error("Expected a file path but received inline source: {hint}")]
    InputShapeMismatch { hint: String },

    #[error("Unknown language: {language}")]
    UnknownLanguage { language: String },
}
