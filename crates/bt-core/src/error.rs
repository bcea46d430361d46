/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading or validating simulation inputs.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A template or environment file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input was not valid JSON or did not match the expected schema.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    /// A template parsed but failed validation.
    #[error("invalid template \"{kind}\": {reason}")]
    InvalidTemplate {
        /// The template's `type` field.
        kind: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Two templates share the same `type`.
    #[error("duplicate template type: \"{0}\"")]
    DuplicateTemplate(String),

    /// An environment document failed validation.
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
}
