use bt_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced by the simulation engine.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No template with the requested type is loaded. Non-fatal: nothing was spawned.
    #[error("template \"{0}\" not found")]
    TemplateNotFound(String),

    /// A step count was negative, fractional, or not a number.
    #[error("invalid step count \"{0}\": expected a non-negative integer")]
    InvalidStepCount(String),

    /// A template or environment failed to load.
    #[error(transparent)]
    Core(#[from] CoreError),
}
