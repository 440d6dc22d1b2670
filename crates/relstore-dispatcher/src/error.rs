use thiserror::Error;

/// Dispatcher-level errors. Domain errors pass through untouched (and keep
/// their `error_code()`); the one error this layer adds of its own is an
/// output mode the caller didn't ask for in a recognized spelling.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Domain(#[from] relstore_core::Error),

    #[error("unknown output mode: {0}")]
    UnknownOutputMode(String),
}

pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

impl DispatchError {
    pub fn error_code(&self) -> &'static str {
        match self {
            DispatchError::Domain(e) => e.error_code(),
            DispatchError::UnknownOutputMode(_) => "unknown_output_mode",
        }
    }
}
