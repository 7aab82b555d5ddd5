use thiserror::Error;

/// Errors raised by the peripheral surfaces of the core (configuration and
/// formation encoding). The rules state machine itself never fails; illegal
/// requests are rejected as no-ops.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Formation mismatch: expected {expected} players, found {found}")]
    FormationMismatch { expected: usize, found: usize },

    #[error("Formation not found: {name}")]
    FormationNotFound { name: String },
}

impl CoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Io(_) => true,
            CoreError::FormationMismatch { .. } => true,
            CoreError::FormationNotFound { .. } => true,
            CoreError::Json(_) => false,
            CoreError::InvalidConfig(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
