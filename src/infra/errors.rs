// src/infra/errors.rs — Error types for Lessonsmith

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LessonsmithError {
    // Input errors (reject before any persistence)
    #[error("Invalid feedback: {0}")]
    Validation(String),

    #[error("Lesson '{id}' not found")]
    LessonNotFound { id: String },

    // Infra
    #[error("Learning engine unavailable")]
    EngineUnavailable,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LessonsmithError {
    /// True when the caller sent something wrong, as opposed to the
    /// service failing internally.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LessonsmithError::Validation(_) | LessonsmithError::LessonNotFound { .. }
        )
    }
}
