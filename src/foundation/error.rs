/// Convenience result type used across Lectern.
pub type LecternResult<T> = Result<T, LecternError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum LecternError {
    /// An algorithm declined to run against the current graph.
    ///
    /// This is an ordinary, user-facing outcome: the payload is the
    /// human-readable reason and no entity state has been touched.
    #[error("{0}")]
    Precondition(String),

    /// Invalid user-provided data or API misuse (bad graph description,
    /// wrong selection arity, preparing a timeline twice).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing graph descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LecternError {
    /// Build a [`LecternError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`LecternError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LecternError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` when this error is an algorithm precondition refusal.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
