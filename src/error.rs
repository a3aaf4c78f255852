pub type MorphstackResult<T> = Result<T, MorphstackError>;

#[derive(thiserror::Error, Debug)]
pub enum MorphstackError {
    /// A reconciliation contract was broken, e.g. the rendered route list
    /// ended up empty. Not recoverable.
    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphstackError {
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }
}
