pub type LaureaResult<T> = Result<T, LaureaError>;

#[derive(thiserror::Error, Debug)]
pub enum LaureaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("export error: {0}")]
    Export(String),

    /// A newer render generation started before this one finished loading
    /// its assets; the stale result was discarded.
    #[error("render superseded by a newer generation")]
    Superseded,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaureaError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}
