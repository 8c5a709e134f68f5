//! DevTools errors

/// DevTools error
#[derive(Debug, thiserror::Error)]
pub enum DevToolsError {
    /// The cross-context evaluation failed
    #[error("Bridge call failed: {0}")]
    Bridge(String),

    #[error("Inspected page context was destroyed")]
    ContextDestroyed,

    #[error("Content script injection failed: {0}")]
    Injection(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DevToolsError>;
