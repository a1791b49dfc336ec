use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryError {
    /// Raised after a PANIC entry has been recorded.
    #[error("panic: {0}")]
    Panic(String),

    /// Raised after a FATAL entry has been recorded.
    #[error("fatal: {0}")]
    Fatal(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StoryError {
    /// Message carried by a recorded panic or fatal entry.
    pub fn recorded_message(&self) -> Option<&str> {
        match self {
            StoryError::Panic(msg) | StoryError::Fatal(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}
