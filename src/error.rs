use thiserror::Error;

/// Failures producing a prompt, either from the word list or from validation.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("prompt is empty")]
    Empty,

    #[error("prompt contains untypeable character {0:?}")]
    Untypeable(char),

    #[error("word count must be positive")]
    NoWords,

    #[error("word list not found: {0}")]
    MissingWordList(String),

    #[error("word list is not valid UTF-8: {0}")]
    NotUtf8(String),

    #[error("failed to deserialize word list: {0}")]
    InvalidWordList(#[from] serde_json::Error),

    #[error("word list {0} has no words")]
    EmptyWordList(String),
}

#[derive(Error, Debug)]
pub enum DoomtypeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt provider failed: {0}")]
    Prompt(#[from] PromptError),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, DoomtypeError>;
