use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WordNetError>;

#[derive(Error, Debug)]
pub enum WordNetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WordNet file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Malformed {file} at offset {offset}: {reason}")]
    Parse {
        file: String,
        offset: u64,
        reason: String,
    },

    #[error("Unknown part of speech: {0}")]
    UnknownPartOfSpeech(String),
}

impl WordNetError {
    pub(crate) fn parse(file: &str, offset: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            file: file.to_string(),
            offset,
            reason: reason.into(),
        }
    }
}
