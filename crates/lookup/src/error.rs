use lexis_wordnet::WordNetError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Lexical database error: {0}")]
    Lexicon(#[from] WordNetError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formatted output requires the table renderer, which this build does not include")]
    RendererUnavailable,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
