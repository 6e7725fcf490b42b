use lexis_lookup::LookupError;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcomes of a run, classified once in `main`.
#[derive(Debug, Error)]
pub enum Failure {
    /// A capability this run needs is not present.
    #[error("{0}")]
    MissingDependency(String),

    #[error("Failed to fetch the WordNet corpus into {dir}")]
    CorpusFetch {
        dir: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("WordNet corpus not found in {dir} (missing {missing}) and fetching is disabled")]
    CorpusUnavailable { dir: PathBuf, missing: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    kind: &'a str,
}

impl Failure {
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::MissingDependency(_) => "missing_dependency",
            Failure::CorpusFetch { .. } => "corpus_fetch",
            Failure::CorpusUnavailable { .. } => "corpus_unavailable",
            Failure::Other(_) => "error",
        }
    }

    /// `-f` was requested from a build compiled without the table renderer.
    pub fn renderer_unavailable(err: &LookupError) -> Self {
        Failure::MissingDependency(format!(
            "{err}; install a lexis build with the `tables` feature enabled"
        ))
    }

    /// The message with every underlying cause appended.
    pub fn describe(&self) -> String {
        match self {
            Failure::CorpusFetch { source, .. } => format!("{self}: {source:#}"),
            Failure::Other(err) => format!("{err:#}"),
            _ => self.to_string(),
        }
    }

    /// Missing capabilities go to stdout as JSON in structured mode; everything else to stderr.
    pub fn report(&self, structured: bool) {
        if structured && matches!(self, Failure::MissingDependency(_)) {
            let body = ErrorBody {
                error: self.describe(),
                kind: self.kind(),
            };
            if let Ok(text) = serde_json::to_string(&body) {
                let mut stdout = io::stdout().lock();
                if writeln!(stdout, "{text}").and_then(|_| stdout.flush()).is_ok() {
                    return;
                }
            }
        }
        eprintln!("Error: {}", self.describe());
    }
}
