use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentlogError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("transcript file is empty: {path}")]
    EmptyTranscript { path: PathBuf },

    #[error("transcript file is not valid UTF-8: {path}")]
    NonUtf8Transcript { path: PathBuf },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record line in {path} at line {line}: {source}")]
    InvalidRecordLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AgentlogError>;
