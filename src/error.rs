use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    #[error("read failed: {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid {field} '{value}': {detail}")]
    Parse {
        field: String,
        value: String,
        detail: String,
    },

    #[error("hardware detection failed: {0}")]
    Detection(String),

    #[error("executable not found on PATH: {0}")]
    ToolNotFound(String),

    #[error("failed to run {program}: {source}")]
    Exec {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("unexpected output from {program}: {detail}")]
    Malformed { program: String, detail: String },

    #[error("profile serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("transport write failed: {0}")]
    Transport(std::io::Error),
}

impl Error {
    /// True for an expected-but-absent resource, as opposed to a failed read.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::ToolNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
