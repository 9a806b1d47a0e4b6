use std::path::PathBuf;
use thiserror::Error;

pub type TyperResult<T> = Result<T, TyperError>;

#[derive(Error, Debug)]
pub enum TyperError {
    #[error("failed to read script `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("step {index} is invalid: {reason}")]
    InvalidStep { index: usize, reason: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("no tokio runtime is available to drive the typer")]
    NoRuntime,
}
