use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Convenient result type for `slotflash-lib`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("'{}' is not a valid directory!", .0.display())]
    NotADirectory(PathBuf),

    #[error("Aborting because of missing file '{0}'")]
    MissingImage(String),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn invalid_manifest(msg: impl Into<String>) -> Self {
        Self::InvalidManifest(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
