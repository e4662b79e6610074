use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File '{path}' exists. Use --force to overwrite.")]
    FileExists { path: PathBuf },

    #[error("No wordlists (*.txt) found in '{dir}'")]
    NoWordlists { dir: PathBuf },

    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
