use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Dictionary '{path}' exists but could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "tokio")]
    #[error("Dictionary load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
