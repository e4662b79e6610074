use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dictionary(#[from] npc_decipher::Error),

    #[error("Failed to read request from '{path}': {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read request from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}
