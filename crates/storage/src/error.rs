/// Errors raised while persisting client-side state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory document could not be encoded.
    #[error("Storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
