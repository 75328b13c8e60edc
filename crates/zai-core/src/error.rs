use std::path::PathBuf;

/// Errors raised while reading or writing persisted preferences.
///
/// Controllers themselves never fail; this is the only fallible boundary in
/// the core crate.
#[derive(Debug, thiserror::Error)]
pub enum ZaiError {
    /// The platform has no notion of a per-user config directory.
    #[error("could not determine config directory")]
    NoConfigDir,

    /// Reading or writing the preferences file failed.
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preferences file exists but is not a JSON object of strings.
    #[error("invalid preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ZaiError>;
