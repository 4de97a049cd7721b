use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use fpraster_renderer::RenderError;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Reading or writing the JSON file at `path` failed.
    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON conversion not tied to a file.
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl IoError {
    /// Attach `path` to a serde_json failure, in either direction.
    pub(crate) fn json_at(path: &Path) -> impl FnOnce(serde_json::Error) -> IoError + '_ {
        move |source| IoError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
