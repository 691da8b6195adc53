use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = CombineError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CombineError {
    /// Missing root, empty selection or empty output path.
    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Path '{path}' is outside the root directory '{root}'")]
    OutOfRoot { path: PathBuf, root: PathBuf },

    #[error("Index {index} is out of range for a selection of {len} files")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Filesystem Error: Path '{path}', Error: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CombineError {
    pub(crate) fn fs(
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        CombineError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
