use crate::search::SearchError;
use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for image decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to decode image {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Decoded image {path:?} could not be indexed: {source}")]
    Raster { path: PathBuf, source: SearchError },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
