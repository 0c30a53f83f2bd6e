use thiserror::Error;

/// A specialized `Result` type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Contract violations raised by the search core.
///
/// None of these describe bad input images. They mean a caller or the engine
/// itself broke an invariant, so they are propagated and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Pixel ({x},{y}) is outside raster '{name}' ({width}x{height})")]
    OutOfBounds {
        name: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Row {row} is outside the fingerprint table of '{name}' ({height} rows)")]
    RowOutOfBounds { name: String, row: u32, height: u32 },

    #[error("Cannot roll window past column {x} (last valid start column is {x_threshold:?})")]
    WindowExhausted { x: u32, x_threshold: Option<u32> },

    #[error("Accumulator underflow: removed a sample that was never added")]
    AccumulatorUnderflow,

    #[error("Raster '{name}' expects {expected} samples for {width}x{height}, got {actual}")]
    BufferSizeMismatch {
        name: String,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Pattern '{name}' has no pixels ({width}x{height})")]
    EmptyPattern { name: String, width: u32, height: u32 },
}
