pub mod args;
pub mod batch;
pub mod decode;
pub mod search;

pub use batch::{BatchSummary, run_batch};
pub use search::{MatchReport, PatternIndex, Raster, SearchConfig, WindowSearchEngine};
