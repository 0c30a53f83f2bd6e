//! Approximate pattern search over RGB rasters
//!
//! This module provides the search core:
//! - Row fingerprints (per-channel sums) for cheap screening
//! - A sliding window with rolling updates along each row
//! - Tiered verification: fingerprint, top row pixels, remaining rows
//! - Explicit tolerances and overlap policy in [`SearchConfig`]

pub mod accumulator;
pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod raster;
pub mod report;
pub mod sample;


// Re-export main types and functions
pub use accumulator::ChannelAccumulator;
pub use config::{OverlapPolicy, SearchConfig, create_exact_config, create_lossy_config};
pub use engine::{ScanLimits, ScanStats, WindowSearchEngine};
pub use error::{SearchError, SearchResult};
pub use pattern::PatternIndex;
pub use raster::Raster;
pub use report::MatchReport;
pub use sample::ColorSample;
