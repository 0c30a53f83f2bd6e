//! Run the search over every (pattern, source) pair of a batch

use crate::decode::{self, DecodeError};
use crate::search::{MatchReport, PatternIndex, SearchConfig, SearchError, WindowSearchEngine};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Search of '{source_name}' for '{pattern_name}' failed: {source}")]
    Search {
        pattern_name: String,
        source_name: String,
        source: SearchError,
    },
}

/// Totals for a finished batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub pairs: usize,
    pub matches: usize,
}

/// Search every source for every pattern, sequentially.
///
/// Each pattern is decoded and indexed once. Reports are handed to
/// `on_match` as soon as they are found. The first decode or search error
/// stops the batch.
pub fn run_batch<F>(
    patterns: &[PathBuf],
    sources: &[PathBuf],
    config: &SearchConfig,
    mut on_match: F,
) -> Result<BatchSummary, BatchError>
where
    F: FnMut(&MatchReport),
{
    let indexed = patterns
        .iter()
        .map(|path| decode::load_pattern(path))
        .collect::<Result<Vec<PatternIndex>, DecodeError>>()?;

    let mut summary = BatchSummary::default();
    for (i, source_path) in sources.iter().enumerate() {
        log::info!("🔍 Source {}/{}: {:?}", i + 1, sources.len(), source_path);
        let mut raster = decode::load_raster(source_path)?;

        for pattern in &indexed {
            let search_error = |source: SearchError| BatchError::Search {
                pattern_name: pattern.name().to_string(),
                source_name: decode::display_name(source_path),
                source,
            };

            let mut engine =
                WindowSearchEngine::new(pattern, raster, config.clone()).map_err(search_error)?;
            while let Some(report) = engine.next_match().map_err(search_error)? {
                summary.matches += 1;
                on_match(&report);
            }
            summary.pairs += 1;
            raster = engine.into_source();
        }
    }

    log::info!(
        "Batch finished: {} pairs searched, {} matches",
        summary.pairs,
        summary.matches
    );
    Ok(summary)
}
