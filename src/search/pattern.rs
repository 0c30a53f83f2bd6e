//! Pattern raster with precomputed row fingerprints

use super::accumulator::ChannelAccumulator;
use super::error::{SearchError, SearchResult};
use super::raster::Raster;

/// The image being searched for, plus one full-width fingerprint per row.
///
/// Fingerprints are computed once in [`PatternIndex::new`] and never change,
/// so one index can be shared by any number of engines.
#[derive(Debug, Clone)]
pub struct PatternIndex {
    raster: Raster,
    fingerprints: Vec<ChannelAccumulator>,
}

impl PatternIndex {
    pub fn new(raster: Raster) -> SearchResult<Self> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(SearchError::EmptyPattern {
                name: raster.name().to_string(),
                width: raster.width(),
                height: raster.height(),
            });
        }

        let fingerprints = (0..raster.height())
            .map(|y| raster.row(y).map(|row| ChannelAccumulator::from_samples(row)))
            .collect::<SearchResult<Vec<_>>>()?;

        log::debug!(
            "Indexed pattern '{}' ({}x{}, {} row fingerprints)",
            raster.name(),
            raster.width(),
            raster.height(),
            fingerprints.len()
        );

        Ok(Self {
            raster,
            fingerprints,
        })
    }

    /// Fingerprint of pattern row `row`
    pub fn row_fingerprint(&self, row: u32) -> SearchResult<&ChannelAccumulator> {
        self.fingerprints
            .get(row as usize)
            .ok_or_else(|| SearchError::RowOutOfBounds {
                name: self.raster.name().to_string(),
                row,
                height: self.raster.height(),
            })
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn name(&self) -> &str {
        self.raster.name()
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}
