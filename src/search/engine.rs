//! Sliding-window search for a pattern inside a source raster
//!
//! The engine keeps one fingerprint per pattern row for the source block under
//! the cursor. Moving right by one column is a rolling update (drop the column
//! leaving on the left, add the one entering on the right); moving to a new row
//! rebuilds the window from scratch.
//!
//! Each position goes through three tiers, cheapest first:
//! 1. screening: top row fingerprint vs window fingerprint
//! 2. top row deep verification, pixel by pixel
//! 3. confirmation of the remaining rows (fingerprint, then pixels)

use super::accumulator::ChannelAccumulator;
use super::config::{OverlapPolicy, SearchConfig};
use super::error::{SearchError, SearchResult};
use super::pattern::PatternIndex;
use super::raster::Raster;
use super::report::MatchReport;

/// Last valid top-left cursor position, both bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    pub x_threshold: u32,
    pub y_threshold: u32,
}

/// Counters describing how much work each tier did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    pub positions: u64,
    pub screened_in: u64,
    pub top_row_verified: u64,
    pub matches: u64,
}

pub struct WindowSearchEngine<'p> {
    source: Raster,
    pattern: &'p PatternIndex,
    config: SearchConfig,
    limits: Option<ScanLimits>,
    x: u32,
    y: u32,
    window: Vec<ChannelAccumulator>,
    exhausted: bool,
    stats: ScanStats,
}

impl<'p> WindowSearchEngine<'p> {
    /// Create an engine with the cursor at `(0, 0)`.
    ///
    /// A pattern wider or taller than the source is not an error: the engine
    /// starts out exhausted and never reports anything.
    pub fn new(
        pattern: &'p PatternIndex,
        source: Raster,
        config: SearchConfig,
    ) -> SearchResult<Self> {
        let limits = match (
            source.width().checked_sub(pattern.width()),
            source.height().checked_sub(pattern.height()),
        ) {
            (Some(x_threshold), Some(y_threshold)) => Some(ScanLimits {
                x_threshold,
                y_threshold,
            }),
            _ => None,
        };

        let mut engine = Self {
            source,
            pattern,
            config,
            limits,
            x: 0,
            y: 0,
            window: Vec::with_capacity(pattern.height() as usize),
            exhausted: true,
            stats: ScanStats::default(),
        };
        engine.reset()?;
        Ok(engine)
    }

    /// Move the cursor back to `(0, 0)` and rebuild the window
    pub fn reset(&mut self) -> SearchResult<()> {
        self.x = 0;
        self.y = 0;
        self.stats = ScanStats::default();
        self.window.clear();

        if self.limits.is_none() {
            log::debug!(
                "Pattern '{}' ({}x{}) does not fit in source '{}' ({}x{}), nothing to scan",
                self.pattern.name(),
                self.pattern.width(),
                self.pattern.height(),
                self.source.name(),
                self.source.width(),
                self.source.height()
            );
            self.exhausted = true;
            return Ok(());
        }

        self.exhausted = false;
        self.rebuild_window()
    }

    /// Fingerprints of the `width` x `height` block at `(x, y)`, computed from
    /// scratch. One accumulator per block row. A block reaching past the
    /// source, including past `u32::MAX`, is [`SearchError::OutOfBounds`].
    pub fn compute_window(
        source: &Raster,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> SearchResult<Vec<ChannelAccumulator>> {
        (0..height)
            .map(|i| {
                let row = y.checked_add(i).ok_or_else(|| SearchError::OutOfBounds {
                    name: source.name().to_string(),
                    x,
                    y: u32::MAX,
                    width: source.width(),
                    height: source.height(),
                })?;
                source
                    .row_span(x, row, width)
                    .map(|span| ChannelAccumulator::from_samples(span))
            })
            .collect()
    }

    /// Scan forward until the next confirmed match.
    ///
    /// Returns `Ok(None)` once every position has been examined; calling again
    /// after that keeps returning `Ok(None)`.
    pub fn next_match(&mut self) -> SearchResult<Option<MatchReport>> {
        while !self.exhausted {
            if self.matches_at_cursor()? {
                let report = self.report_at_cursor();
                self.stats.matches += 1;
                log::info!("✅ {}", report);
                self.skip_past_match()?;
                return Ok(Some(report));
            }
            self.advance()?;
        }
        Ok(None)
    }

    /// Drive the scan to exhaustion and collect every report in scan order
    pub fn scan_all(&mut self) -> SearchResult<Vec<MatchReport>> {
        let mut reports = Vec::new();
        while let Some(report) = self.next_match()? {
            reports.push(report);
        }
        Ok(reports)
    }

    /// Slide the window one column to the right.
    ///
    /// Only valid while the cursor is left of `x_threshold`; at the last
    /// column the caller has to wrap to the next row instead.
    pub fn roll_right(&mut self) -> SearchResult<()> {
        let x_threshold = self.limits.map(|limits| limits.x_threshold);
        match x_threshold {
            Some(threshold) if !self.exhausted && self.x < threshold => {}
            _ => {
                return Err(SearchError::WindowExhausted {
                    x: self.x,
                    x_threshold,
                });
            }
        }

        let (x, y) = (self.x, self.y);
        let entering = x + self.pattern.width();
        for (i, acc) in self.window.iter_mut().enumerate() {
            let row = y + i as u32;
            acc.remove(&self.source.get(x, row)?)?;
            acc.add(&self.source.get(entering, row)?);
        }
        self.x += 1;
        Ok(())
    }

    pub fn cursor(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn window(&self) -> &[ChannelAccumulator] {
        &self.window
    }

    pub fn scan_limits(&self) -> Option<ScanLimits> {
        self.limits
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn source(&self) -> &Raster {
        &self.source
    }

    pub fn pattern(&self) -> &PatternIndex {
        self.pattern
    }

    /// Give the source raster back, e.g. to scan it with another pattern
    pub fn into_source(self) -> Raster {
        self.source
    }

    fn rebuild_window(&mut self) -> SearchResult<()> {
        self.window = Self::compute_window(
            &self.source,
            self.x,
            self.y,
            self.pattern.width(),
            self.pattern.height(),
        )?;
        Ok(())
    }

    /// Move to the next position in scan order, wrapping rows as needed
    fn advance(&mut self) -> SearchResult<()> {
        let Some(limits) = self.limits else {
            self.exhausted = true;
            return Ok(());
        };

        if self.x < limits.x_threshold {
            self.roll_right()
        } else if self.y < limits.y_threshold {
            self.wrap_row()
        } else {
            self.finish();
            Ok(())
        }
    }

    fn wrap_row(&mut self) -> SearchResult<()> {
        self.y += 1;
        self.x = 0;
        log::trace!("Row wrap to y={} in '{}'", self.y, self.source.name());
        self.rebuild_window()
    }

    fn skip_past_match(&mut self) -> SearchResult<()> {
        if self.config.overlap == OverlapPolicy::ReportAll {
            return self.advance();
        }
        let Some(limits) = self.limits else {
            self.exhausted = true;
            return Ok(());
        };

        let target = u64::from(self.x) + u64::from(self.pattern.width());
        if target <= u64::from(limits.x_threshold) {
            // Every column in between overlaps the match, no point rolling through them
            self.x = target as u32;
            self.rebuild_window()
        } else if self.y < limits.y_threshold {
            self.wrap_row()
        } else {
            self.finish();
            Ok(())
        }
    }

    fn finish(&mut self) {
        self.exhausted = true;
        log::debug!(
            "Scan of '{}' for '{}' done: {} positions, {} screened in, \
             {} top rows verified, {} matches",
            self.source.name(),
            self.pattern.name(),
            self.stats.positions,
            self.stats.screened_in,
            self.stats.top_row_verified,
            self.stats.matches
        );
    }

    fn matches_at_cursor(&mut self) -> SearchResult<bool> {
        self.stats.positions += 1;

        if !self.screen_row(0)? {
            return Ok(false);
        }
        self.stats.screened_in += 1;

        if !self.verify_row(0)? {
            log::trace!("Top row rejected at ({},{})", self.x, self.y);
            return Ok(false);
        }
        self.stats.top_row_verified += 1;
        log::debug!(
            "Top row of '{}' verified at ({},{}) in '{}'",
            self.pattern.name(),
            self.x,
            self.y,
            self.source.name()
        );

        for row in 1..self.pattern.height() {
            if !self.screen_row(row)? || !self.verify_row(row)? {
                log::debug!(
                    "Confirmation failed on pattern row {} at ({},{})",
                    row,
                    self.x,
                    self.y
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fingerprint tier: pattern row vs window row
    fn screen_row(&self, row: u32) -> SearchResult<bool> {
        let expected = self.pattern.row_fingerprint(row)?;
        let actual = self
            .window
            .get(row as usize)
            .ok_or_else(|| SearchError::RowOutOfBounds {
                name: self.source.name().to_string(),
                row,
                height: self.window.len() as u32,
            })?;
        Ok(expected.distance(actual) <= self.config.screen_tolerance)
    }

    /// Pixel tier: every pixel of the pattern row within tolerance
    fn verify_row(&self, row: u32) -> SearchResult<bool> {
        let pattern_row = self.pattern.raster().row(row)?;
        let source_row = self
            .source
            .row_span(self.x, self.y + row, self.pattern.width())?;
        Ok(pattern_row
            .iter()
            .zip(source_row)
            .all(|(expected, actual)| expected.distance(actual) <= self.config.pixel_tolerance))
    }

    fn report_at_cursor(&self) -> MatchReport {
        MatchReport {
            pattern_name: self.pattern.name().to_string(),
            source_name: self.source.name().to_string(),
            width: self.pattern.width(),
            height: self.pattern.height(),
            x: self.x,
            y: self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ColorSample, create_exact_config};

    fn noise_raster(name: &str, width: u32, height: u32, seed: u32) -> Raster {
        // Small LCG so fixtures stay deterministic without a rand dependency
        let mut state = seed;
        let codes: Vec<u32> = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                state >> 8
            })
            .collect();
        Raster::from_argb(name, width, height, &codes).unwrap()
    }

    fn crop(source: &Raster, name: &str, x: u32, y: u32, width: u32, height: u32) -> Raster {
        let samples = (y..y + height)
            .flat_map(|row| source.row_span(x, row, width).unwrap().to_vec())
            .collect();
        Raster::new(name, width, height, samples).unwrap()
    }

    #[test]
    fn test_rolling_window_agrees_with_rebuild() {
        let source = noise_raster("source", 12, 6, 7);
        let pattern = PatternIndex::new(noise_raster("pattern", 4, 3, 99)).unwrap();
        let mut engine =
            WindowSearchEngine::new(&pattern, source.clone(), create_exact_config()).unwrap();

        for y in 0..=3 {
            if y > 0 {
                engine.wrap_row().unwrap();
            }
            loop {
                let (x, cy) = engine.cursor();
                assert_eq!(cy, y);
                let fresh = WindowSearchEngine::compute_window(&source, x, y, 4, 3).unwrap();
                for (rolled, rebuilt) in engine.window().iter().zip(&fresh) {
                    assert_eq!(rolled.distance(rebuilt), 0, "window mismatch at ({x},{y})");
                }
                if x == 8 {
                    break;
                }
                engine.roll_right().unwrap();
            }
        }
    }

    #[test]
    fn test_roll_past_threshold_fails() {
        let source = noise_raster("source", 5, 2, 1);
        let pattern = PatternIndex::new(noise_raster("pattern", 3, 2, 2)).unwrap();
        let mut engine = WindowSearchEngine::new(&pattern, source, create_exact_config()).unwrap();

        engine.roll_right().unwrap();
        engine.roll_right().unwrap();
        assert_eq!(engine.cursor(), (2, 0));
        assert_eq!(
            engine.roll_right(),
            Err(SearchError::WindowExhausted {
                x: 2,
                x_threshold: Some(2)
            })
        );
        assert_eq!(engine.cursor(), (2, 0), "Failed roll must not move the cursor");
    }

    #[test]
    fn test_degenerate_geometry_is_exhausted_immediately() {
        let pattern =
            PatternIndex::new(Raster::filled("wide", 6, 1, ColorSample::default())).unwrap();
        let source = Raster::filled("narrow", 5, 5, ColorSample::default());
        let mut engine = WindowSearchEngine::new(&pattern, source, create_exact_config()).unwrap();

        assert!(engine.is_exhausted());
        assert_eq!(engine.scan_limits(), None);
        assert_eq!(engine.next_match().unwrap(), None);
        assert!(matches!(
            engine.roll_right(),
            Err(SearchError::WindowExhausted { x_threshold: None, .. })
        ));
    }

    #[test]
    fn test_compute_window_past_u32_max_is_out_of_bounds() {
        let source = noise_raster("source", 4, 4, 6);
        let pattern = PatternIndex::new(noise_raster("pattern", 2, 2, 9)).unwrap();
        let engine = WindowSearchEngine::new(&pattern, source, create_exact_config()).unwrap();
        assert_eq!(engine.source().name(), "source");
        assert_eq!(engine.pattern().name(), "pattern");

        for y in [u32::MAX - 1, u32::MAX] {
            assert!(matches!(
                WindowSearchEngine::compute_window(engine.source(), 0, y, 2, 3),
                Err(SearchError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_finds_exact_crop() {
        let source = noise_raster("source", 20, 15, 42);
        let pattern = PatternIndex::new(crop(&source, "pattern", 11, 9, 5, 4)).unwrap();
        let mut engine = WindowSearchEngine::new(&pattern, source, create_exact_config()).unwrap();

        let reports = engine.scan_all().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!((reports[0].x, reports[0].y), (11, 9));
        assert_eq!(reports[0].geometry(), "5x4+11+9");
    }

    #[test]
    fn test_bottom_right_corner_is_scanned() {
        let source = noise_raster("source", 9, 7, 5);
        let pattern = PatternIndex::new(crop(&source, "corner", 6, 5, 3, 2)).unwrap();
        let mut engine = WindowSearchEngine::new(&pattern, source, create_exact_config()).unwrap();

        let report = engine.next_match().unwrap().expect("corner match");
        assert_eq!((report.x, report.y), (6, 5));
        assert_eq!(engine.next_match().unwrap(), None);
        assert!(engine.is_exhausted());
    }

    #[test]
    fn test_pattern_same_size_as_source() {
        let source = noise_raster("source", 4, 4, 3);
        let pattern = PatternIndex::new(source.clone()).unwrap();
        let mut engine = WindowSearchEngine::new(&pattern, source, create_exact_config()).unwrap();

        assert_eq!(
            engine.scan_limits(),
            Some(ScanLimits {
                x_threshold: 0,
                y_threshold: 0
            })
        );
        let reports = engine.scan_all().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].geometry(), "4x4+0+0");
        assert_eq!(engine.stats().positions, 1);
    }

    #[test]
    fn test_stats_count_tiers() {
        let source = noise_raster("source", 10, 10, 8);
        let pattern = PatternIndex::new(crop(&source, "pattern", 2, 3, 3, 3)).unwrap();
        let mut engine = WindowSearchEngine::new(&pattern, source, create_exact_config()).unwrap();
        engine.scan_all().unwrap();

        let stats = engine.stats();
        assert_eq!(stats.matches, 1);
        assert!(stats.screened_in >= stats.top_row_verified);
        assert!(stats.top_row_verified >= stats.matches);
        // 8x8 positions minus the 2 columns skipped after the match
        assert_eq!(stats.positions, 64 - 2);
    }

    #[test]
    fn test_reset_rescans_identically() {
        let source = noise_raster("source", 16, 16, 11);
        let pattern = PatternIndex::new(crop(&source, "pattern", 3, 12, 2, 2)).unwrap();
        let mut engine = WindowSearchEngine::new(&pattern, source, create_exact_config()).unwrap();

        let first = engine.scan_all().unwrap();
        engine.reset().unwrap();
        assert_eq!(engine.cursor(), (0, 0));
        let second = engine.scan_all().unwrap();
        assert_eq!(first, second);
    }
}
