//! Configuration for the window search

/// What the engine does with the cursor after confirming a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Jump forward by the pattern width so shifted copies of the same
    /// occurrence are not reported again
    #[default]
    SkipPatternWidth,
    /// Advance one column, reporting every overlapping position that verifies
    ReportAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Largest fingerprint distance (summed over a whole pattern row) that
    /// still passes screening
    pub screen_tolerance: u64,
    /// Largest per-pixel L1 distance accepted during deep verification
    pub pixel_tolerance: u64,
    /// Cursor behaviour after a reported match
    pub overlap: OverlapPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            screen_tolerance: 1000,
            pixel_tolerance: 220,
            overlap: OverlapPolicy::SkipPatternWidth,
        }
    }
}

impl SearchConfig {
    pub fn with_tolerances(screen_tolerance: u64, pixel_tolerance: u64) -> Self {
        Self {
            screen_tolerance,
            pixel_tolerance,
            ..Self::default()
        }
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}

/// Pixel-exact matching, for losslessly encoded sources
pub fn create_exact_config() -> SearchConfig {
    SearchConfig {
        screen_tolerance: 0,
        pixel_tolerance: 0,
        overlap: OverlapPolicy::SkipPatternWidth,
    }
}

/// Looser tolerances for heavily re-compressed (JPEG) sources
pub fn create_lossy_config() -> SearchConfig {
    SearchConfig {
        screen_tolerance: 2000,
        pixel_tolerance: 300,
        overlap: OverlapPolicy::SkipPatternWidth,
    }
}
