//! Per-channel running sums used as row fingerprints
//!
//! A fingerprint only keeps the aggregate of its members, so `add` and
//! `remove` must come in matching pairs. The member count lets `remove`
//! reject the obvious contract breaks instead of going silently negative.

use super::error::{SearchError, SearchResult};
use super::sample::ColorSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelAccumulator {
    r_sum: i64,
    g_sum: i64,
    b_sum: i64,
    members: u64,
}

impl ChannelAccumulator {
    /// Accumulator with all sums zero and no members
    pub const fn empty() -> Self {
        Self {
            r_sum: 0,
            g_sum: 0,
            b_sum: 0,
            members: 0,
        }
    }

    /// Fold `add` over every sample in order.
    pub fn from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a ColorSample>,
    {
        samples.into_iter().fold(Self::empty(), |mut acc, sample| {
            acc.add(sample);
            acc
        })
    }

    pub fn add(&mut self, sample: &ColorSample) {
        self.r_sum += i64::from(sample.r);
        self.g_sum += i64::from(sample.g);
        self.b_sum += i64::from(sample.b);
        self.members += 1;
    }

    /// Take a previously added sample back out.
    ///
    /// Fails with [`SearchError::AccumulatorUnderflow`] when there is nothing
    /// left to remove or a channel would drop below zero. The accumulator is
    /// left untouched on failure.
    pub fn remove(&mut self, sample: &ColorSample) -> SearchResult<()> {
        let r_sum = self.r_sum - i64::from(sample.r);
        let g_sum = self.g_sum - i64::from(sample.g);
        let b_sum = self.b_sum - i64::from(sample.b);

        if self.members == 0 || r_sum < 0 || g_sum < 0 || b_sum < 0 {
            return Err(SearchError::AccumulatorUnderflow);
        }

        self.r_sum = r_sum;
        self.g_sum = g_sum;
        self.b_sum = b_sum;
        self.members -= 1;
        Ok(())
    }

    /// Sum of absolute per-channel differences.
    pub fn distance(&self, other: &ChannelAccumulator) -> u64 {
        self.r_sum.abs_diff(other.r_sum)
            + self.g_sum.abs_diff(other.g_sum)
            + self.b_sum.abs_diff(other.b_sum)
    }

    pub fn sums(&self) -> (i64, i64, i64) {
        (self.r_sum, self.g_sum, self.b_sum)
    }

    pub fn members(&self) -> u64 {
        self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members == 0
    }
}

impl From<ColorSample> for ChannelAccumulator {
    fn from(sample: ColorSample) -> Self {
        let mut acc = Self::empty();
        acc.add(&sample);
        acc
    }
}
