//! Immutable row-major pixel grid

use super::error::{SearchError, SearchResult};
use super::sample::ColorSample;

/// A named `width` x `height` grid of color samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    name: String,
    width: u32,
    height: u32,
    samples: Vec<ColorSample>,
}

impl Raster {
    /// Build a raster from already unpacked samples in row-major order
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        samples: Vec<ColorSample>,
    ) -> SearchResult<Self> {
        let name = name.into();
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(SearchError::BufferSizeMismatch {
                name,
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            name,
            width,
            height,
            samples,
        })
    }

    /// Build a raster from packed `0xAARRGGBB` codes in row-major order
    pub fn from_argb(
        name: impl Into<String>,
        width: u32,
        height: u32,
        codes: &[u32],
    ) -> SearchResult<Self> {
        let samples = codes.iter().map(|&code| ColorSample::from_argb(code)).collect();
        Self::new(name, width, height, samples)
    }

    /// Raster where every pixel has the same color
    pub fn filled(name: impl Into<String>, width: u32, height: u32, color: ColorSample) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            samples: vec![color; width as usize * height as usize],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sample at column `x`, row `y`. No clamping or wraparound.
    pub fn get(&self, x: u32, y: u32) -> SearchResult<ColorSample> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.samples[self.index(x, y)])
    }

    /// All samples of row `y`, left to right
    pub fn row(&self, y: u32) -> SearchResult<&[ColorSample]> {
        if y >= self.height {
            return Err(self.out_of_bounds(0, y));
        }
        let start = self.index(0, y);
        Ok(&self.samples[start..start + self.width as usize])
    }

    /// Samples of row `y` in columns `[x, x + len)`
    pub fn row_span(&self, x: u32, y: u32, len: u32) -> SearchResult<&[ColorSample]> {
        let end = x as u64 + len as u64;
        if y >= self.height || end > self.width as u64 {
            return Err(self.out_of_bounds(x.saturating_add(len).saturating_sub(1), y));
        }
        let start = self.index(x, y);
        Ok(&self.samples[start..start + len as usize])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> SearchError {
        SearchError::OutOfBounds {
            name: self.name.clone(),
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}
