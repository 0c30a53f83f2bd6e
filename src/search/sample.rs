//! Single pixel color values

/// One pixel's red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSample {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xAARRGGBB` color code. Alpha is dropped.
    pub const fn from_argb(code: u32) -> Self {
        Self {
            r: ((code >> 16) & 0xFF) as u8,
            g: ((code >> 8) & 0xFF) as u8,
            b: (code & 0xFF) as u8,
        }
    }

    /// Pack back into an opaque `0xFFRRGGBB` code.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// L1 distance over the three channels.
    ///
    /// Same value as comparing two one-pixel accumulators, see
    /// [`ChannelAccumulator::distance`](super::ChannelAccumulator::distance).
    pub fn distance(&self, other: &ColorSample) -> u64 {
        u64::from(self.r.abs_diff(other.r))
            + u64::from(self.g.abs_diff(other.g))
            + u64::from(self.b.abs_diff(other.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_argb_ignores_alpha() {
        let opaque = ColorSample::from_argb(0xFF12_3456);
        let clear = ColorSample::from_argb(0x0012_3456);

        assert_eq!(opaque, ColorSample::new(0x12, 0x34, 0x56));
        assert_eq!(opaque, clear);
    }

    #[test]
    fn test_argb_round_trip_is_opaque() {
        let sample = ColorSample::new(200, 10, 99);
        assert_eq!(sample.to_argb(), 0xFFC8_0A63);
        assert_eq!(ColorSample::from_argb(sample.to_argb()), sample);
    }

    #[test]
    fn test_distance_is_symmetric_l1() {
        let a = ColorSample::new(10, 200, 30);
        let b = ColorSample::new(20, 180, 30);

        assert_eq!(a.distance(&b), 10 + 20);
        assert_eq!(b.distance(&a), 30);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_distance_extremes() {
        let black = ColorSample::new(0, 0, 0);
        let white = ColorSample::new(255, 255, 255);
        assert_eq!(black.distance(&white), 765);
    }
}
