//! Match report emitted by the engine

use std::fmt;

/// A confirmed occurrence of a pattern inside a source raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub pattern_name: String,
    pub source_name: String,
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl MatchReport {
    /// Geometry descriptor `{width}x{height}+{x}+{y}`
    pub fn geometry(&self) -> String {
        format!("{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matches {} at {}",
            self.pattern_name,
            self.source_name,
            self.geometry()
        )
    }
}
