//! Image file decoding for the search core
//!
//! The only place that touches the filesystem. Files are decoded with the
//! `image` crate and handed to the core as packed `0xAARRGGBB` codes.

pub mod error;

pub use error::{DecodeError, DecodeResult};

use crate::search::{PatternIndex, Raster, SearchResult};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// File extensions picked up when a directory is given
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Width, height and row-major packed color codes of a decoded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub codes: Vec<u32>,
}

impl DecodedImage {
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let codes = rgba
            .pixels()
            .map(|pixel| {
                let [r, g, b, a] = pixel.0;
                u32::from_be_bytes([a, r, g, b])
            })
            .collect();

        Self {
            width: rgba.width(),
            height: rgba.height(),
            codes,
        }
    }

    pub fn into_raster(self, name: impl Into<String>) -> SearchResult<Raster> {
        Raster::from_argb(name, self.width, self.height, &self.codes)
    }
}

/// Decode an image file into packed color codes
pub fn decode_argb(path: &Path) -> DecodeResult<DecodedImage> {
    let image = image::open(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Decoded {:?} ({}x{})", path, image.width(), image.height());
    Ok(DecodedImage::from_image(&image))
}

/// Decode an image file into a raster named after the file
pub fn load_raster(path: &Path) -> DecodeResult<Raster> {
    decode_argb(path)?
        .into_raster(display_name(path))
        .map_err(|source| DecodeError::Raster {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode an image file and build its row fingerprints
pub fn load_pattern(path: &Path) -> DecodeResult<PatternIndex> {
    PatternIndex::new(load_raster(path)?).map_err(|source| DecodeError::Raster {
        path: path.to_path_buf(),
        source,
    })
}

/// Expand a path into the image files it names.
///
/// A file is returned as is, whatever its extension. A directory yields its
/// regular files with an image extension, sorted by path.
pub fn collect_image_paths(path: &Path) -> DecodeResult<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let io_error = |source: std::io::Error| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(path).map_err(io_error)? {
        let entry_path = entry.map_err(io_error)?.path();
        if !entry_path.is_file() {
            continue;
        }
        if has_image_extension(&entry_path) {
            paths.push(entry_path);
        } else {
            log::warn!("⚠️ Skipping non-image file {:?}", entry_path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Name used in match reports: the file name, or the whole path as a fallback
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ColorSample;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_from_image_packs_argb() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0x12, 0x34, 0x56, 0xFF]));
        image.put_pixel(1, 0, Rgba([1, 2, 3, 0]));

        let decoded = DecodedImage::from_image(&DynamicImage::ImageRgba8(image));
        assert_eq!((decoded.width, decoded.height), (2, 1));
        assert_eq!(decoded.codes, vec![0xFF12_3456, 0x0001_0203]);

        let raster = decoded.into_raster("tiny").unwrap();
        assert_eq!(raster.get(1, 0).unwrap(), ColorSample::new(1, 2, 3));
    }

    #[test]
    fn test_load_raster_from_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checker.png");
        RgbImage::from_fn(3, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
        .save(&path)
        .unwrap();

        let raster = load_raster(&path).unwrap();
        assert_eq!(raster.name(), "checker.png");
        assert_eq!(raster.dimensions(), (3, 2));
        assert_eq!(raster.get(1, 0).unwrap(), ColorSample::new(0, 0, 0));
        assert_eq!(raster.get(2, 0).unwrap(), ColorSample::new(255, 255, 255));

        let pattern = load_pattern(&path).unwrap();
        assert_eq!(pattern.row_fingerprint(0).unwrap().sums(), (510, 510, 510));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = load_raster(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, DecodeError::Open { .. }));
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png at all").unwrap();

        assert!(matches!(load_raster(&path), Err(DecodeError::Open { .. })));
    }

    #[test]
    fn test_collect_image_paths_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.png", "a.JPG", "notes.txt", "c.bmp"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let paths = collect_image_paths(dir.path()).unwrap();
        let names: Vec<String> = paths.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.JPG", "b.png", "c.bmp"]);

        let single = collect_image_paths(&dir.path().join("notes.txt")).unwrap();
        assert_eq!(single, vec![dir.path().join("notes.txt")]);
    }
}
