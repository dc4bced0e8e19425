//! Shared test utilities for the superposter test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! touch_all(tmp.path(), &["BC0100_a.png", "0250_c.png"]);
//! write_png(&tmp.path().join("0001_x.png"), 40, 30, [255, 0, 0]);
//! ```

use image::{Rgb, RgbImage};
use std::path::Path;

/// Create empty files with the given names. Enough for listing tests.
pub fn touch_all(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"").unwrap();
    }
}

/// Write a solid-colour PNG of the given size.
pub fn write_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(rgb))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}
