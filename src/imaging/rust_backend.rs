//! Pure Rust compositor, no ImageMagick required.
//!
//! Reproduces the `montage -tile CxR -geometry WxH+X+Y` layout in-process:
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode tile | `image::ImageReader` |
//! | Fit into cell | `image::imageops::resize` with `Lanczos3`, aspect preserved |
//! | Place on canvas | `image::imageops::overlay`, centered in the cell |
//! | Encode | `image::RgbaImage::save_with_format` (PNG) |
//!
//! Unlike `montage`, a list longer than the grid is an error rather than a
//! set of numbered pages.

use super::backend::{Compositor, CompositorError, validate_params};
use super::calculations::{
    canvas_bytes, canvas_dimensions, cell_origin, center_offset, fit_within,
};
use super::params::ComposeParams;
use crate::output;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Parse a `#rrggbb` colour.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

pub struct NativeCompositor {
    background: [u8; 3],
    monitor: bool,
}

impl NativeCompositor {
    pub fn new(background: [u8; 3], monitor: bool) -> Self {
        Self {
            background,
            monitor,
        }
    }
}

impl Default for NativeCompositor {
    fn default() -> Self {
        Self::new([255, 255, 255], false)
    }
}

fn layout_overflow(params: &ComposeParams) -> CompositorError {
    CompositorError::InvalidLayout(format!(
        "a {} grid of {} cells does not fit in a single image",
        params.grid, params.geometry
    ))
}

fn load_tile(path: &Path) -> Result<DynamicImage, CompositorError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| CompositorError::Image {
            path: path.to_path_buf(),
            source,
        })
}

impl Compositor for NativeCompositor {
    fn name(&self) -> &str {
        "native"
    }

    fn compose(&self, params: &ComposeParams) -> Result<PathBuf, CompositorError> {
        validate_params(params)?;

        let count = params.inputs.len();
        let capacity = params.grid.capacity();
        if count as u64 > capacity {
            return Err(CompositorError::GridOverflow {
                images: count,
                capacity,
            });
        }

        let (canvas_w, canvas_h) = canvas_dimensions(count, params.grid, params.geometry)
            .filter(|&size| canvas_bytes(size).is_some())
            .ok_or_else(|| layout_overflow(params))?;
        let [r, g, b] = self.background;
        let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, Rgba([r, g, b, 255]));
        let cell = (params.geometry.width, params.geometry.height);

        tracing::debug!(
            tiles = count,
            width = canvas_w,
            height = canvas_h,
            "composing natively"
        );

        let mut stderr = std::io::stderr();
        for (index, path) in params.inputs.iter().enumerate() {
            let tile = load_tile(path)?;
            let fitted = fit_within((tile.width(), tile.height()), cell);
            let resized = image::imageops::resize(&tile, fitted.0, fitted.1, FilterType::Lanczos3);

            let (origin_x, origin_y) = cell_origin(index, params.grid, params.geometry)
                .ok_or_else(|| layout_overflow(params))?;
            let (dx, dy) = center_offset(fitted, cell);
            image::imageops::overlay(
                &mut canvas,
                &resized,
                i64::from(origin_x) + i64::from(dx),
                i64::from(origin_y) + i64::from(dy),
            );

            if self.monitor {
                write!(stderr, "\r{}", output::format_progress(index + 1, count))?;
                stderr.flush()?;
            }
        }
        if self.monitor {
            writeln!(stderr)?;
        }

        canvas
            .save_with_format(&params.output, ImageFormat::Png)
            .map_err(|source| CompositorError::Image {
                path: params.output.clone(),
                source,
            })?;

        Ok(params.output.clone())
    }
}
