//! Compositor trait and shared error type.
//!
//! The [`Compositor`] trait is the single seam between poster assembly and
//! pixel work: take an ordered list of tiles, a grid and a cell geometry,
//! produce one image.
//!
//! Two implementations ship:
//! - [`MontageCompositor`](super::montage_backend::MontageCompositor) shells
//!   out to ImageMagick `montage` (the default).
//! - [`NativeCompositor`](super::rust_backend::NativeCompositor) does the same
//!   layout in-process with the `image` crate.

use super::params::ComposeParams;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("'{program}' was not found on PATH; install ImageMagick or use --compositor native")]
    Unavailable { program: String },
    #[error("'{program}' exited with {status}{}", format_stderr(.stderr))]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Compositor reported success but {} was not written", .0.display())]
    MissingOutput(PathBuf),
    #[error("Failed to process {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("No input images to compose")]
    NoInputs,
    #[error("{images} images do not fit a grid of {capacity} tiles")]
    GridOverflow { images: usize, capacity: u64 },
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Something that can tile images into a grid poster.
pub trait Compositor {
    /// Short name for console output, e.g. `montage`.
    fn name(&self) -> &str;

    /// Compose `params.inputs` in order into `params.output`.
    ///
    /// Returns the path of the written image.
    fn compose(&self, params: &ComposeParams) -> Result<PathBuf, CompositorError>;
}

/// Checks shared by every compositor before any work starts.
pub(crate) fn validate_params(params: &ComposeParams) -> Result<(), CompositorError> {
    if params.inputs.is_empty() {
        return Err(CompositorError::NoInputs);
    }
    if params.grid.columns == 0 || params.grid.rows == 0 {
        return Err(CompositorError::InvalidLayout(format!(
            "tile grid {} has an empty dimension",
            params.grid
        )));
    }
    if params.geometry.width == 0 || params.geometry.height == 0 {
        return Err(CompositorError::InvalidLayout(format!(
            "cell geometry {} has an empty dimension",
            params.geometry
        )));
    }
    Ok(())
}
