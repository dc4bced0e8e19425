//! The poster assembly pipeline.
//!
//! Three strictly sequential steps, each finishing before the next starts:
//!
//! ```text
//! 1. Remove stale output   superposter.png  →  (gone)
//! 2. List tiles            working dir      →  OrderedFileList
//! 3. Compose               OrderedFileList  →  superposter.png
//! ```
//!
//! The stale poster is deleted before anything else so that a failed run
//! never leaves an old poster looking like a fresh one. Progress is reported
//! through [`AssembleEvent`]s; the caller decides how to display them (see
//! [`output::format_assemble_event`](crate::output::format_assemble_event)).

use crate::config::PosterConfig;
use crate::imaging::{CellGeometry, ComposeParams, Compositor, CompositorError, TileGrid};
use crate::scan::{self, OrderedFileList, ScanError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Could not remove stale output {}: {source}", .path.display())]
    StaleOutputRemovalFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("No BC*.png or [0-9]*.png files found in {}", .dir.display())]
    NoInputFiles { dir: PathBuf },
    #[error("Composition failed: {0}")]
    CompositionFailed(#[from] CompositorError),
}

/// Everything the pipeline needs besides the compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembleOptions {
    pub working_dir: PathBuf,
    pub output_name: String,
    pub grid: TileGrid,
    pub geometry: CellGeometry,
}

impl AssembleOptions {
    pub fn from_config(config: &PosterConfig, working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            output_name: config.output.clone(),
            grid: config.grid(),
            geometry: config.geometry(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.working_dir.join(&self.output_name)
    }
}

/// Progress reported while assembling.
#[derive(Debug, Clone, PartialEq)]
pub enum AssembleEvent {
    /// Step 1 done. `removed` is false when there was nothing to delete.
    StaleOutputRemoved { path: PathBuf, removed: bool },
    /// Step 2 done.
    Listed(OrderedFileList),
    /// Step 3 starting.
    Composing {
        compositor: String,
        tiles: usize,
        grid: TileGrid,
        geometry: CellGeometry,
    },
    /// Step 3 done.
    Composed { output: PathBuf },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembleReport {
    pub removed_stale: bool,
    pub files: OrderedFileList,
    pub output: PathBuf,
}

/// Delete `path` if it exists.
///
/// Returns whether a file was removed. After `Ok`, no file exists at `path`.
pub fn remove_stale_output(path: &Path) -> Result<bool, AssembleError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(AssembleError::StaleOutputRemovalFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Build the compose request for an ordered list.
pub fn compose_params(options: &AssembleOptions, files: &OrderedFileList) -> ComposeParams {
    ComposeParams {
        inputs: files.paths(&options.working_dir),
        grid: options.grid,
        geometry: options.geometry,
        output: options.output_path(),
    }
}

/// Run the full pipeline: remove stale output → list → compose.
pub fn assemble(
    options: &AssembleOptions,
    compositor: &dyn Compositor,
    mut on_event: impl FnMut(&AssembleEvent),
) -> Result<AssembleReport, AssembleError> {
    let output = options.output_path();

    let removed_stale = remove_stale_output(&output)?;
    if removed_stale {
        tracing::info!(path = %output.display(), "removed stale output");
    }
    on_event(&AssembleEvent::StaleOutputRemoved {
        path: output.clone(),
        removed: removed_stale,
    });

    let files = scan::scan(&options.working_dir)?;
    on_event(&AssembleEvent::Listed(files.clone()));
    if files.is_empty() {
        tracing::warn!(dir = %options.working_dir.display(), "no poster tiles found");
        return Err(AssembleError::NoInputFiles {
            dir: options.working_dir.clone(),
        });
    }

    // montage would split an overflowing list into numbered pages that the
    // next run's stale-output step never removes
    let capacity = options.grid.capacity();
    if files.len() as u64 > capacity {
        tracing::warn!(tiles = files.len(), grid = %options.grid, "tiles exceed grid");
        return Err(CompositorError::GridOverflow {
            images: files.len(),
            capacity,
        }
        .into());
    }

    let params = compose_params(options, &files);
    on_event(&AssembleEvent::Composing {
        compositor: compositor.name().to_string(),
        tiles: files.len(),
        grid: options.grid,
        geometry: options.geometry,
    });
    let written = compositor.compose(&params)?;
    on_event(&AssembleEvent::Composed {
        output: written.clone(),
    });

    Ok(AssembleReport {
        removed_stale,
        files,
        output: written,
    })
}
