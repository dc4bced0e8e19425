//! Poster configuration.
//!
//! Handles loading, validating, and merging `superposter.toml`. Stock
//! defaults reproduce the classic 29×23 poster of 600px cells; a config file
//! only needs the keys it changes, and command-line flags override both.
//!
//! ## Config File Location
//!
//! `superposter.toml` in the directory given by `--dir` (default: current
//! directory), or any file passed with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! workingDirectory = "."        # Directory holding the tiles (relative to this file)
//! output = "superposter.png"    # Output filename, written into workingDirectory
//!
//! tileColumns = 29              # Tiles per row
//! tileRows = 23                 # Maximum number of rows
//!
//! cellWidth = 600               # Each tile is fitted into cellWidth x cellHeight
//! cellHeight = 600
//! cellOffsetX = 1               # Border around each tile, in pixels
//! cellOffsetY = 1
//!
//! compositor = "montage"        # "montage" (ImageMagick) or "native"
//! montageProgram = "montage"    # Executable used by the montage compositor
//! monitor = true                # Show compositor progress
//! background = "#ffffff"        # Canvas colour (native compositor only)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{CellGeometry, TileGrid, parse_hex_color};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "superposter.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Which compositor builds the poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompositorKind {
    /// ImageMagick `montage` subprocess.
    Montage,
    /// In-process, `image` crate.
    Native,
}

/// Poster configuration loaded from `superposter.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PosterConfig {
    /// Directory holding the tiles and receiving the poster.
    pub working_directory: PathBuf,
    /// Output filename (bare name, `.png`).
    pub output: String,
    pub tile_columns: u32,
    pub tile_rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub cell_offset_x: u32,
    pub cell_offset_y: u32,
    pub compositor: CompositorKind,
    pub montage_program: String,
    /// Show compositor progress on the console.
    pub monitor: bool,
    /// Canvas colour as `#rrggbb`. Used by the native compositor.
    pub background: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            working_directory: PathBuf::from("."),
            output: "superposter.png".to_string(),
            tile_columns: 29,
            tile_rows: 23,
            cell_width: 600,
            cell_height: 600,
            cell_offset_x: 1,
            cell_offset_y: 1,
            compositor: CompositorKind::Montage,
            montage_program: "montage".to_string(),
            monitor: true,
            background: "#ffffff".to_string(),
        }
    }
}

impl PosterConfig {
    pub fn grid(&self) -> TileGrid {
        TileGrid {
            columns: self.tile_columns,
            rows: self.tile_rows,
        }
    }

    pub fn geometry(&self) -> CellGeometry {
        CellGeometry {
            width: self.cell_width,
            height: self.cell_height,
            offset_x: self.cell_offset_x,
            offset_y: self.cell_offset_y,
        }
    }

    pub fn set_grid(&mut self, grid: TileGrid) {
        self.tile_columns = grid.columns;
        self.tile_rows = grid.rows;
    }

    pub fn set_geometry(&mut self, geometry: CellGeometry) {
        self.cell_width = geometry.width;
        self.cell_height = geometry.height;
        self.cell_offset_x = geometry.offset_x;
        self.cell_offset_y = geometry.offset_y;
    }

    /// Background as RGB. Only valid after [`validate`](Self::validate).
    pub fn background_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.background).unwrap_or([255, 255, 255])
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_columns == 0 || self.tile_rows == 0 {
            return Err(ConfigError::Validation(
                "tileColumns and tileRows must be non-zero".into(),
            ));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConfigError::Validation(
                "cellWidth and cellHeight must be non-zero".into(),
            ));
        }
        if !self.output.ends_with(naming::TILE_EXTENSION) {
            return Err(ConfigError::Validation(format!(
                "output '{}' must end in .png",
                self.output
            )));
        }
        let bare = Path::new(&self.output)
            .file_name()
            .is_some_and(|n| n == self.output.as_str());
        if !bare {
            return Err(ConfigError::Validation(format!(
                "output '{}' must be a bare filename",
                self.output
            )));
        }
        if naming::classify(&self.output).is_some() {
            return Err(ConfigError::Validation(format!(
                "output '{}' would be picked up as a poster tile",
                self.output
            )));
        }
        if self.montage_program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "montageProgram must not be empty".into(),
            ));
        }
        if parse_hex_color(&self.background).is_none() {
            return Err(ConfigError::Validation(format!(
                "background '{}' must be a #rrggbb colour",
                self.background
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PosterConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<PosterConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PosterConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `superposter.toml` from `dir`, falling back to stock defaults.
pub fn load_config(dir: &Path) -> Result<PosterConfig, ConfigError> {
    resolve_config(load_raw_config(&dir.join(CONFIG_FILENAME))?)
}

/// Load an explicitly named config file. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<PosterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Resolve `workingDirectory` against the directory the config came from.
pub fn resolve_working_directory(config: &PosterConfig, base: &Path) -> PathBuf {
    base.join(&config.working_directory)
}

/// Returns a fully-commented stock `superposter.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# superposter configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Directory holding the poster tiles, relative to this file.
workingDirectory = "."

# Output filename, written into workingDirectory and replaced on every run.
output = "superposter.png"

# ---------------------------------------------------------------------------
# Tile grid
# ---------------------------------------------------------------------------
# Tiles per row, and the maximum number of rows.
tileColumns = 29
tileRows = 23

# ---------------------------------------------------------------------------
# Cell geometry
# ---------------------------------------------------------------------------
# Each tile is fitted into cellWidth x cellHeight, keeping its aspect ratio.
cellWidth = 600
cellHeight = 600

# Border around each tile, in pixels, on both sides.
cellOffsetX = 1
cellOffsetY = 1

# ---------------------------------------------------------------------------
# Compositor
# ---------------------------------------------------------------------------
# "montage" runs ImageMagick; "native" composes in-process.
compositor = "montage"

# Executable used by the montage compositor.
montageProgram = "montage"

# Show compositor progress.
monitor = true

# Canvas colour (native compositor only).
background = "#ffffff"
"##
}
