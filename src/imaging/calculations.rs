//! Pure layout math for the native compositor.
//!
//! All functions here are pure and testable without any I/O or images.
//! The layout mirrors `montage -tile CxR -geometry WxH+X+Y`: every tile is
//! `W + 2X` wide and `H + 2Y` tall, tiles fill rows left-to-right, and only
//! as many rows as needed are emitted.
//!
//! Sizes come straight from user config, so anything that can exceed `u32`
//! returns `None` instead of wrapping.

use super::params::{CellGeometry, TileGrid};

/// Outer size of one tile including its border on both sides.
pub fn tile_size(geometry: CellGeometry) -> Option<(u32, u32)> {
    let outer = |inner: u32, offset: u32| offset.checked_mul(2)?.checked_add(inner);
    Some((
        outer(geometry.width, geometry.offset_x)?,
        outer(geometry.height, geometry.offset_y)?,
    ))
}

/// Rows actually occupied by `count` tiles.
pub fn rows_used(count: usize, grid: TileGrid) -> u32 {
    let columns = grid.columns.max(1) as usize;
    count.div_ceil(columns) as u32
}

/// Canvas size for `count` tiles.
///
/// Width is always the full column count; height covers only used rows.
pub fn canvas_dimensions(
    count: usize,
    grid: TileGrid,
    geometry: CellGeometry,
) -> Option<(u32, u32)> {
    let (tile_w, tile_h) = tile_size(geometry)?;
    Some((
        grid.columns.checked_mul(tile_w)?,
        rows_used(count, grid).checked_mul(tile_h)?,
    ))
}

/// Bytes needed for an RGBA canvas, if addressable on this platform.
pub fn canvas_bytes((width, height): (u32, u32)) -> Option<usize> {
    let bytes = u64::from(width)
        .checked_mul(u64::from(height))?
        .checked_mul(4)?;
    usize::try_from(bytes).ok().filter(|&b| b <= isize::MAX as usize)
}

/// Top-left corner of the cell content area (inside the border) for the
/// tile at `index`.
pub fn cell_origin(index: usize, grid: TileGrid, geometry: CellGeometry) -> Option<(u32, u32)> {
    let (tile_w, tile_h) = tile_size(geometry)?;
    let columns = grid.columns.max(1) as usize;
    let col = u32::try_from(index % columns).ok()?;
    let row = u32::try_from(index / columns).ok()?;
    Some((
        col.checked_mul(tile_w)?.checked_add(geometry.offset_x)?,
        row.checked_mul(tile_h)?.checked_add(geometry.offset_y)?,
    ))
}

/// Scale `source` to fit inside `bounds`, preserving aspect ratio.
///
/// One dimension matches the bound exactly; the other is at most the bound.
/// Small sources are enlarged, the same as montage without a `>` flag.
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;
    if src_w == 0 || src_h == 0 {
        return (0, 0);
    }

    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;

    if scale_w <= scale_h {
        let h = (src_h as f64 * scale_w).round() as u32;
        (max_w, h.clamp(1, max_h))
    } else {
        let w = (src_w as f64 * scale_h).round() as u32;
        (w.clamp(1, max_w), max_h)
    }
}

/// Offset that centers an item of size `inner` within `outer`.
pub fn center_offset(inner: (u32, u32), outer: (u32, u32)) -> (u32, u32) {
    (
        outer.0.saturating_sub(inner.0) / 2,
        outer.1.saturating_sub(inner.1) / 2,
    )
}
