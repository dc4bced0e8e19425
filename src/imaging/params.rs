//! Parameter types for the compose operation.
//!
//! These structs describe *what* poster to build, not *how*. They are the
//! interface between the [`assemble`](crate::assemble) pipeline (which decides
//! which tiles go in and in what order) and a [`Compositor`](super::Compositor)
//! (which does the pixel work). Swapping the compositor never touches ordering.
//!
//! ## Types
//!
//! - [`TileGrid`]: columns × rows, rendered as `29x23`.
//! - [`CellGeometry`]: per-tile size plus border offset, rendered as `600x600+1+1`.
//! - [`ComposeParams`]: ordered input paths, grid, geometry, output path.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Error from parsing a `CxR` or `WxH+X+Y` directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what} '{input}': expected {expected}")]
pub struct DirectiveParseError {
    what: &'static str,
    input: String,
    expected: &'static str,
}

/// Tile grid layout: how many tiles per row and how many rows at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub columns: u32,
    pub rows: u32,
}

impl TileGrid {
    /// Maximum number of tiles the grid can hold.
    pub fn capacity(self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

impl FromStr for TileGrid {
    type Err = DirectiveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DirectiveParseError {
            what: "tile grid",
            input: s.to_string(),
            expected: "COLUMNSxROWS, e.g. 29x23",
        };
        let (c, r) = s.split_once('x').ok_or_else(err)?;
        Ok(Self {
            columns: c.parse().map_err(|_| err())?,
            rows: r.parse().map_err(|_| err())?,
        })
    }
}

/// Per-tile geometry: images are fitted into `width × height`, with
/// `offset_x`/`offset_y` pixels of border on each side of every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl fmt::Display for CellGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.offset_x, self.offset_y
        )
    }
}

impl FromStr for CellGeometry {
    type Err = DirectiveParseError;

    /// Parses `WxH+X+Y`. The offset part may be omitted (`WxH` → `+0+0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DirectiveParseError {
            what: "cell geometry",
            input: s.to_string(),
            expected: "WIDTHxHEIGHT+X+Y, e.g. 600x600+1+1",
        };
        let mut parts = s.split('+');
        let size = parts.next().ok_or_else(err)?;
        let (w, h) = size.split_once('x').ok_or_else(err)?;
        let offset_x = match parts.next() {
            Some(x) => x.parse().map_err(|_| err())?,
            None => 0,
        };
        let offset_y = match parts.next() {
            Some(y) => y.parse().map_err(|_| err())?,
            None => offset_x,
        };
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self {
            width: w.parse().map_err(|_| err())?,
            height: h.parse().map_err(|_| err())?,
            offset_x,
            offset_y,
        })
    }
}

/// Full specification for one poster.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeParams {
    /// Input tiles in placement order (left-to-right, top-to-bottom).
    pub inputs: Vec<PathBuf>,
    pub grid: TileGrid,
    pub geometry: CellGeometry,
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_grid_display() {
        let grid = TileGrid {
            columns: 29,
            rows: 23,
        };
        assert_eq!(grid.to_string(), "29x23");
        assert_eq!(grid.capacity(), 667);
    }

    #[test]
    fn tile_grid_parse() {
        assert_eq!(
            "29x23".parse::<TileGrid>().unwrap(),
            TileGrid {
                columns: 29,
                rows: 23
            }
        );
    }

    #[test]
    fn tile_grid_parse_rejects_garbage() {
        assert!("29".parse::<TileGrid>().is_err());
        assert!("29x".parse::<TileGrid>().is_err());
        assert!("axb".parse::<TileGrid>().is_err());
        assert!("-1x3".parse::<TileGrid>().is_err());
    }

    #[test]
    fn geometry_display() {
        let g = CellGeometry {
            width: 600,
            height: 600,
            offset_x: 1,
            offset_y: 1,
        };
        assert_eq!(g.to_string(), "600x600+1+1");
    }

    #[test]
    fn geometry_parse_full() {
        let g: CellGeometry = "640x480+2+3".parse().unwrap();
        assert_eq!(
            g,
            CellGeometry {
                width: 640,
                height: 480,
                offset_x: 2,
                offset_y: 3
            }
        );
    }

    #[test]
    fn geometry_parse_without_offset() {
        let g: CellGeometry = "600x600".parse().unwrap();
        assert_eq!((g.offset_x, g.offset_y), (0, 0));
    }

    #[test]
    fn geometry_parse_single_offset_applies_to_both() {
        let g: CellGeometry = "600x600+4".parse().unwrap();
        assert_eq!((g.offset_x, g.offset_y), (4, 4));
    }

    #[test]
    fn geometry_parse_rejects_garbage() {
        assert!("600".parse::<CellGeometry>().is_err());
        assert!("600x600+1+1+1".parse::<CellGeometry>().is_err());
        assert!("600x600+a+1".parse::<CellGeometry>().is_err());
    }

    #[test]
    fn parse_error_message_names_input() {
        let err = "nope".parse::<TileGrid>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid tile grid 'nope': expected COLUMNSxROWS, e.g. 29x23"
        );
    }
}
