//! Poster composition.
//!
//! | Compositor | How |
//! |---|---|
//! | **montage** (default) | ImageMagick `montage -tile CxR -geometry WxH+X+Y` subprocess |
//! | **native** | `image` crate: Lanczos3 fit, centered per cell, PNG encode |
//!
//! The module is split into:
//! - **Parameters**: grid, geometry and compose request types
//! - **Calculations**: pure layout math (unit testable)
//! - **Backend**: [`Compositor`] trait + error type
//! - **Implementations**: [`MontageCompositor`], [`NativeCompositor`]

pub mod backend;
mod calculations;
pub mod montage_backend;
pub mod params;
pub mod rust_backend;

pub use backend::{Compositor, CompositorError};
pub use montage_backend::MontageCompositor;
pub use params::{CellGeometry, ComposeParams, DirectiveParseError, TileGrid};
pub use rust_backend::{NativeCompositor, parse_hex_color};
