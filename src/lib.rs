//! # superposter
//!
//! Assembles one grid poster from a directory of rendered PNG tiles, in
//! chronological order of the date at the start of each filename.
//!
//! ```text
//! renders/
//! ├── BC0431_antigone.png     ┐ before the epoch: BC-prefixed,
//! ├── BC0405_bacchae.png      ┘ listed first, descending
//! ├── 1601_hamlet.png         ┐ after the epoch: digit-prefixed,
//! ├── 1606_macbeth.png        ┘ listed next, ascending
//! └── superposter.png         ← output, rebuilt on every run
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Remove stale output   superposter.png deleted if present
//! 2. List tiles            working dir → OrderedFileList
//! 3. Compose               montage -tile 29x23 -geometry 600x600+1+1 ...
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Classifies a filename as BC, digit-dated, or neither |
//! | [`scan`] | Lists the working directory and builds the [`scan::OrderedFileList`] |
//! | [`assemble`] | Runs the three steps in order and reports progress events |
//! | [`imaging`] | [`imaging::Compositor`] trait with ImageMagick and pure-Rust implementations |
//! | [`config`] | `superposter.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Lexical Ordering
//!
//! Filenames are compared as strings, never parsed as numbers. Zero-padded
//! years of equal width order correctly; mixed widths do not. See [`scan`].
//!
//! ## Swappable Compositor
//!
//! Ordering never depends on how pixels are composed. The default
//! [`imaging::MontageCompositor`] shells out to ImageMagick; the
//! [`imaging::NativeCompositor`] reproduces the same layout with the `image`
//! crate for machines without ImageMagick.

pub mod assemble;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
