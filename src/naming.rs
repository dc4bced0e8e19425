//! Filename classification for the two dated naming conventions.
//!
//! Every poster tile is a PNG whose filename starts with the date of the
//! play it depicts. Two eras are recognized, split at the reference epoch:
//!
//! - `BC0431_antigone.png` → [`Era::BeforeEpoch`] (literal `BC` prefix)
//! - `1601_hamlet.png` → [`Era::AfterEpoch`] (leading ASCII digit)
//!
//! Anything else (`notes.txt`, `Hamlet.png`, `bc0431_x.png`, `1601_x.PNG`)
//! is [`None`] and takes no part in the poster.
//!
//! Matching is the same as the shell globs `BC*.png` and `[0-9]*.png`:
//! case-sensitive, and the date portion is never parsed as a number.

/// Prefix marking a date before the reference epoch.
pub const BEFORE_EPOCH_PREFIX: &str = "BC";

/// Extension every poster tile must carry.
pub const TILE_EXTENSION: &str = ".png";

/// Which side of the reference epoch a filename falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    /// `BC`-prefixed. Listed first, in descending order.
    BeforeEpoch,
    /// Digit-prefixed. Listed after the BC group, ascending.
    AfterEpoch,
}

impl Era {
    /// Short label used in console output.
    pub fn label(self) -> &'static str {
        match self {
            Era::BeforeEpoch => "BC",
            Era::AfterEpoch => "AD",
        }
    }
}

/// Classify a bare filename into its era, or `None` if it follows neither
/// convention.
///
/// - `"BC0500_b.png"` → `Some(BeforeEpoch)`
/// - `"BC.png"` → `Some(BeforeEpoch)` (empty date portion still matches)
/// - `"0250_c.png"` → `Some(AfterEpoch)`
/// - `"B0500_b.png"`, `"0250_c.jpg"`, `".0250.png"` → `None`
pub fn classify(filename: &str) -> Option<Era> {
    if !filename.ends_with(TILE_EXTENSION) {
        return None;
    }
    if filename.starts_with(BEFORE_EPOCH_PREFIX) {
        return Some(Era::BeforeEpoch);
    }
    // `BC` and a digit can never both lead, so the eras are disjoint.
    match filename.as_bytes().first() {
        Some(b) if b.is_ascii_digit() => Some(Era::AfterEpoch),
        _ => None,
    }
}
