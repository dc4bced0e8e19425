//! Directory listing and chronological ordering.
//!
//! Second step of the assembly pipeline. Lists the working directory (no
//! recursion), keeps the names that follow one of the two dated naming
//! conventions from [`naming`](crate::naming), and orders them:
//!
//! ```text
//! BC0500_b.png   ┐ BC group, descending
//! BC0100_a.png   ┘
//! 0250_c.png     ┐ digit group, ascending
//! 1800_d.png     ┘
//! ```
//!
//! ## Lexical, Not Numeric
//!
//! Both groups are sorted by plain byte-wise comparison of the full filename.
//! The date portion is never parsed. With equal-width zero-padded years this
//! matches chronology; with mixed widths it does not (`BC99_x.png` lands
//! before `BC100_x.png` in the descending group even though 100 BC is
//! further in the past). That behavior is kept as-is.
//!
//! ## Purity
//!
//! [`order_filenames`] is a pure function from names to an
//! [`OrderedFileList`]; [`scan`] is the thin I/O wrapper around it. Same
//! directory contents in, same list out.

use crate::naming::{self, Era};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read directory {}: {source}", .dir.display())]
    ReadDir {
        dir: PathBuf,
        source: std::io::Error,
    },
}

/// One listed poster tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedFile {
    /// Bare filename, relative to the working directory.
    pub name: String,
    pub era: Era,
}

/// The chronologically ordered tiles, BC group first.
///
/// Immutable once built. Filenames are kept as separate entries, so names
/// containing spaces survive intact; [`joined`](Self::joined) is only for
/// display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderedFileList {
    files: Vec<ListedFile>,
}

impl OrderedFileList {
    pub fn files(&self) -> &[ListedFile] {
        &self.files
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    /// Paths of every tile, resolved against `dir`, in poster order.
    pub fn paths(&self, dir: &Path) -> Vec<PathBuf> {
        self.names().map(|n| dir.join(n)).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of tiles belonging to `era`.
    pub fn count(&self, era: Era) -> usize {
        self.files.iter().filter(|f| f.era == era).count()
    }

    /// Space-separated rendering, e.g. `BC0500_b.png BC0100_a.png 0250_c.png`.
    pub fn joined(&self) -> String {
        self.names().collect::<Vec<_>>().join(" ")
    }
}

/// Order a set of filenames into poster order.
///
/// Names that follow neither convention are dropped. Duplicates are kept.
pub fn order_filenames<I, S>(names: I) -> OrderedFileList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut before: Vec<String> = Vec::new();
    let mut after: Vec<String> = Vec::new();

    for name in names {
        let name = name.as_ref();
        match naming::classify(name) {
            Some(Era::BeforeEpoch) => before.push(name.to_string()),
            Some(Era::AfterEpoch) => after.push(name.to_string()),
            None => {}
        }
    }

    before.sort_unstable_by(|a, b| b.cmp(a));
    after.sort_unstable();

    let files = before
        .into_iter()
        .map(|name| ListedFile {
            name,
            era: Era::BeforeEpoch,
        })
        .chain(after.into_iter().map(|name| ListedFile {
            name,
            era: Era::AfterEpoch,
        }))
        .collect();

    OrderedFileList { files }
}

/// List `dir` and return its tiles in poster order.
///
/// Subdirectories and entries whose names are not valid UTF-8 are skipped.
pub fn scan(dir: &Path) -> Result<OrderedFileList, ScanError> {
    let read_err = |source| ScanError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping directory");
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::debug!(name = ?raw, "skipping non-UTF-8 filename"),
        }
    }

    let list = order_filenames(names);
    tracing::debug!(
        dir = %dir.display(),
        bc = list.count(Era::BeforeEpoch),
        ad = list.count(Era::AfterEpoch),
        "listed poster tiles"
    );
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::touch_all;
    use tempfile::TempDir;

    fn names(list: &OrderedFileList) -> Vec<&str> {
        list.names().collect()
    }

    #[test]
    fn mixed_eras_bc_first() {
        let list = order_filenames(["BC0100_a.png", "BC0500_b.png", "0250_c.png", "1800_d.png"]);
        assert_eq!(
            names(&list),
            vec!["BC0500_b.png", "BC0100_a.png", "0250_c.png", "1800_d.png"]
        );
    }

    #[test]
    fn digit_only_ascending() {
        let list = order_filenames(["0002_y.png", "0001_x.png"]);
        assert_eq!(names(&list), vec!["0001_x.png", "0002_y.png"]);
        assert_eq!(list.count(Era::BeforeEpoch), 0);
    }

    #[test]
    fn bc_only_descending() {
        let list = order_filenames(["BC0001_a.png", "BC0431_b.png", "BC0200_c.png"]);
        assert_eq!(
            names(&list),
            vec!["BC0431_b.png", "BC0200_c.png", "BC0001_a.png"]
        );
    }

    #[test]
    fn empty_input_gives_empty_list() {
        let list = order_filenames(Vec::<String>::new());
        assert!(list.is_empty());
        assert_eq!(list.joined(), "");
    }

    #[test]
    fn unrecognized_names_dropped() {
        let list = order_filenames([
            "superposter.png",
            "notes.txt",
            "1601_hamlet.png",
            "1601_hamlet.jpg",
            "bc0431_x.png",
        ]);
        assert_eq!(names(&list), vec!["1601_hamlet.png"]);
    }

    #[test]
    fn sorting_is_lexical_not_numeric() {
        // Mixed widths: lexical order, not chronological
        let list = order_filenames(["BC99_x.png", "BC100_y.png", "950_a.png", "1200_b.png"]);
        assert_eq!(
            names(&list),
            vec!["BC99_x.png", "BC100_y.png", "1200_b.png", "950_a.png"]
        );
    }

    #[test]
    fn every_bc_precedes_every_digit() {
        let list = order_filenames([
            "9999_z.png",
            "BC0001_a.png",
            "0000_a.png",
            "BC9999_z.png",
            "5_m.png",
            "BC5_m.png",
        ]);
        let first_ad = list
            .files()
            .iter()
            .position(|f| f.era == Era::AfterEpoch)
            .unwrap();
        assert!(list.files()[..first_ad]
            .iter()
            .all(|f| f.era == Era::BeforeEpoch));
        assert!(list.files()[first_ad..]
            .iter()
            .all(|f| f.era == Era::AfterEpoch));
    }

    #[test]
    fn groups_are_monotonic() {
        let list = order_filenames([
            "BC0300_c.png",
            "BC0300_a.png",
            "BC1000_x.png",
            "0300_c.png",
            "0300_a.png",
            "1000_x.png",
        ]);
        let bc: Vec<&str> = list
            .files()
            .iter()
            .filter(|f| f.era == Era::BeforeEpoch)
            .map(|f| f.name.as_str())
            .collect();
        let ad: Vec<&str> = list
            .files()
            .iter()
            .filter(|f| f.era == Era::AfterEpoch)
            .map(|f| f.name.as_str())
            .collect();
        assert!(bc.windows(2).all(|w| w[0] > w[1]));
        assert!(ad.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn joined_uses_single_spaces() {
        let list = order_filenames(["BC0100_a.png", "0250_c.png"]);
        assert_eq!(list.joined(), "BC0100_a.png 0250_c.png");
    }

    #[test]
    fn names_with_spaces_stay_single_entries() {
        let list = order_filenames(["1611_the tempest.png", "1600_as you like it.png"]);
        assert_eq!(list.len(), 2);
        assert_eq!(
            names(&list),
            vec!["1600_as you like it.png", "1611_the tempest.png"]
        );
    }

    #[test]
    fn paths_resolve_against_dir() {
        let list = order_filenames(["BC0100_a.png", "0250_c.png"]);
        let paths = list.paths(Path::new("/posters"));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/posters/BC0100_a.png"),
                PathBuf::from("/posters/0250_c.png"),
            ]
        );
    }

    #[test]
    fn serializes_as_plain_array() {
        let list = order_filenames(["BC0100_a.png", "0250_c.png"]);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "BC0100_a.png", "era": "before_epoch"},
                {"name": "0250_c.png", "era": "after_epoch"},
            ])
        );
    }

    // =========================================================================
    // scan() against a real directory
    // =========================================================================

    #[test]
    fn scan_orders_directory_contents() {
        let tmp = TempDir::new().unwrap();
        touch_all(
            tmp.path(),
            &["BC0100_a.png", "BC0500_b.png", "0250_c.png", "1800_d.png", "readme.md"],
        );

        let list = scan(tmp.path()).unwrap();
        assert_eq!(
            names(&list),
            vec!["BC0500_b.png", "BC0100_a.png", "0250_c.png", "1800_d.png"]
        );
    }

    #[test]
    fn scan_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let list = scan(tmp.path()).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn scan_does_not_recurse() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("0001_nested");
        fs::create_dir(&nested).unwrap();
        touch_all(&nested, &["0002_inner.png"]);
        touch_all(tmp.path(), &["0003_outer.png"]);

        let list = scan(tmp.path()).unwrap();
        assert_eq!(names(&list), vec!["0003_outer.png"]);
    }

    #[test]
    fn scan_skips_matching_directory_names() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("BC0100_dir.png")).unwrap();
        touch_all(tmp.path(), &["0001_x.png"]);

        let list = scan(tmp.path()).unwrap();
        assert_eq!(names(&list), vec!["0001_x.png"]);
    }

    #[test]
    fn scan_missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("missing"));
        assert!(matches!(result, Err(ScanError::ReadDir { .. })));
    }

    #[test]
    fn scan_is_repeatable() {
        let tmp = TempDir::new().unwrap();
        touch_all(
            tmp.path(),
            &["1800_d.png", "BC0100_a.png", "0250_c.png", "BC0500_b.png"],
        );
        assert_eq!(scan(tmp.path()).unwrap(), scan(tmp.path()).unwrap());
    }
}
