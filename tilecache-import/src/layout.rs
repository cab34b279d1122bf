//! Mapping from file paths inside a tile pyramid to tile coordinates.

use camino::Utf8Path;
use tilecache_core::TileCoord;

/// Strategy for reading a tile coordinate out of a path relative to the
/// import root.
///
/// Returning `None` skips the file without raising an error, so stray files
/// in a pyramid directory are tolerated.
pub trait TileLayout {
    /// Parse the coordinate encoded by `relative`, if any.
    fn parse_coordinates(&self, relative: &Utf8Path) -> Option<TileCoord>;
}

impl<F> TileLayout for F
where
    F: Fn(&Utf8Path) -> Option<TileCoord>,
{
    fn parse_coordinates(&self, relative: &Utf8Path) -> Option<TileCoord> {
        self(relative)
    }
}

/// The `{zoom}/{column}/{row}.{ext}` layout written by most tile downloaders.
///
/// Exactly three path segments are accepted. The row is read from the file
/// name up to its last `.`; a name without an extension is read whole.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use tilecache_core::TileCoord;
/// use tilecache_import::{TileLayout, ZxyLayout};
///
/// let coord = ZxyLayout.parse_coordinates(Utf8Path::new("12/654/1583.png"));
/// assert_eq!(coord, Some(TileCoord::new(12, 654, 1583)));
/// assert_eq!(ZxyLayout.parse_coordinates(Utf8Path::new("thumbs/0.png")), None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZxyLayout;

impl TileLayout for ZxyLayout {
    fn parse_coordinates(&self, relative: &Utf8Path) -> Option<TileCoord> {
        let mut segments = relative.iter();
        let (Some(zoom), Some(column), Some(file_name), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return None;
        };

        let zoom = zoom.parse().ok()?;
        let column = column.parse().ok()?;
        let row = file_stem(file_name).parse().ok()?;
        Some(TileCoord::new(zoom, column, row))
    }
}

/// Text before the last `.`; a leading dot does not start an extension.
fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
