//! Storage key encoding for tile coordinates.
//!
//! The layout is the one osmdroid's SQLite tile archive uses, so databases
//! written here can be read by existing map views unchanged.

/// Highest zoom level whose keys fit in an `i64` without wrapping.
///
/// Zoom `z` occupies the key interval `[z * 4^z, (z + 1) * 4^z - 1]`; at 29
/// the upper bound is about `8.6e18`, just below `i64::MAX`.
pub const MAX_ZOOM: i32 = 29;

/// Encode a tile address into its storage key.
///
/// Computes `((zoom << zoom) + column) << zoom) + row`. Arithmetic wraps and
/// the shift amount only uses the low six bits of `zoom`, so every input maps
/// to some key. Keys are unique for zoom levels up to [`MAX_ZOOM`] with column
/// and row inside `0..2^zoom`.
///
/// # Examples
///
/// ```
/// use tilecache_core::encode_key;
///
/// assert_eq!(encode_key(0, 0, 0), 0);
/// assert_eq!(encode_key(654, 1583, 12), 204_006_959);
/// ```
#[must_use]
pub fn encode_key(column: i64, row: i64, zoom: i64) -> i64 {
    let shift = shift_amount(zoom);
    let nested = zoom.wrapping_shl(shift).wrapping_add(column);
    nested.wrapping_shl(shift).wrapping_add(row)
}

fn shift_amount(zoom: i64) -> u32 {
    // `zoom & 63` is always in 0..=63.
    u32::try_from(zoom & 63).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0, 0)]
    #[case(0, 0, 1, 4)]
    #[case(1, 1, 1, 7)]
    #[case(0, 0, 2, 32)]
    #[case(3, 3, 2, 47)]
    #[case(3, 2, 5, 5218)]
    #[case(654, 1583, 12, 204_006_959)]
    fn encodes_known_keys(
        #[case] column: i64,
        #[case] row: i64,
        #[case] zoom: i64,
        #[case] expected: i64,
    ) {
        assert_eq!(encode_key(column, row, zoom), expected);
    }

    #[rstest]
    fn zoom_levels_do_not_overlap_at_their_edges() {
        for zoom in 0..i64::from(MAX_ZOOM) {
            let extent = 1_i64 << zoom;
            let last = encode_key(extent - 1, extent - 1, zoom);
            let next_first = encode_key(0, 0, zoom + 1);
            assert!(last < next_first, "zoom {zoom} overlaps zoom {}", zoom + 1);
        }
    }

    #[rstest]
    fn wraps_instead_of_panicking_past_the_supported_range() {
        assert_eq!(encode_key(i64::MAX, i64::MAX, 63), -1);
        assert_eq!(encode_key(-1, -1, -1), i64::MAX);
        // Only the low six bits of the zoom select the shift.
        assert_eq!(encode_key(0, 0, 64), 64);
    }
}
