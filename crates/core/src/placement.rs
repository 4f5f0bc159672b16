//! Placement validation - bounds only
//!
//! Pieces may overlap freely; the only rule is that every set cell of a
//! committed pattern lies on the grid.

use crate::geometry::Anchor;
use crate::pattern::Pattern;

/// Whether every set cell of `pattern` at `anchor` is inside a `size x size` grid.
///
/// A pattern without set cells never validates.
pub fn validate(pattern: &Pattern, anchor: Anchor, size: u8) -> bool {
    let n = size as i32;
    let cells = pattern.cells();
    !cells.is_empty()
        && cells.iter().all(|&(i, j)| {
            let row = anchor.row + i as i32;
            let col = anchor.col + j as i32;
            (0..n).contains(&row) && (0..n).contains(&col)
        })
}

/// Whether `pattern` can be validated at some anchor on a `size x size` grid.
pub fn fits(pattern: &Pattern, size: u8) -> bool {
    match pattern.bounding_box() {
        Some((r0, c0, r1, c1)) => r1 - r0 < size && c1 - c0 < size,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_fully_inside() {
        let square = Pattern::filled(2, 2);
        assert!(validate(&square, Anchor::new(0, 0), 5));
        assert!(validate(&square, Anchor::new(3, 3), 5));
    }

    #[test]
    fn validate_rejects_any_cell_outside() {
        let square = Pattern::filled(2, 2);
        assert!(!validate(&square, Anchor::new(4, 3), 5));
        assert!(!validate(&square, Anchor::new(3, 4), 5));
        assert!(!validate(&square, Anchor::new(-1, 0), 5));
        assert!(!validate(&square, Anchor::new(0, -1), 5));
    }

    #[test]
    fn unset_cells_may_hang_off_the_grid() {
        let padded = Pattern::from_rows(&[&[0u8, 0][..], &[0, 1][..]]).unwrap();
        assert!(validate(&padded, Anchor::new(-1, -1), 2));
        assert!(!validate(&padded, Anchor::new(0, 0), 1));
    }

    #[test]
    fn oversized_pattern_never_validates() {
        for n in 1..=6u8 {
            let too_wide = Pattern::filled(1, n + 1);
            assert!(!fits(&too_wide, n));
            for row in -8..8 {
                for col in -8..8 {
                    assert!(!validate(&too_wide, Anchor::new(row, col), n));
                }
            }
            assert!(fits(&Pattern::filled(n, n), n));
        }
    }
}
