//! Pattern module - polyomino shapes as small boolean matrices
//!
//! A pattern is stored as a row-major bit set in a `u64`, which bounds both
//! dimensions by [`MAX_PATTERN_DIM`]. Patterns are `Copy` and every operation
//! here is pure and allocation-free.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{MAX_PATTERN_CELLS, MAX_PATTERN_DIM};

/// Why a nested-row pattern could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// No rows, or a row with no columns
    Empty,
    /// Rows of different lengths
    Ragged,
    /// More than `MAX_PATTERN_DIM` rows or columns
    TooLarge,
}

impl PatternError {
    pub fn code(self) -> &'static str {
        match self {
            PatternError::Empty => "pattern_empty",
            PatternError::Ragged => "pattern_ragged",
            PatternError::TooLarge => "pattern_too_large",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PatternError::Empty => "pattern has no rows or no columns",
            PatternError::Ragged => "pattern rows have different lengths",
            PatternError::TooLarge => "pattern exceeds the maximum dimension",
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PatternError {}

/// Rectangular 0/1 matrix describing a piece in local coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    rows: u8,
    cols: u8,
    bits: u64,
}

/// Inclusive bounding box of the set cells: `(min_row, min_col, max_row, max_col)`.
pub type BoundingBox = (u8, u8, u8, u8);

impl Pattern {
    /// The 1x1 fallback pattern `[[1]]`.
    pub const SINGLE: Pattern = Pattern {
        rows: 1,
        cols: 1,
        bits: 1,
    };

    /// Build from nested rows of 0/1 values (any non-zero value counts as set).
    ///
    /// A well-formed matrix with no set cells yields [`Pattern::SINGLE`].
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, PatternError> {
        let Some(first) = rows.first() else {
            return Err(PatternError::Empty);
        };
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(PatternError::Empty);
        }
        if rows.len() > MAX_PATTERN_DIM as usize || cols > MAX_PATTERN_DIM as usize {
            return Err(PatternError::TooLarge);
        }
        if rows.iter().any(|r| r.as_ref().len() != cols) {
            return Err(PatternError::Ragged);
        }

        let mut pattern = Pattern {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits: 0,
        };
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.as_ref().iter().enumerate() {
                if v != 0 {
                    pattern.set(i as u8, j as u8);
                }
            }
        }
        if pattern.bits == 0 {
            return Ok(Pattern::SINGLE);
        }
        Ok(pattern)
    }

    /// A fully set `rows x cols` rectangle (dimensions clamped to 1..=`MAX_PATTERN_DIM`).
    pub fn filled(rows: u8, cols: u8) -> Self {
        let rows = rows.clamp(1, MAX_PATTERN_DIM);
        let cols = cols.clamp(1, MAX_PATTERN_DIM);
        let mut pattern = Pattern { rows, cols, bits: 0 };
        for i in 0..rows {
            for j in 0..cols {
                pattern.set(i, j);
            }
        }
        pattern
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    #[inline(always)]
    fn bit(&self, row: u8, col: u8) -> u64 {
        1u64 << (row as u32 * self.cols as u32 + col as u32)
    }

    #[inline(always)]
    fn set(&mut self, row: u8, col: u8) {
        self.bits |= self.bit(row, col);
    }

    /// Whether local cell `(row, col)` is set. Out-of-range cells are unset.
    pub fn get(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.bits & self.bit(row, col) != 0
    }

    /// Number of set cells.
    pub fn cell_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Set cells as `(row, col)` in row-major order.
    pub fn cells(&self) -> ArrayVec<(u8, u8), MAX_PATTERN_CELLS> {
        let mut out = ArrayVec::new();
        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.get(i, j) {
                    out.push((i, j));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: an R x C pattern becomes C x R with
    /// `rotated[j][R-1-i] = self[i][j]`.
    pub fn rotate_cw(&self) -> Self {
        let mut rotated = Pattern {
            rows: self.cols,
            cols: self.rows,
            bits: 0,
        };
        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.get(i, j) {
                    rotated.set(j, self.rows - 1 - i);
                }
            }
        }
        rotated
    }

    /// Apply `quarter_turns` clockwise rotations (mod 4).
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let mut out = *self;
        for _ in 0..quarter_turns % 4 {
            out = out.rotate_cw();
        }
        out
    }

    /// Bounding box of the set cells, `None` when nothing is set.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for (i, j) in self.cells() {
            bbox = Some(match bbox {
                None => (i, j, i, j),
                Some((r0, c0, r1, c1)) => (r0.min(i), c0.min(j), r1.max(i), c1.max(j)),
            });
        }
        bbox
    }

    /// Crop to the bounding box of the set cells; [`Pattern::SINGLE`] when empty.
    pub fn trim(&self) -> Self {
        let Some((r0, c0, r1, c1)) = self.bounding_box() else {
            return Pattern::SINGLE;
        };
        let mut trimmed = Pattern {
            rows: r1 - r0 + 1,
            cols: c1 - c0 + 1,
            bits: 0,
        };
        for (i, j) in self.cells() {
            trimmed.set(i - r0, j - c0);
        }
        trimmed
    }

    /// Nested 0/1 rows, for display and config round-trips.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.get(i, j) as u8).collect())
            .collect()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern{:?}", self.to_rows())
    }
}
