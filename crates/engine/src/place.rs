use crate::core::{fits, validate, Anchor, GridState, Pattern};
use crate::types::{PieceId, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// The pattern is larger than the grid in some dimension.
    TooLarge,
    /// A set cell would land outside the grid at this anchor.
    OutOfBounds,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::TooLarge | PlaceError::OutOfBounds => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::TooLarge => "pattern does not fit the grid at any anchor",
            PlaceError::OutOfBounds => "target anchor would place piece out of bounds",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Validate and commit a drop.
///
/// On success the piece `id` (or a new piece, when `id` is `None` or no
/// longer on the grid) sits at `anchor` with `pattern`. On failure the grid
/// is untouched, so a pre-existing piece stays where it was.
pub fn apply_place(
    grid: &mut GridState,
    id: Option<PieceId>,
    kind: &str,
    pattern: Pattern,
    color: Rgb,
    anchor: Anchor,
) -> Result<PieceId, PlaceError> {
    let size = grid.size();
    if !fits(&pattern, size) {
        return Err(PlaceError::TooLarge);
    }
    if !validate(&pattern, anchor, size) {
        return Err(PlaceError::OutOfBounds);
    }
    Ok(grid.place_or_move(id, kind, pattern, color, anchor))
}
