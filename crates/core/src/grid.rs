//! Grid module - the mutable state of one grid instance
//!
//! Owns the placed pieces (in z-order), the wall segments and the marked
//! cells. Walls and marks use flat row-major boolean storage indexed by
//! integer coordinates, so an out-of-range id can never be stored.
//!
//! Every effective mutation bumps [`GridState::revision`] by one and records
//! exactly one [`GridChange`], which observers consume with
//! [`GridState::drain_changes`]. No-ops record nothing.

use arrayvec::ArrayVec;

use crate::geometry::{clamp_anchor, Anchor};
use crate::pattern::Pattern;
use crate::placement::validate;
use crate::types::{
    CellPos, Orientation, PieceId, Rgb, Rotation, WallSegment, MAX_GRID_SIZE, MAX_PATTERN_CELLS,
};

/// Fixed-size boolean matrix with flat row-major storage.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BitGrid {
    rows: u8,
    cols: u8,
    cells: Vec<bool>,
}

impl BitGrid {
    fn new(rows: u8, cols: u8) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows as usize * cols as usize],
        }
    }

    #[inline(always)]
    fn index(&self, row: u8, col: u8) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    fn get(&self, row: u8, col: u8) -> bool {
        self.index(row, col).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Flip a cell, returning its new value (`None` when out of range).
    fn toggle(&mut self, row: u8, col: u8) -> Option<bool> {
        let i = self.index(row, col)?;
        self.cells[i] = !self.cells[i];
        Some(self.cells[i])
    }

    fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn clear(&mut self) {
        self.cells.fill(false);
    }

    fn iter_set(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let cols = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| ((i / cols) as u8, (i % cols) as u8))
    }
}

/// How [`GridState::rotate`] treats a rotation that would leave the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Rotate, then pull the anchor back so the piece stays on the grid.
    /// A rotation that cannot fit at any anchor is rejected.
    #[default]
    KeepInBounds,
    /// Rotate in place; cells may end up off the grid until the next move.
    Free,
}

impl RotationPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "keep" | "keep_in_bounds" | "clamp" => Some(RotationPolicy::KeepInBounds),
            "free" => Some(RotationPolicy::Free),
            _ => None,
        }
    }
}

/// A piece placed on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    kind: String,
    pattern: Pattern,
    original: Pattern,
    color: Rgb,
    anchor: Anchor,
    rotation: Rotation,
}

impl Piece {
    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Current (rotated) pattern.
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Pattern as first placed, before any rotation on the grid.
    pub fn original_pattern(&self) -> Pattern {
        self.original
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Absolute `(row, col)` of every set cell, possibly off the grid.
    pub fn cells(&self) -> ArrayVec<(i32, i32), MAX_PATTERN_CELLS> {
        self.pattern
            .cells()
            .iter()
            .map(|&(i, j)| (self.anchor.row + i as i32, self.anchor.col + j as i32))
            .collect()
    }

    /// Whether the piece covers absolute cell `(row, col)`.
    pub fn covers(&self, row: i32, col: i32) -> bool {
        let (i, j) = (row - self.anchor.row, col - self.anchor.col);
        (0..=u8::MAX as i32).contains(&i)
            && (0..=u8::MAX as i32).contains(&j)
            && self.pattern.get(i as u8, j as u8)
    }
}

/// One observable state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridChange {
    Placed(PieceId),
    Moved(PieceId),
    Removed(PieceId),
    Rotated(PieceId),
    WallToggled { segment: WallSegment, on: bool },
    MarkToggled { cell: CellPos, on: bool },
    PiecesCleared,
    WallsCleared,
}

/// Pieces, walls and marks of one grid.
#[derive(Debug, Clone)]
pub struct GridState {
    size: u8,
    pieces: Vec<Piece>,
    /// `(size + 1) x size` edges along cell tops.
    walls_h: BitGrid,
    /// `size x (size + 1)` edges along cell lefts.
    walls_v: BitGrid,
    marks: BitGrid,
    next_id: u32,
    revision: u64,
    changes: Vec<GridChange>,
    rotation_policy: RotationPolicy,
}

impl GridState {
    /// Create an empty grid. `size` is clamped to `1..=MAX_GRID_SIZE`.
    pub fn new(size: u8) -> Self {
        let size = size.clamp(1, MAX_GRID_SIZE);
        Self {
            size,
            pieces: Vec::new(),
            walls_h: BitGrid::new(size + 1, size),
            walls_v: BitGrid::new(size, size + 1),
            marks: BitGrid::new(size, size),
            next_id: 0,
            revision: 0,
            changes: Vec::new(),
            rotation_policy: RotationPolicy::default(),
        }
    }

    pub fn with_rotation_policy(mut self, policy: RotationPolicy) -> Self {
        self.rotation_policy = policy;
        self
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        self.rotation_policy
    }

    /// Pieces bottom to top.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Monotonic counter, +1 per effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take the changes recorded since the last drain.
    pub fn drain_changes(&mut self) -> Vec<GridChange> {
        std::mem::take(&mut self.changes)
    }

    fn record(&mut self, change: GridChange) {
        self.revision += 1;
        self.changes.push(change);
    }

    /// Place a new piece or move an existing one.
    ///
    /// When `id` names a piece on the grid, that piece keeps its id, z-order
    /// slot, rotation and original pattern; its pattern, anchor, kind and
    /// color are replaced in a single transition. Otherwise a new piece is
    /// appended on top with rotation 0 and `pattern` as its original.
    ///
    /// Bounds are the caller's concern (see [`crate::placement::validate`]).
    pub fn place_or_move(
        &mut self,
        id: Option<PieceId>,
        kind: &str,
        pattern: Pattern,
        color: Rgb,
        anchor: Anchor,
    ) -> PieceId {
        let slot = id.and_then(|id| self.pieces.iter().position(|p| p.id == id));
        if let Some(idx) = slot {
            let existing = &mut self.pieces[idx];
            existing.pattern = pattern;
            existing.anchor = anchor;
            existing.color = color;
            if existing.kind != kind {
                existing.kind = kind.to_string();
            }
            let id = existing.id;
            log::debug!("moved {} to ({}, {})", id, anchor.row, anchor.col);
            self.record(GridChange::Moved(id));
            return id;
        }

        self.next_id += 1;
        let id = PieceId(self.next_id);
        self.pieces.push(Piece {
            id,
            kind: kind.to_string(),
            pattern,
            original: pattern,
            color,
            anchor,
            rotation: Rotation::North,
        });
        log::debug!("placed {} ({}) at ({}, {})", id, kind, anchor.row, anchor.col);
        self.record(GridChange::Placed(id));
        id
    }

    /// Remove a piece. Unknown ids are ignored.
    pub fn remove(&mut self, id: PieceId) -> bool {
        let Some(idx) = self.pieces.iter().position(|p| p.id == id) else {
            return false;
        };
        self.pieces.remove(idx);
        log::debug!("removed {}", id);
        self.record(GridChange::Removed(id));
        true
    }

    /// Rotate a piece 90° clockwise.
    ///
    /// The new pattern is derived from the original pattern and the advanced
    /// rotation. Placement follows the grid's [`RotationPolicy`]. Returns
    /// `false` for unknown ids and rejected rotations.
    pub fn rotate(&mut self, id: PieceId) -> bool {
        let size = self.size;
        let policy = self.rotation_policy;
        let Some(piece) = self.pieces.iter_mut().find(|p| p.id == id) else {
            return false;
        };

        let rotation = piece.rotation.rotate_cw();
        let pattern = piece.original.rotated(rotation.quarter_turns());
        let anchor = match policy {
            RotationPolicy::Free => piece.anchor,
            RotationPolicy::KeepInBounds => {
                let clamped = clamp_anchor(piece.anchor, pattern.rows(), pattern.cols(), size);
                if !validate(&pattern, clamped, size) {
                    log::debug!("rotation of {} rejected: does not fit", id);
                    return false;
                }
                clamped
            }
        };

        piece.rotation = rotation;
        piece.pattern = pattern;
        piece.anchor = anchor;
        log::debug!("rotated {} to {}°", id, rotation.degrees());
        self.record(GridChange::Rotated(id));
        true
    }

    /// Remove every piece.
    pub fn clear_pieces(&mut self) {
        if self.pieces.is_empty() {
            return;
        }
        self.pieces.clear();
        self.record(GridChange::PiecesCleared);
    }

    /// Flip a wall segment. Returns the new state, `None` when out of range.
    pub fn toggle_wall(&mut self, segment: WallSegment) -> Option<bool> {
        if !segment.in_grid(self.size) {
            return None;
        }
        let walls = match segment.orientation {
            Orientation::Horizontal => &mut self.walls_h,
            Orientation::Vertical => &mut self.walls_v,
        };
        let on = walls.toggle(segment.row, segment.col)?;
        log::debug!("wall {} {}", segment, if on { "on" } else { "off" });
        self.record(GridChange::WallToggled { segment, on });
        Some(on)
    }

    /// Flip a cell mark. Returns the new state, `None` when out of range.
    pub fn toggle_mark(&mut self, cell: CellPos) -> Option<bool> {
        if !cell.in_grid(self.size) {
            return None;
        }
        let on = self.marks.toggle(cell.row, cell.col)?;
        log::debug!("mark {} {}", cell, if on { "on" } else { "off" });
        self.record(GridChange::MarkToggled { cell, on });
        Some(on)
    }

    /// Remove every wall. Marks are untouched.
    pub fn clear_walls(&mut self) {
        if self.wall_count() == 0 {
            return;
        }
        self.walls_h.clear();
        self.walls_v.clear();
        self.record(GridChange::WallsCleared);
    }

    pub fn has_wall(&self, segment: WallSegment) -> bool {
        match segment.orientation {
            Orientation::Horizontal => self.walls_h.get(segment.row, segment.col),
            Orientation::Vertical => self.walls_v.get(segment.row, segment.col),
        }
    }

    pub fn is_marked(&self, cell: CellPos) -> bool {
        self.marks.get(cell.row, cell.col)
    }

    pub fn wall_count(&self) -> usize {
        self.walls_h.count() + self.walls_v.count()
    }

    pub fn mark_count(&self) -> usize {
        self.marks.count()
    }

    /// All walls, horizontal first, each family row-major.
    pub fn walls(&self) -> Vec<WallSegment> {
        self.walls_h
            .iter_set()
            .map(|(r, c)| WallSegment::horizontal(r, c))
            .chain(self.walls_v.iter_set().map(|(r, c)| WallSegment::vertical(r, c)))
            .collect()
    }

    /// All marked cells, row-major.
    pub fn marks(&self) -> Vec<CellPos> {
        self.marks.iter_set().map(|(r, c)| CellPos::new(r, c)).collect()
    }

    /// Topmost piece covering `(row, col)`.
    pub fn occupant(&self, row: i32, col: i32) -> Option<&Piece> {
        self.pieces.iter().rev().find(|p| p.covers(row, col))
    }

    /// Color of the topmost piece covering `(row, col)`.
    pub fn occupant_color(&self, row: i32, col: i32) -> Option<Rgb> {
        self.occupant(row, col).map(|p| p.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(240, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 240);

    #[test]
    fn bit_grid_index_calculation() {
        let g = BitGrid::new(6, 5);
        assert_eq!(g.index(0, 0), Some(0));
        assert_eq!(g.index(0, 4), Some(4));
        assert_eq!(g.index(1, 0), Some(5));
        assert_eq!(g.index(5, 4), Some(29));
        assert_eq!(g.index(6, 0), None);
        assert_eq!(g.index(0, 5), None);
    }

    #[test]
    fn wall_families_have_edge_dimensions() {
        let mut grid = GridState::new(5);
        assert_eq!(grid.toggle_wall(WallSegment::horizontal(5, 4)), Some(true));
        assert_eq!(grid.toggle_wall(WallSegment::horizontal(4, 5)), None);
        assert_eq!(grid.toggle_wall(WallSegment::vertical(4, 5)), Some(true));
        assert_eq!(grid.toggle_wall(WallSegment::vertical(5, 4)), None);
        assert_eq!(grid.wall_count(), 2);
    }

    #[test]
    fn move_keeps_z_order_slot_and_rotation() {
        let mut grid = GridState::new(5);
        let square = Pattern::filled(2, 2);
        let a = grid.place_or_move(None, "O", square, RED, Anchor::new(0, 0));
        let b = grid.place_or_move(None, "O", square, BLUE, Anchor::new(0, 0));
        assert!(grid.rotate(a));

        let moved = grid.place_or_move(Some(a), "O", square, RED, Anchor::new(3, 3));
        assert_eq!(moved, a);
        assert_eq!(grid.pieces()[0].id(), a);
        assert_eq!(grid.pieces()[1].id(), b);
        assert_eq!(grid.pieces()[0].rotation(), Rotation::East);
        assert_eq!(grid.pieces()[0].anchor(), Anchor::new(3, 3));
    }

    #[test]
    fn stale_id_places_a_new_piece() {
        let mut grid = GridState::new(4);
        let line = Pattern::filled(1, 2);
        let a = grid.place_or_move(None, "D", line, RED, Anchor::new(0, 0));
        assert!(grid.remove(a));
        let b = grid.place_or_move(Some(a), "D", line, RED, Anchor::new(1, 1));
        assert_ne!(a, b);
        assert_eq!(grid.pieces().len(), 1);
    }

    #[test]
    fn covers_handles_negative_offsets() {
        let mut grid = GridState::new(4);
        let id = grid.place_or_move(None, "O", Pattern::filled(2, 2), RED, Anchor::new(1, 1));
        let piece = grid.piece(id).unwrap();
        assert!(!piece.covers(0, 0));
        assert!(piece.covers(2, 2));
        assert!(!piece.covers(3, 3));
        assert_eq!(piece.cells().as_slice(), &[(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn no_op_mutations_record_nothing() {
        let mut grid = GridState::new(4);
        grid.clear_pieces();
        grid.clear_walls();
        assert!(!grid.remove(PieceId(9)));
        assert!(!grid.rotate(PieceId(9)));
        assert_eq!(grid.toggle_mark(CellPos::new(4, 0)), None);
        assert_eq!(grid.revision(), 0);
        assert!(grid.drain_changes().is_empty());
    }

    #[test]
    fn rotation_policy_parses() {
        assert_eq!(RotationPolicy::from_str("free"), Some(RotationPolicy::Free));
        assert_eq!(RotationPolicy::from_str(" Keep "), Some(RotationPolicy::KeepInBounds));
        assert_eq!(RotationPolicy::from_str("other"), None);
    }
}
