use std::hash::{Hash, Hasher};

use crate::geometry::Anchor;
use crate::grid::GridState;
use crate::pattern::Pattern;
use crate::types::{CellPos, PieceId, Rgb, Rotation, WallSegment};

/// Stable 64-bit FNV-1a hasher for the snapshot fingerprint.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub kind: String,
    pub pattern: Pattern,
    pub color: Rgb,
    pub anchor: Anchor,
    pub rotation: Rotation,
    /// Absolute occupied cells, row-major.
    pub cells: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub size: u8,
    /// Bottom to top.
    pub pieces: Vec<PieceSnapshot>,
    /// Topmost piece color per cell, row-major, `size * size` entries.
    pub colors: Vec<Option<Rgb>>,
    pub walls: Vec<WallSegment>,
    pub marks: Vec<CellPos>,
    pub edit_mode: bool,
    pub revision: u64,
    /// FNV-1a over everything except `revision`: equal content, equal fingerprint.
    pub fingerprint: u64,
}

impl GridSnapshot {
    pub fn capture(grid: &GridState, edit_mode: bool) -> Self {
        let size = grid.size();
        let pieces: Vec<PieceSnapshot> = grid
            .pieces()
            .iter()
            .map(|p| PieceSnapshot {
                id: p.id(),
                kind: p.kind().to_string(),
                pattern: p.pattern(),
                color: p.color(),
                anchor: p.anchor(),
                rotation: p.rotation(),
                cells: p.cells().to_vec(),
            })
            .collect();

        let n = size as usize;
        let mut colors = vec![None; n * n];
        for piece in &pieces {
            for &(row, col) in &piece.cells {
                if (0..size as i32).contains(&row) && (0..size as i32).contains(&col) {
                    colors[row as usize * n + col as usize] = Some(piece.color);
                }
            }
        }

        let walls = grid.walls();
        let marks = grid.marks();

        let mut hasher = Fnv1aHasher::new();
        size.hash(&mut hasher);
        pieces.hash(&mut hasher);
        walls.hash(&mut hasher);
        marks.hash(&mut hasher);
        edit_mode.hash(&mut hasher);

        Self {
            size,
            pieces,
            colors,
            walls,
            marks,
            edit_mode,
            revision: grid.revision(),
            fingerprint: hasher.finish(),
        }
    }

    /// Topmost color at `(row, col)`, `None` when empty or off the grid.
    pub fn color_at(&self, row: u8, col: u8) -> Option<Rgb> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.colors[row as usize * self.size as usize + col as usize]
    }

    pub fn has_wall(&self, segment: WallSegment) -> bool {
        self.walls.contains(&segment)
    }

    pub fn is_marked(&self, cell: CellPos) -> bool {
        self.marks.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(240, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 240);

    #[test]
    fn colors_follow_z_order() {
        let mut grid = GridState::new(4);
        grid.place_or_move(None, "O", Pattern::filled(2, 2), RED, Anchor::new(0, 0));
        grid.place_or_move(None, "D", Pattern::filled(1, 2), BLUE, Anchor::new(1, 1));

        let snap = GridSnapshot::capture(&grid, false);
        assert_eq!(snap.pieces.len(), 2);
        assert_eq!(snap.pieces[1].cells, vec![(1, 1), (1, 2)]);
        assert_eq!(snap.color_at(0, 0), Some(RED));
        assert_eq!(snap.color_at(1, 1), Some(BLUE));
        assert_eq!(snap.color_at(1, 2), Some(BLUE));
        assert_eq!(snap.color_at(3, 3), None);
        assert_eq!(snap.color_at(9, 0), None);
        assert_eq!(snap.revision, 2);
    }

    #[test]
    fn fingerprint_tracks_content_not_revision() {
        let mut grid = GridState::new(5);
        let before = GridSnapshot::capture(&grid, false);

        let wall = WallSegment::horizontal(0, 2);
        grid.toggle_wall(wall);
        let with_wall = GridSnapshot::capture(&grid, false);
        assert!(with_wall.has_wall(wall));
        assert_ne!(with_wall.fingerprint, before.fingerprint);

        grid.toggle_wall(wall);
        let after = GridSnapshot::capture(&grid, false);
        assert_eq!(after.fingerprint, before.fingerprint);
        assert_ne!(after.revision, before.revision);

        assert_ne!(GridSnapshot::capture(&grid, true).fingerprint, before.fingerprint);
    }
}
