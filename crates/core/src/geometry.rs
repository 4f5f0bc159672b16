//! Geometry module - maps continuous pointer positions onto the discrete grid
//!
//! All coordinates are in pixel space (see [`crate::types`]). A
//! [`GridGeometry`] is a read-only snapshot of where the grid is drawn; it is
//! refreshed by the layout collaborator on resize and never touched by state
//! mutations.
//!
//! The central operation is [`map_pointer_to_anchor`]: given the pointer and
//! the grab offset captured when the drag started, it returns the anchor that
//! keeps the grabbed block of the pattern under the pointer.

use crate::types::{
    CellPos, PixelPos, WallSegment, CELL_SIZE_PX, GRID_PADDING_PX, WALL_HIT_TOLERANCE_PX,
};

/// Grid row/column assigned to a pattern's local `(0, 0)` cell.
///
/// Signed because raw (unclamped) anchors may lie off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Anchor {
    pub row: i32,
    pub col: i32,
}

impl Anchor {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PixelRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn origin(&self) -> PixelPos {
        PixelPos::new(self.x, self.y)
    }

    /// Half-open containment: left/top edges inside, right/bottom outside.
    pub fn contains(&self, p: PixelPos) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.w && p.y < self.y + self.h
    }
}

/// What an edit-mode click lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Wall(WallSegment),
    Cell(CellPos),
}

/// Where the grid is drawn, as consumed by the coordinate mapper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Top-left corner of the grid container (border included).
    pub origin: PixelPos,
    /// Cell pitch, inter-cell gap included.
    pub cell_size: f32,
    /// Distance from the container edge to the first cell.
    pub padding: f32,
    /// Grid size in cells.
    pub size: u8,
}

impl GridGeometry {
    pub fn new(origin: PixelPos, cell_size: f32, padding: f32, size: u8) -> Self {
        Self {
            origin,
            cell_size,
            padding,
            size,
        }
    }

    /// Geometry with the terminal front end's cell pitch and padding.
    pub fn with_defaults(origin: PixelPos, size: u8) -> Self {
        Self::new(origin, CELL_SIZE_PX, GRID_PADDING_PX, size)
    }

    /// Top-left of cell `(0, 0)`.
    pub fn interior_origin(&self) -> PixelPos {
        PixelPos::new(self.origin.x + self.padding, self.origin.y + self.padding)
    }

    /// The whole container (the drop surface).
    pub fn bounds(&self) -> PixelRect {
        let side = self.padding * 2.0 + self.size as f32 * self.cell_size;
        PixelRect::new(self.origin.x, self.origin.y, side, side)
    }

    /// Whether `p` is over the drop surface.
    pub fn contains(&self, p: PixelPos) -> bool {
        self.bounds().contains(p)
    }

    pub fn cell_rect(&self, row: i32, col: i32) -> PixelRect {
        let o = self.interior_origin();
        PixelRect::new(
            o.x + col as f32 * self.cell_size,
            o.y + row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Rectangle covered by a `rows x cols` pattern at `anchor`.
    pub fn piece_rect(&self, anchor: Anchor, rows: u8, cols: u8) -> PixelRect {
        let top_left = self.cell_rect(anchor.row, anchor.col);
        PixelRect::new(
            top_left.x,
            top_left.y,
            cols as f32 * self.cell_size,
            rows as f32 * self.cell_size,
        )
    }

    /// Fractional cell coordinates `(cell_x, cell_y)` of a point, relative to
    /// the grid interior.
    pub fn cell_position(&self, p: PixelPos) -> (f32, f32) {
        let o = self.interior_origin();
        ((p.x - o.x) / self.cell_size, (p.y - o.y) / self.cell_size)
    }

    /// Cell containing `p`, `None` outside the interior.
    pub fn cell_at(&self, p: PixelPos) -> Option<CellPos> {
        let (cx, cy) = self.cell_position(p);
        let (col, row) = (cx.floor(), cy.floor());
        let n = self.size as f32;
        if col < 0.0 || row < 0.0 || col >= n || row >= n {
            return None;
        }
        Some(CellPos::new(row as u8, col as u8))
    }

    /// Resolve an edit-mode click.
    ///
    /// A click within `tolerance` pixels of a grid line selects the nearest
    /// wall segment on that line (vertical wins a tie); otherwise the cell
    /// under the pointer is selected for marking.
    pub fn hit_test_edit(&self, p: PixelPos, tolerance: f32) -> Option<EditTarget> {
        if !self.contains(p) {
            return None;
        }
        let (cx, cy) = self.cell_position(p);
        let n = self.size as i32;

        let line_x = cx.round();
        let line_y = cy.round();
        let dist_v = (cx - line_x).abs() * self.cell_size;
        let dist_h = (cy - line_y).abs() * self.cell_size;

        let vertical = {
            let (col, row) = (line_x as i32, cy.floor() as i32);
            (dist_v <= tolerance && (0..=n).contains(&col) && (0..n).contains(&row))
                .then(|| WallSegment::vertical(row as u8, col as u8))
        };
        let horizontal = {
            let (row, col) = (line_y as i32, cx.floor() as i32);
            (dist_h <= tolerance && (0..=n).contains(&row) && (0..n).contains(&col))
                .then(|| WallSegment::horizontal(row as u8, col as u8))
        };

        match (vertical, horizontal) {
            (Some(v), Some(h)) => Some(EditTarget::Wall(if dist_h < dist_v { h } else { v })),
            (Some(v), None) => Some(EditTarget::Wall(v)),
            (None, Some(h)) => Some(EditTarget::Wall(h)),
            (None, None) => self.cell_at(p).map(EditTarget::Cell),
        }
    }

    /// [`GridGeometry::hit_test_edit`] with the default tolerance.
    pub fn edit_target_at(&self, p: PixelPos) -> Option<EditTarget> {
        self.hit_test_edit(p, WALL_HIT_TOLERANCE_PX)
    }
}

/// Which block of a `rows x cols` pattern a grab offset falls in, as `(row, col)`.
///
/// Offsets outside the pattern are clamped to its edge blocks.
pub fn block_index(grab_offset: PixelPos, cell_size: f32, rows: u8, cols: u8) -> (i32, i32) {
    let clamp = |v: f32, dim: u8| ((v / cell_size).floor() as i32).clamp(0, dim.max(1) as i32 - 1);
    (clamp(grab_offset.y, rows), clamp(grab_offset.x, cols))
}

/// Round half up, as used for the pointer cell.
#[inline(always)]
fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Candidate anchor before clamping: the pointer's nearest cell minus the
/// grabbed block index. A missing grab offset counts as `(0, 0)`.
pub fn raw_anchor(
    geometry: &GridGeometry,
    pointer: PixelPos,
    rows: u8,
    cols: u8,
    grab_offset: Option<PixelPos>,
) -> Anchor {
    let grab = grab_offset.unwrap_or_default();
    let (block_row, block_col) = block_index(grab, geometry.cell_size, rows, cols);
    let (cell_x, cell_y) = geometry.cell_position(pointer);
    Anchor::new(round_half_up(cell_y) - block_row, round_half_up(cell_x) - block_col)
}

/// Clamp an anchor so a `rows x cols` pattern stays within `[0, size - dim]`
/// on each axis. When the pattern is larger than the grid the anchor is 0.
pub fn clamp_anchor(anchor: Anchor, rows: u8, cols: u8, size: u8) -> Anchor {
    let max_row = size as i32 - rows as i32;
    let max_col = size as i32 - cols as i32;
    Anchor::new(anchor.row.min(max_row).max(0), anchor.col.min(max_col).max(0))
}

/// Map a pointer position to the anchor used for hover preview and drop.
pub fn map_pointer_to_anchor(
    geometry: &GridGeometry,
    pointer: PixelPos,
    rows: u8,
    cols: u8,
    grab_offset: Option<PixelPos>,
) -> Anchor {
    let raw = raw_anchor(geometry, pointer, rows, cols, grab_offset);
    clamp_anchor(raw, rows, cols, geometry.size)
}

/// Unclamped top-left of the floating drag image: it tracks the raw pointer
/// pixel-for-pixel, independent of the grid.
pub fn drag_image_origin(pointer: PixelPos, grab_offset: Option<PixelPos>) -> PixelPos {
    pointer - grab_offset.unwrap_or_default()
}
