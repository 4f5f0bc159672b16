//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the editor.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, input mapping, terminal rendering).
//!
//! # Grid Dimensions
//!
//! Grids are square. The editor offers three sizes (see [`GRID_SIZES`]) and
//! starts at [`DEFAULT_GRID_SIZE`]. Cells are addressed as `(row, col)` with
//! `(0, 0)` in the top-left corner.
//!
//! # Pixel Space
//!
//! Geometry is computed in a virtual pixel space so the placement math is
//! independent of the terminal. The terminal front end maps one character
//! column to [`PX_PER_COL`] pixels and one character row to [`PX_PER_ROW`]
//! pixels:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CELL_SIZE_PX` | 48 | Grid cell pitch, gap included (6 columns x 3 rows) |
//! | `GRID_PADDING_PX` | 16 | Distance from grid border to first cell |
//! | `PALETTE_BLOCK_PX` | 16 | Palette block pitch (2 columns x 1 row) |
//! | `CLICK_SLOP_PX` | 4 | Max pointer travel for a press to count as a click |
//! | `WALL_HIT_TOLERANCE_PX` | 8 | Distance to a grid line that selects a wall |
//!
//! # Examples
//!
//! ```
//! use grid_sandbox_types::{CellPos, Orientation, Rotation, WallSegment};
//!
//! let wall = WallSegment::from_str("h-0-2").unwrap();
//! assert_eq!(wall.orientation, Orientation::Horizontal);
//! assert_eq!(wall.to_string(), "h-0-2");
//!
//! assert_eq!(CellPos::from_str("3-4"), Some(CellPos::new(3, 4)));
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! ```

use std::fmt;
use std::ops::{Add, Sub};

/// Grid size used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: u8 = 5;

/// Grid sizes offered by the size selector.
pub const GRID_SIZES: [u8; 3] = [4, 5, 6];

/// Largest grid size accepted from configuration.
pub const MAX_GRID_SIZE: u8 = 16;

/// Largest pattern dimension (rows or columns). Patterns are stored in a `u64`.
pub const MAX_PATTERN_DIM: u8 = 8;

/// Largest number of set cells a pattern can have.
pub const MAX_PATTERN_CELLS: usize = (MAX_PATTERN_DIM as usize) * (MAX_PATTERN_DIM as usize);

/// Terminal columns per grid cell.
pub const CELL_COLS: u16 = 6;

/// Terminal rows per grid cell.
pub const CELL_ROWS: u16 = 3;

/// Virtual pixels per terminal column.
pub const PX_PER_COL: f32 = 8.0;

/// Virtual pixels per terminal row.
pub const PX_PER_ROW: f32 = 16.0;

/// Grid cell pitch in pixels (includes the inter-cell gap).
pub const CELL_SIZE_PX: f32 = CELL_COLS as f32 * PX_PER_COL;

/// Interior padding between the grid border and the first cell.
pub const GRID_PADDING_PX: f32 = 16.0;

/// Palette block pitch in pixels.
pub const PALETTE_BLOCK_PX: f32 = 16.0;

/// Maximum pointer travel for a press/release pair to count as a click.
pub const CLICK_SLOP_PX: f32 = 4.0;

/// In edit mode, clicks this close to a grid line toggle a wall.
pub const WALL_HIT_TOLERANCE_PX: f32 = 8.0;

/// Main loop tick (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Minimum interval between redraws of an unchanged frame.
pub const STATIC_RENDER_INTERVAL_MS: u64 = 250;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_cell_is_square_in_pixel_space() {
        assert_eq!(CELL_COLS as f32 * PX_PER_COL, CELL_ROWS as f32 * PX_PER_ROW);
        assert_eq!(CELL_SIZE_PX, 48.0);
        assert_eq!(PALETTE_BLOCK_PX, 2.0 * PX_PER_COL);
        assert_eq!(PALETTE_BLOCK_PX, PX_PER_ROW);
    }

    #[test]
    fn ids_parse_and_format() {
        let cell = CellPos::from_str("3-1").unwrap();
        assert_eq!(cell, CellPos::new(3, 1));
        assert_eq!(cell.to_string(), "3-1");
        assert_eq!(CellPos::from_str("3"), None);

        let wall = WallSegment::from_str("H-5-4").unwrap();
        assert_eq!(wall.to_string(), "h-5-4");
    }

    #[test]
    fn edge_ranges_depend_on_orientation() {
        assert!(WallSegment::horizontal(5, 4).in_grid(5));
        assert!(!WallSegment::horizontal(4, 5).in_grid(5));
        assert!(WallSegment::vertical(4, 5).in_grid(5));
        assert!(!WallSegment::vertical(5, 4).in_grid(5));
        assert!(CellPos::new(4, 4).in_grid(5));
        assert!(!CellPos::new(0, 5).in_grid(5));
    }

    #[test]
    fn padding_is_whole_terminal_cells() {
        assert_eq!(GRID_PADDING_PX % PX_PER_COL, 0.0);
        assert_eq!(GRID_PADDING_PX % PX_PER_ROW, 0.0);
    }
}

/// Piece rotation in quarter turns.
///
/// - **North**: as authored (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_sandbox_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from `North`.
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation in degrees: 0, 90, 180 or 270.
    ///
    /// ```
    /// use grid_sandbox_types::Rotation;
    ///
    /// assert_eq!(Rotation::South.degrees(), 180);
    /// ```
    pub fn degrees(&self) -> u16 {
        self.quarter_turns() as u16 * 90
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: u8,
    pub col: u8,
}

impl CellPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Parse a `"row-col"` cell id.
    pub fn from_str(s: &str) -> Option<Self> {
        let (row, col) = s.split_once('-')?;
        Some(Self {
            row: row.parse().ok()?,
            col: col.parse().ok()?,
        })
    }

    /// Whether the cell lies on a grid of the given size.
    pub fn in_grid(&self, size: u8) -> bool {
        self.row < size && self.col < size
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Which family of cell edges a wall segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Edge along the top of cell `(row, col)`; rows run `0..=size`.
    Horizontal,
    /// Edge along the left of cell `(row, col)`; columns run `0..=size`.
    Vertical,
}

/// A toggleable wall on a cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallSegment {
    pub orientation: Orientation,
    pub row: u8,
    pub col: u8,
}

impl WallSegment {
    pub const fn horizontal(row: u8, col: u8) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            row,
            col,
        }
    }

    pub const fn vertical(row: u8, col: u8) -> Self {
        Self {
            orientation: Orientation::Vertical,
            row,
            col,
        }
    }

    /// Parse a wall id (`"h-row-col"` or `"v-row-col"`, case-insensitive prefix).
    ///
    /// ```
    /// use grid_sandbox_types::WallSegment;
    ///
    /// assert_eq!(WallSegment::from_str("v-1-5"), Some(WallSegment::vertical(1, 5)));
    /// assert_eq!(WallSegment::from_str("x-1-5"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, '-');
        let orientation = match parts.next()?.to_lowercase().as_str() {
            "h" => Orientation::Horizontal,
            "v" => Orientation::Vertical,
            _ => return None,
        };
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        Some(Self {
            orientation,
            row,
            col,
        })
    }

    /// Whether the segment exists on a grid of the given size.
    ///
    /// Horizontal edges span `(size + 1) x size`, vertical edges `size x (size + 1)`.
    pub fn in_grid(&self, size: u8) -> bool {
        match self.orientation {
            Orientation::Horizontal => self.row <= size && self.col < size,
            Orientation::Vertical => self.row < size && self.col <= size,
        }
    }
}

impl fmt::Display for WallSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.orientation {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        };
        write!(f, "{}-{}-{}", prefix, self.row, self.col)
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    ///
    /// ```
    /// use grid_sandbox_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#F5BE02"), Some(Rgb::new(0xf5, 0xbe, 0x02)));
    /// assert_eq!(Rgb::from_hex("#fff"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A point (or vector) in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Largest per-axis distance to `other`.
    pub fn chebyshev(&self, other: PixelPos) -> f32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Scale both axes.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Add for PixelPos {
    type Output = PixelPos;

    fn add(self, rhs: PixelPos) -> PixelPos {
        PixelPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PixelPos {
    type Output = PixelPos;

    fn sub(self, rhs: PixelPos) -> PixelPos {
        PixelPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Stable identity of a placed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece-{}", self.0)
    }
}

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in pixel space.
///
/// Targets are resolved by the editor from its own layout, so events carry
/// only a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: PixelPos,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Down,
            position: PixelPos::new(x, y),
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Move,
            position: PixelPos::new(x, y),
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Up,
            position: PixelPos::new(x, y),
        }
    }
}

/// Editor-level commands (keyboard and controls).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Switch between piece mode and wall/mark edit mode
    ToggleEditMode,
    /// Remove every placed piece
    ClearPieces,
    /// Remove every wall
    ClearWalls,
    /// Replace the grid with a fresh one of the given size
    SetGridSize(u8),
    /// Step to the next entry of [`GRID_SIZES`]
    CycleGridSize,
    /// Leave the editor
    Quit,
}

impl EditorAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_sandbox_types::EditorAction;
    ///
    /// assert_eq!(EditorAction::from_str("clearWalls"), Some(EditorAction::ClearWalls));
    /// assert_eq!(EditorAction::from_str("size6"), Some(EditorAction::SetGridSize(6)));
    /// assert_eq!(EditorAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(n) = lower.strip_prefix("size") {
            return n.parse().ok().map(EditorAction::SetGridSize);
        }
        match lower.as_str() {
            "toggleeditmode" => Some(EditorAction::ToggleEditMode),
            "clearpieces" => Some(EditorAction::ClearPieces),
            "clearwalls" => Some(EditorAction::ClearWalls),
            "cyclegridsize" => Some(EditorAction::CycleGridSize),
            "quit" => Some(EditorAction::Quit),
            _ => None,
        }
    }
}

/// Next entry of [`GRID_SIZES`] after `size` (wrapping).
///
/// Sizes outside the list restart at the first entry.
pub fn next_grid_size(size: u8) -> u8 {
    match GRID_SIZES.iter().position(|&s| s == size) {
        Some(i) => GRID_SIZES[(i + 1) % GRID_SIZES.len()],
        None => GRID_SIZES[0],
    }
}
