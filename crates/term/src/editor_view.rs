//! EditorView: lays out an [`Editor`] on the terminal and draws it into a
//! framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The view is the layout collaborator: [`EditorView::sync_layout`] pushes the
//! grid geometry and palette slots into the editor, and
//! [`EditorView::render_into`] draws from those same caches, so what is
//! drawn and what is hit-tested always agree.

use crate::core::{GridGeometry, GridSnapshot, Palette};
use crate::engine::{DragView, Editor, PaletteSlot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Orientation, PixelPos, CELL_COLS, CELL_ROWS, GRID_PADDING_PX, PALETTE_BLOCK_PX, PX_PER_COL,
    PX_PER_ROW,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the grid and palette go for one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub geometry: GridGeometry,
    pub slots: Vec<PaletteSlot>,
}

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const GRID_BG: Rgb = Rgb::new(30, 30, 40);
const EDIT_BG: Rgb = Rgb::new(40, 34, 30);
const HOVER_BG: Rgb = Rgb::new(70, 110, 80);
const WALL_FG: Rgb = Rgb::new(250, 200, 60);
const MARK_FG: Rgb = Rgb::new(240, 90, 90);
const TEXT_FG: Rgb = Rgb::new(220, 220, 220);

/// Columns reserved left of each palette shape for its label.
const LABEL_COLS: u16 = 3;

pub struct EditorView {
    /// Top-left terminal cell of the grid frame.
    grid_x: u16,
    grid_y: u16,
}

impl Default for EditorView {
    fn default() -> Self {
        Self {
            grid_x: 2,
            grid_y: 2,
        }
    }
}

fn col_of(px: f32) -> i32 {
    (px / PX_PER_COL).floor() as i32
}

fn row_of(px: f32) -> i32 {
    (px / PX_PER_ROW).floor() as i32
}

impl EditorView {
    pub fn new(grid_x: u16, grid_y: u16) -> Self {
        Self { grid_x, grid_y }
    }

    /// Compute the layout for a grid of `size` and the given palette.
    ///
    /// Palette shapes are stacked top to bottom right of the grid and wrap
    /// into another column when the viewport is too short.
    pub fn layout(&self, size: u8, palette: &Palette, viewport: Viewport) -> Layout {
        let origin = PixelPos::new(
            self.grid_x as f32 * PX_PER_COL,
            self.grid_y as f32 * PX_PER_ROW,
        );
        let geometry = GridGeometry::with_defaults(origin, size);

        let pad_cols = (GRID_PADDING_PX / PX_PER_COL) as u16;
        let grid_w = size as u16 * CELL_COLS + 2 * pad_cols;
        let block_cols = (PALETTE_BLOCK_PX / PX_PER_COL) as u16;
        let block_rows = (PALETTE_BLOCK_PX / PX_PER_ROW) as u16;

        let widest = palette
            .templates()
            .iter()
            .map(|t| t.pattern.cols() as u16)
            .max()
            .unwrap_or(1);
        let column_w = LABEL_COLS + widest * block_cols + 2;
        let top = self.grid_y + 1;
        let bottom = viewport.height.saturating_sub(2);

        let mut x = self.grid_x + grid_w + 3;
        let mut y = top;
        let mut slots = Vec::with_capacity(palette.len());
        for (index, template) in palette.templates().iter().enumerate() {
            let h = template.pattern.rows() as u16 * block_rows;
            if y + h > bottom && y > top {
                x += column_w;
                y = top;
            }
            slots.push(PaletteSlot {
                index,
                origin: PixelPos::new(
                    (x + LABEL_COLS) as f32 * PX_PER_COL,
                    y as f32 * PX_PER_ROW,
                ),
                block_px: PALETTE_BLOCK_PX,
            });
            y += h + 1;
        }

        Layout { geometry, slots }
    }

    /// Push the layout for `viewport` into the editor's geometry caches.
    pub fn sync_layout(&self, editor: &mut Editor, viewport: Viewport) {
        let layout = self.layout(editor.grid().size(), editor.palette(), viewport);
        editor.set_geometry(layout.geometry);
        editor.set_palette_slots(layout.slots);
    }

    /// Render the editor into an existing framebuffer.
    pub fn render_into(&self, editor: &Editor, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT_FG, SCREEN_BG).cell(' '));

        let snap = editor.snapshot();
        let geometry = *editor.geometry();

        self.draw_title(fb, &snap);
        self.draw_grid(fb, &snap, &geometry);

        for cell in editor.hover_cells() {
            let (x, y) = cell_origin(&geometry, cell.row as i32, cell.col as i32);
            fb.tint_rect(
                (x + 1).max(0) as u16,
                y.max(0) as u16,
                CELL_COLS - 2,
                CELL_ROWS,
                HOVER_BG,
            );
        }

        self.draw_walls(fb, &snap, &geometry);
        self.draw_palette(fb, editor);

        if let Some(view) = editor.drag_view() {
            self.draw_drag_image(fb, &view);
        }

        self.draw_status(fb, &snap, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, editor: &Editor, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(editor, viewport, &mut fb);
        fb
    }

    fn draw_title(&self, fb: &mut FrameBuffer, snap: &GridSnapshot) {
        let title = CellStyle {
            bold: true,
            ..CellStyle::new(TEXT_FG, SCREEN_BG)
        };
        let value = CellStyle::new(TEXT_FG, SCREEN_BG);
        let x = self.grid_x;
        fb.put_str(x, 0, "GRID SANDBOX", title);
        fb.put_u32(x + 14, 0, snap.size as u32, value);
        let digits = if snap.size >= 10 { 2 } else { 1 };
        fb.put_char(x + 14 + digits, 0, 'x', value);
        fb.put_u32(x + 15 + digits, 0, snap.size as u32, value);
        let mode = if snap.edit_mode { "EDIT" } else { "PIECES" };
        fb.put_str(x + 16 + 2 * digits, 0, mode, CellStyle { bold: true, ..value });
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, snap: &GridSnapshot, geometry: &GridGeometry) {
        let bounds = geometry.bounds();
        let x = col_of(bounds.x);
        let y = row_of(bounds.y);
        let w = (bounds.w / PX_PER_COL).round() as u16;
        let h = (bounds.h / PX_PER_ROW).round() as u16;
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u16, y as u16);

        let bg = if snap.edit_mode { EDIT_BG } else { GRID_BG };
        fb.fill_rect(x, y, w, h, ' ', CellStyle::new(TEXT_FG, bg));
        draw_border(fb, x, y, w, h, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        let dot = CellStyle {
            dim: true,
            ..CellStyle::new(Rgb::new(90, 90, 100), bg)
        };
        for row in 0..snap.size {
            for col in 0..snap.size {
                let (cx, cy) = cell_origin(geometry, row as i32, col as i32);
                let (cx, cy) = (cx.max(0) as u16, cy.max(0) as u16);
                match snap.color_at(row, col) {
                    Some(color) => {
                        let fill = CellStyle::new(color, color);
                        fb.fill_rect(cx + 1, cy, CELL_COLS - 2, CELL_ROWS, ' ', fill);
                    }
                    None => fb.put_char(cx + CELL_COLS / 2 - 1, cy + CELL_ROWS / 2, '·', dot),
                }
            }
        }

        for mark in &snap.marks {
            let (cx, cy) = cell_origin(geometry, mark.row as i32, mark.col as i32);
            let (x, y) = (cx + CELL_COLS as i32 / 2 - 1, cy + CELL_ROWS as i32 / 2);
            put_keep_bg(fb, x, y, '◆', MARK_FG);
        }
    }

    fn draw_walls(&self, fb: &mut FrameBuffer, snap: &GridSnapshot, geometry: &GridGeometry) {
        let n = snap.size;
        for wall in &snap.walls {
            match wall.orientation {
                Orientation::Horizontal => {
                    let (ch, row) = if wall.row < n {
                        ('▀', cell_origin(geometry, wall.row as i32, wall.col as i32).1)
                    } else {
                        ('▄', cell_origin(geometry, n as i32, 0).1 - 1)
                    };
                    let x = cell_origin(geometry, 0, wall.col as i32).0;
                    for dx in 0..CELL_COLS as i32 {
                        put_keep_bg(fb, x + dx, row, ch, WALL_FG);
                    }
                }
                Orientation::Vertical => {
                    let (ch, col) = if wall.col < n {
                        ('▌', cell_origin(geometry, 0, wall.col as i32).0)
                    } else {
                        ('▐', cell_origin(geometry, 0, n as i32).0 - 1)
                    };
                    let y = cell_origin(geometry, wall.row as i32, 0).1;
                    for dy in 0..CELL_ROWS as i32 {
                        put_keep_bg(fb, col, y + dy, ch, WALL_FG);
                    }
                }
            }
        }
    }

    fn draw_palette(&self, fb: &mut FrameBuffer, editor: &Editor) {
        let label = CellStyle {
            dim: true,
            ..CellStyle::new(TEXT_FG, SCREEN_BG)
        };
        let block_cols = (PALETTE_BLOCK_PX / PX_PER_COL) as i32;
        let block_rows = (PALETTE_BLOCK_PX / PX_PER_ROW) as i32;

        if let Some(first) = editor.palette_slots().first() {
            let x = col_of(first.origin.x) - LABEL_COLS as i32;
            if x >= 0 {
                fb.put_str(x as u16, self.grid_y, "PIECES", CellStyle { bold: true, ..label });
            }
        }

        for slot in editor.palette_slots() {
            let Some(template) = editor.palette().get(slot.index) else {
                continue;
            };
            let x = col_of(slot.origin.x);
            let y = row_of(slot.origin.y);
            if x >= LABEL_COLS as i32 && y >= 0 {
                let name: String = template.kind.chars().take(LABEL_COLS as usize - 1).collect();
                fb.put_str((x - LABEL_COLS as i32) as u16, y as u16, &name, label);
            }
            let style = CellStyle::new(template.color, SCREEN_BG);
            for (i, j) in template.pattern.cells() {
                for dy in 0..block_rows {
                    for dx in 0..block_cols {
                        fb.set_signed(
                            x + j as i32 * block_cols + dx,
                            y + i as i32 * block_rows + dy,
                            style.cell('█'),
                        );
                    }
                }
            }
        }
    }

    fn draw_drag_image(&self, fb: &mut FrameBuffer, view: &DragView) {
        let x = col_of(view.origin.x);
        let y = row_of(view.origin.y);
        for (i, j) in view.pattern.cells() {
            let cx = x + j as i32 * CELL_COLS as i32;
            let cy = y + i as i32 * CELL_ROWS as i32;
            for dy in 0..CELL_ROWS as i32 {
                for dx in 1..CELL_COLS as i32 - 1 {
                    put_keep_bg(fb, cx + dx, cy + dy, '▓', view.color);
                }
            }
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GridSnapshot, viewport: Viewport) {
        if viewport.height < 2 {
            return;
        }
        let value = CellStyle::new(TEXT_FG, SCREEN_BG);
        let dim = CellStyle { dim: true, ..value };

        let y = viewport.height - 2;
        let mut x = self.grid_x;
        for (name, count) in [
            ("pieces", snap.pieces.len()),
            ("walls", snap.walls.len()),
            ("marks", snap.marks.len()),
        ] {
            fb.put_str(x, y, name, dim);
            x += name.len() as u16 + 1;
            fb.put_u32(x, y, count as u32, value);
            x += 5;
        }

        let help = if snap.edit_mode {
            "click edge: wall  click cell: mark  e: pieces  w: clear walls  q: quit"
        } else {
            "drag: place/move  click: rotate  e: edit  c: clear  w: clear walls  g/4-6: size  q: quit"
        };
        fb.put_str(self.grid_x, viewport.height - 1, help, dim);
    }
}

/// Terminal cell of the top-left character of grid cell `(row, col)`.
fn cell_origin(geometry: &GridGeometry, row: i32, col: i32) -> (i32, i32) {
    let rect = geometry.cell_rect(row, col);
    (col_of(rect.x), row_of(rect.y))
}

/// Draw a glyph in `fg`, keeping the background already in the framebuffer.
fn put_keep_bg(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, fg: Rgb) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u16, y as u16);
    let Some(existing) = fb.get(x, y) else {
        return;
    };
    let style = CellStyle {
        fg,
        bold: true,
        ..existing.style
    };
    fb.put_char(x, y, ch, style);
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
