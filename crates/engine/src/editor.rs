//! Editor facade: one grid, its palette and the pointer/keyboard routing.
//!
//! The layout collaborator (the terminal view) owns where things are drawn
//! and pushes that into the editor with [`Editor::set_geometry`] and
//! [`Editor::set_palette_slots`]. The editor never computes layout itself.

use arrayvec::ArrayVec;

use crate::config::EditorConfig;
use crate::core::{
    EditTarget, GridGeometry, GridSnapshot, GridState, Palette, PixelRect, RotationPolicy,
};
use crate::drag::{DragController, DragOutcome, DragSession, DragSource, DragView};
use crate::types::{
    next_grid_size, CellPos, EditorAction, PixelPos, PointerEvent, PointerKind, MAX_PATTERN_CELLS,
};

/// Where a palette template is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteSlot {
    pub index: usize,
    /// Top-left of the template's bounding box.
    pub origin: PixelPos,
    /// Block pitch inside the slot (may be smaller than the grid cell).
    pub block_px: f32,
}

pub struct Editor {
    grid: GridState,
    drag: DragController,
    palette: Palette,
    geometry: GridGeometry,
    slots: Vec<PaletteSlot>,
    edit_mode: bool,
    rotation_policy: RotationPolicy,
    last_outcome: Option<DragOutcome>,
}

impl Editor {
    pub fn new(size: u8, palette: Palette, rotation_policy: RotationPolicy) -> Self {
        let grid = GridState::new(size).with_rotation_policy(rotation_policy);
        let geometry = GridGeometry::with_defaults(PixelPos::default(), grid.size());
        Self {
            grid,
            drag: DragController::new(),
            palette,
            geometry,
            slots: Vec::new(),
            edit_mode: false,
            rotation_policy,
            last_outcome: None,
        }
    }

    pub fn from_config(config: &EditorConfig, palette: Palette) -> Self {
        Self::new(config.grid_size, palette, config.rotation_policy)
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn palette_slots(&self) -> &[PaletteSlot] {
        &self.slots
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Replace the geometry cache. The size always follows the grid.
    pub fn set_geometry(&mut self, geometry: GridGeometry) {
        self.geometry = GridGeometry {
            size: self.grid.size(),
            ..geometry
        };
    }

    pub fn set_palette_slots(&mut self, slots: Vec<PaletteSlot>) {
        self.slots = slots;
    }

    /// Pixel rectangle of a palette slot, `None` for a stale index.
    pub fn slot_rect(&self, slot: &PaletteSlot) -> Option<PixelRect> {
        let template = self.palette.get(slot.index)?;
        Some(PixelRect::new(
            slot.origin.x,
            slot.origin.y,
            template.pattern.cols() as f32 * slot.block_px,
            template.pattern.rows() as f32 * slot.block_px,
        ))
    }

    /// Outcome of the most recent drag, consumed by the caller.
    pub fn take_last_outcome(&mut self) -> Option<DragOutcome> {
        self.last_outcome.take()
    }

    /// Route one pointer event. Returns `true` when anything visible changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let p = event.position;
        match event.kind {
            PointerKind::Down => self.pointer_down(p),
            PointerKind::Move => self.drag.update(p),
            PointerKind::Up => {
                let Some(outcome) = self.drag.finish(&mut self.grid, &self.geometry, p) else {
                    return false;
                };
                match outcome {
                    DragOutcome::Click(DragSource::Piece(id)) => {
                        self.grid.rotate(id);
                    }
                    DragOutcome::Click(DragSource::Palette(index)) => {
                        self.palette.rotate(index);
                    }
                    _ => {}
                }
                self.last_outcome = Some(outcome);
                true
            }
        }
    }

    fn pointer_down(&mut self, p: PixelPos) -> bool {
        if self.drag.is_dragging() {
            return false;
        }

        if self.edit_mode {
            return match self.geometry.edit_target_at(p) {
                Some(EditTarget::Wall(segment)) => self.grid.toggle_wall(segment).is_some(),
                Some(EditTarget::Cell(cell)) => self.grid.toggle_mark(cell).is_some(),
                None => false,
            };
        }

        if let Some(session) = self.piece_session_at(p).or_else(|| self.palette_session_at(p)) {
            return self.drag.begin(session);
        }
        false
    }

    fn piece_session_at(&self, p: PixelPos) -> Option<DragSession> {
        let piece = self.grid.pieces().iter().rev().find(|piece| {
            piece
                .cells()
                .iter()
                .any(|&(row, col)| self.geometry.cell_rect(row, col).contains(p))
        })?;
        let pattern = piece.pattern();
        let rect = self
            .geometry
            .piece_rect(piece.anchor(), pattern.rows(), pattern.cols());
        Some(DragSession::new(
            DragSource::Piece(piece.id()),
            piece.kind(),
            pattern,
            piece.color(),
            Some(p - rect.origin()),
            p,
        ))
    }

    fn palette_session_at(&self, p: PixelPos) -> Option<DragSession> {
        self.slots.iter().find_map(|slot| {
            let rect = self.slot_rect(slot)?;
            if !rect.contains(p) {
                return None;
            }
            let template = self.palette.get(slot.index)?;
            let scale = self.geometry.cell_size / slot.block_px;
            Some(DragSession::new(
                DragSource::Palette(slot.index),
                template.kind.as_str(),
                template.pattern,
                template.color,
                Some((p - slot.origin).scale(scale)),
                p,
            ))
        })
    }

    /// Apply a keyboard/control action. Returns `true` for [`EditorAction::Quit`].
    pub fn apply_action(&mut self, action: EditorAction) -> bool {
        match action {
            EditorAction::ToggleEditMode => {
                self.drag.cancel();
                self.edit_mode = !self.edit_mode;
                log::info!("edit mode {}", if self.edit_mode { "on" } else { "off" });
            }
            EditorAction::ClearPieces => self.grid.clear_pieces(),
            EditorAction::ClearWalls => self.grid.clear_walls(),
            EditorAction::SetGridSize(size) => self.reset_grid(size),
            EditorAction::CycleGridSize => self.reset_grid(next_grid_size(self.grid.size())),
            EditorAction::Quit => return true,
        }
        false
    }

    /// Replace the grid with a fresh instance of `size`.
    fn reset_grid(&mut self, size: u8) {
        self.drag.cancel();
        self.grid = GridState::new(size).with_rotation_policy(self.rotation_policy);
        self.geometry.size = self.grid.size();
        self.last_outcome = None;
        log::info!("grid reset to {}x{}", self.grid.size(), self.grid.size());
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid, self.edit_mode)
    }

    /// Cells highlighted by the live drag.
    pub fn hover_cells(&self) -> ArrayVec<CellPos, MAX_PATTERN_CELLS> {
        self.drag.hover_cells(&self.geometry)
    }

    pub fn drag_view(&self) -> Option<DragView> {
        self.drag.view()
    }
}
