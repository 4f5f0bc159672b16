//! Drag session controller.
//!
//! `Idle -> Dragging -> (commit | cancel) -> Idle`. At most one session is
//! live. While dragging, pointer moves only refresh the hover preview; the
//! grid is mutated exactly once, when the pointer is released.

use arrayvec::ArrayVec;

use crate::core::{
    drag_image_origin, map_pointer_to_anchor, Anchor, GridGeometry, GridState, Pattern,
};
use crate::place::{apply_place, PlaceError};
use crate::types::{CellPos, PieceId, PixelPos, Rgb, CLICK_SLOP_PX, MAX_PATTERN_CELLS};

/// Where a drag was picked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// A piece already on the grid.
    Piece(PieceId),
    /// A palette template, by index.
    Palette(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub source: DragSource,
    pub kind: String,
    pub pattern: Pattern,
    pub color: Rgb,
    /// Pointer minus the top-left of the grabbed shape, in grid pixels.
    pub grab_offset: Option<PixelPos>,
    pub start: PixelPos,
    pub pointer: PixelPos,
    /// Whether the pointer ever left the click slop around `start`.
    pub moved: bool,
}

impl DragSession {
    pub fn new(
        source: DragSource,
        kind: impl Into<String>,
        pattern: Pattern,
        color: Rgb,
        grab_offset: Option<PixelPos>,
        pointer: PixelPos,
    ) -> Self {
        Self {
            source,
            kind: kind.into(),
            pattern,
            color,
            grab_offset,
            start: pointer,
            pointer,
            moved: false,
        }
    }

    /// The grid piece being dragged, `None` for palette drags.
    pub fn piece_id(&self) -> Option<PieceId> {
        match self.source {
            DragSource::Piece(id) => Some(id),
            DragSource::Palette(_) => None,
        }
    }
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dropped on the grid and placed (or moved) at the given id.
    Committed(PieceId),
    /// Dropped on the grid but rejected; nothing changed.
    Rejected(PlaceError),
    /// A grid piece dropped outside the grid, now removed.
    Removed(PieceId),
    /// A palette shape dropped outside the grid; nothing changed.
    Discarded,
    /// Released without leaving the click slop.
    Click(DragSource),
}

/// What the renderer needs to draw the floating image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragView {
    pub pattern: Pattern,
    pub color: Rgb,
    /// Raw top-left of the image, unclamped.
    pub origin: PixelPos,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a session. Ignored (returns `false`) while another is live.
    pub fn begin(&mut self, session: DragSession) -> bool {
        if self.session.is_some() {
            return false;
        }
        log::debug!("drag start {:?} ({})", session.source, session.kind);
        self.session = Some(session);
        true
    }

    /// Track the pointer. Returns `false` when idle.
    pub fn update(&mut self, pointer: PixelPos) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.pointer = pointer;
        if pointer.chebyshev(session.start) > CLICK_SLOP_PX {
            session.moved = true;
        }
        true
    }

    /// Candidate anchor for the current pointer.
    pub fn hover_anchor(&self, geometry: &GridGeometry) -> Option<Anchor> {
        let session = self.session.as_ref()?;
        if !session.moved || !geometry.contains(session.pointer) {
            return None;
        }
        Some(map_pointer_to_anchor(
            geometry,
            session.pointer,
            session.pattern.rows(),
            session.pattern.cols(),
            session.grab_offset,
        ))
    }

    /// In-bounds cells the piece would cover if dropped now.
    pub fn hover_cells(&self, geometry: &GridGeometry) -> ArrayVec<CellPos, MAX_PATTERN_CELLS> {
        let mut out = ArrayVec::new();
        let (Some(session), Some(anchor)) = (self.session.as_ref(), self.hover_anchor(geometry))
        else {
            return out;
        };
        let n = geometry.size as i32;
        for (i, j) in session.pattern.cells() {
            let (row, col) = (anchor.row + i as i32, anchor.col + j as i32);
            if (0..n).contains(&row) && (0..n).contains(&col) {
                out.push(CellPos::new(row as u8, col as u8));
            }
        }
        out
    }

    pub fn view(&self) -> Option<DragView> {
        let session = self.session.as_ref()?;
        if !session.moved {
            return None;
        }
        Some(DragView {
            pattern: session.pattern,
            color: session.color,
            origin: drag_image_origin(session.pointer, session.grab_offset),
        })
    }

    /// End the session at `pointer` and apply its effect to `grid`.
    ///
    /// Returns `None` when no session was live.
    pub fn finish(
        &mut self,
        grid: &mut GridState,
        geometry: &GridGeometry,
        pointer: PixelPos,
    ) -> Option<DragOutcome> {
        self.update(pointer);
        let session = self.session.take()?;

        if !session.moved {
            return Some(DragOutcome::Click(session.source));
        }

        if geometry.contains(pointer) {
            let anchor = map_pointer_to_anchor(
                geometry,
                pointer,
                session.pattern.rows(),
                session.pattern.cols(),
                session.grab_offset,
            );
            let outcome = match apply_place(
                grid,
                session.piece_id(),
                &session.kind,
                session.pattern,
                session.color,
                anchor,
            ) {
                Ok(id) => DragOutcome::Committed(id),
                Err(err) => {
                    log::debug!(
                        "drop of {} at ({}, {}) rejected: {}",
                        session.kind,
                        anchor.row,
                        anchor.col,
                        err.message()
                    );
                    DragOutcome::Rejected(err)
                }
            };
            return Some(outcome);
        }

        Some(match session.piece_id() {
            Some(id) => {
                grid.remove(id);
                DragOutcome::Removed(id)
            }
            None => DragOutcome::Discarded,
        })
    }

    /// Drop the session without touching the grid.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridChange;

    const RED: Rgb = Rgb::new(240, 0, 0);

    fn geom() -> GridGeometry {
        GridGeometry::new(PixelPos::new(0.0, 0.0), 40.0, 10.0, 5)
    }

    /// Pixel point at fractional cell coordinates.
    fn at(g: &GridGeometry, row: f32, col: f32) -> PixelPos {
        let o = g.interior_origin();
        PixelPos::new(o.x + col * g.cell_size, o.y + row * g.cell_size)
    }

    fn palette_drag(pattern: Pattern, pointer: PixelPos) -> DragSession {
        DragSession::new(DragSource::Palette(0), "O", pattern, RED, None, pointer)
    }

    #[test]
    fn second_begin_is_ignored() {
        let mut drag = DragController::new();
        assert!(drag.begin(palette_drag(Pattern::SINGLE, PixelPos::new(300.0, 0.0))));
        assert!(!drag.begin(palette_drag(Pattern::filled(2, 2), PixelPos::new(300.0, 0.0))));
        assert_eq!(drag.session().unwrap().pattern, Pattern::SINGLE);
    }

    #[test]
    fn palette_drop_on_grid_commits_clamped_anchor() {
        let g = geom();
        let mut grid = GridState::new(5);
        let mut drag = DragController::new();
        drag.begin(palette_drag(Pattern::filled(2, 2), PixelPos::new(400.0, 400.0)));

        let pointer = at(&g, 4.2, 4.2);
        drag.update(pointer);
        assert_eq!(drag.hover_anchor(&g), Some(Anchor::new(3, 3)));
        assert_eq!(drag.hover_cells(&g).len(), 4);
        assert_eq!(grid.revision(), 0);

        let outcome = drag.finish(&mut grid, &g, pointer).unwrap();
        let DragOutcome::Committed(id) = outcome else {
            panic!("expected commit, got {:?}", outcome);
        };
        let cells = grid.piece(id).unwrap().cells();
        assert_eq!(cells.as_slice(), &[(3, 3), (3, 4), (4, 3), (4, 4)]);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn grid_piece_dropped_outside_is_removed() {
        let g = geom();
        let mut grid = GridState::new(5);
        let id = grid.place_or_move(None, "O", Pattern::filled(2, 2), RED, Anchor::new(0, 0));
        grid.drain_changes();

        let mut drag = DragController::new();
        drag.begin(DragSession::new(
            DragSource::Piece(id),
            "O",
            Pattern::filled(2, 2),
            RED,
            Some(PixelPos::new(5.0, 5.0)),
            at(&g, 0.2, 0.2),
        ));
        let outcome = drag.finish(&mut grid, &g, PixelPos::new(900.0, 20.0));
        assert_eq!(outcome, Some(DragOutcome::Removed(id)));
        assert!(grid.piece(id).is_none());
        assert_eq!(grid.drain_changes(), vec![GridChange::Removed(id)]);
    }

    #[test]
    fn palette_drop_outside_creates_nothing() {
        let g = geom();
        let mut grid = GridState::new(5);
        let mut drag = DragController::new();
        drag.begin(palette_drag(Pattern::SINGLE, PixelPos::new(400.0, 400.0)));
        assert_eq!(
            drag.finish(&mut grid, &g, PixelPos::new(500.0, 500.0)),
            Some(DragOutcome::Discarded)
        );
        assert_eq!(grid.revision(), 0);
    }

    #[test]
    fn release_within_slop_is_a_click() {
        let g = geom();
        let mut grid = GridState::new(5);
        let mut drag = DragController::new();
        let start = at(&g, 1.5, 1.5);
        drag.begin(palette_drag(Pattern::SINGLE, start));
        drag.update(start + PixelPos::new(CLICK_SLOP_PX, -1.0));
        assert!(drag.view().is_none());
        assert_eq!(
            drag.finish(&mut grid, &g, start),
            Some(DragOutcome::Click(DragSource::Palette(0)))
        );
        assert_eq!(grid.revision(), 0);
    }

    #[test]
    fn drag_image_tracks_raw_pointer() {
        let mut drag = DragController::new();
        drag.begin(DragSession::new(
            DragSource::Palette(2),
            "T",
            Pattern::SINGLE,
            RED,
            Some(PixelPos::new(12.0, 30.0)),
            PixelPos::new(0.0, 0.0),
        ));
        drag.update(PixelPos::new(-100.0, 7.0));
        let view = drag.view().unwrap();
        assert_eq!(view.origin, PixelPos::new(-112.0, -23.0));
    }

    #[test]
    fn finish_when_idle_is_none() {
        let mut drag = DragController::new();
        let mut grid = GridState::new(5);
        assert_eq!(drag.finish(&mut grid, &geom(), PixelPos::new(0.0, 0.0)), None);
    }
}
