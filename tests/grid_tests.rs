//! Grid state store tests

use grid_sandbox::core::{Anchor, GridChange, GridState, Pattern, RotationPolicy};
use grid_sandbox::types::{CellPos, PieceId, Rgb, Rotation, WallSegment};

const RED: Rgb = Rgb::new(240, 0, 0);
const BLUE: Rgb = Rgb::new(0, 0, 240);

fn t_piece() -> Pattern {
    Pattern::from_rows(&[&[1u8, 1, 1][..], &[0, 1, 0][..]]).unwrap()
}

#[test]
fn test_new_grid_is_empty() {
    let grid = GridState::new(5);
    assert_eq!(grid.size(), 5);
    assert!(grid.pieces().is_empty());
    assert_eq!(grid.wall_count(), 0);
    assert_eq!(grid.mark_count(), 0);
    assert_eq!(grid.revision(), 0);
    for row in 0..5 {
        for col in 0..5 {
            assert_eq!(grid.occupant_color(row, col), None);
        }
    }
}

#[test]
fn test_overlap_topmost_color_wins() {
    let mut grid = GridState::new(4);
    let full = Pattern::filled(4, 4);
    grid.place_or_move(None, "A", full, RED, Anchor::new(0, 0));
    grid.place_or_move(None, "B", full, BLUE, Anchor::new(0, 0));
    assert_eq!(grid.pieces().len(), 2);
    for row in 0..4 {
        for col in 0..4 {
            assert_eq!(grid.occupant_color(row, col), Some(BLUE));
        }
    }
}

#[test]
fn test_move_is_a_single_change() {
    let mut grid = GridState::new(5);
    let id = grid.place_or_move(None, "T", t_piece(), RED, Anchor::new(0, 0));
    grid.drain_changes();
    let before = grid.revision();

    grid.place_or_move(Some(id), "T", t_piece(), RED, Anchor::new(2, 1));
    assert_eq!(grid.revision(), before + 1);
    assert_eq!(grid.drain_changes(), vec![GridChange::Moved(id)]);
    assert_eq!(grid.pieces().len(), 1);
}

#[test]
fn test_toggle_wall_twice_restores() {
    let mut grid = GridState::new(5);
    let wall = WallSegment::from_str("h-0-2").unwrap();
    assert_eq!(grid.toggle_wall(wall), Some(true));
    assert!(grid.has_wall(wall));
    assert_eq!(grid.toggle_wall(wall), Some(false));
    assert!(!grid.has_wall(wall));
    assert_eq!(
        grid.drain_changes(),
        vec![
            GridChange::WallToggled { segment: wall, on: true },
            GridChange::WallToggled { segment: wall, on: false },
        ]
    );
}

#[test]
fn test_clear_walls_keeps_marks_and_pieces() {
    let mut grid = GridState::new(5);
    grid.place_or_move(None, "M", Pattern::SINGLE, RED, Anchor::new(2, 2));
    grid.toggle_wall(WallSegment::vertical(1, 0));
    grid.toggle_wall(WallSegment::horizontal(5, 4));
    grid.toggle_mark(CellPos::new(0, 0));

    grid.clear_walls();
    assert_eq!(grid.wall_count(), 0);
    assert_eq!(grid.mark_count(), 1);
    assert_eq!(grid.pieces().len(), 1);

    grid.clear_pieces();
    assert!(grid.pieces().is_empty());
    assert!(grid.is_marked(CellPos::new(0, 0)));
}

#[test]
fn test_rotate_advances_and_derives_from_original() {
    let mut grid = GridState::new(5);
    let id = grid.place_or_move(None, "T", t_piece(), RED, Anchor::new(1, 1));
    for (expected, turns) in [
        (Rotation::East, 1),
        (Rotation::South, 2),
        (Rotation::West, 3),
        (Rotation::North, 0),
    ] {
        assert!(grid.rotate(id));
        let piece = grid.piece(id).unwrap();
        assert_eq!(piece.rotation(), expected);
        assert_eq!(piece.pattern(), t_piece().rotated(turns));
    }
}

#[test]
fn test_rotate_keeps_piece_in_bounds_by_default() {
    let mut grid = GridState::new(4);
    let id = grid.place_or_move(None, "I", Pattern::filled(1, 4), RED, Anchor::new(3, 0));
    assert!(grid.rotate(id));
    let piece = grid.piece(id).unwrap();
    assert_eq!(piece.anchor(), Anchor::new(0, 0));
    assert!(piece.cells().iter().all(|&(r, c)| (0..4).contains(&r) && (0..4).contains(&c)));
}

#[test]
fn test_rotate_pulls_tall_result_back_onto_grid() {
    let mut grid = GridState::new(4);
    let id = grid.place_or_move(None, "W", Pattern::filled(2, 4), RED, Anchor::new(2, 0));
    grid.drain_changes();
    assert!(grid.rotate(id));
    let piece = grid.piece(id).unwrap();
    assert_eq!(piece.anchor(), Anchor::new(0, 0));
    assert_eq!((piece.pattern().rows(), piece.pattern().cols()), (4, 2));
    assert_eq!(grid.drain_changes(), vec![GridChange::Rotated(id)]);
}

#[test]
fn test_free_rotation_keeps_anchor() {
    let mut grid = GridState::new(4).with_rotation_policy(RotationPolicy::Free);
    let id = grid.place_or_move(None, "I", Pattern::filled(1, 4), RED, Anchor::new(3, 0));
    assert!(grid.rotate(id));
    let piece = grid.piece(id).unwrap();
    assert_eq!(piece.anchor(), Anchor::new(3, 0));
    assert!(piece.cells().iter().any(|&(r, _)| r >= 4));
}

#[test]
fn test_unknown_ids_are_ignored() {
    let mut grid = GridState::new(5);
    assert!(!grid.remove(PieceId(42)));
    assert!(!grid.rotate(PieceId(42)));
    assert_eq!(grid.toggle_wall(WallSegment::vertical(0, 6)), None);
    assert_eq!(grid.revision(), 0);
}
