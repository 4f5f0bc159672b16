//! Coordinate mapper tests

use grid_sandbox::core::{
    block_index, drag_image_origin, map_pointer_to_anchor, raw_anchor, validate, Anchor,
    EditTarget, GridGeometry, GridState, Pattern,
};
use grid_sandbox::types::{CellPos, PixelPos, Rgb, WallSegment};

fn geometry(size: u8) -> GridGeometry {
    GridGeometry::new(PixelPos::new(20.0, 10.0), 33.0, 8.0, size)
}

fn at(g: &GridGeometry, row: f32, col: f32) -> PixelPos {
    let o = g.interior_origin();
    PixelPos::new(o.x + col * g.cell_size, o.y + row * g.cell_size)
}

#[test]
fn test_square_near_corner_is_clamped() {
    let g = geometry(5);
    let pointer = at(&g, 4.3, 4.3);
    assert_eq!(raw_anchor(&g, pointer, 2, 2, None), Anchor::new(4, 4));

    let anchor = map_pointer_to_anchor(&g, pointer, 2, 2, None);
    assert_eq!(anchor, Anchor::new(3, 3));

    let square = Pattern::filled(2, 2);
    assert!(validate(&square, anchor, 5));
    let mut grid = GridState::new(5);
    let id = grid.place_or_move(None, "O", square, Rgb::new(1, 1, 1), anchor);
    let cells = grid.piece(id).unwrap().cells();
    assert_eq!(cells.as_slice(), &[(3, 3), (3, 4), (4, 3), (4, 4)]);
}

#[test]
fn test_grab_point_stays_under_pointer() {
    let g = geometry(6);
    let rows = 2;
    let cols = 3;
    for (grab_x, grab_y) in [(5.0, 5.0), (40.0, 10.0), (90.0, 50.0)] {
        let grab = PixelPos::new(grab_x, grab_y);
        let (block_row, block_col) = block_index(grab, g.cell_size, rows, cols);
        for r in 0..24 {
            for c in 0..24 {
                let pointer = at(&g, r as f32 * 0.25 + 0.1, c as f32 * 0.25 + 0.1);
                let raw = raw_anchor(&g, pointer, rows, cols, Some(grab));
                let clamped = map_pointer_to_anchor(&g, pointer, rows, cols, Some(grab));
                if raw != clamped {
                    continue;
                }
                let (cx, cy) = g.cell_position(pointer);
                assert_eq!((cy + 0.5).floor() as i32, clamped.row + block_row);
                assert_eq!((cx + 0.5).floor() as i32, clamped.col + block_col);
            }
        }
    }
}

#[test]
fn test_oversized_pattern_clamps_to_zero() {
    let g = geometry(4);
    let anchor = map_pointer_to_anchor(&g, at(&g, 2.0, 2.0), 1, 5, None);
    assert_eq!(anchor, Anchor::new(2, 0));
    assert!(!validate(&Pattern::filled(1, 5), anchor, 4));
}

#[test]
fn test_drag_image_is_not_clamped() {
    let origin = drag_image_origin(PixelPos::new(3.0, 4.0), Some(PixelPos::new(10.0, 20.0)));
    assert_eq!(origin, PixelPos::new(-7.0, -16.0));
    assert_eq!(drag_image_origin(PixelPos::new(3.0, 4.0), None), PixelPos::new(3.0, 4.0));
}

#[test]
fn test_edit_hit_testing() {
    let g = geometry(5);
    assert_eq!(
        g.hit_test_edit(at(&g, 0.05, 2.5), 4.0),
        Some(EditTarget::Wall(WallSegment::horizontal(0, 2)))
    );
    assert_eq!(
        g.hit_test_edit(at(&g, 3.5, 5.0), 4.0),
        Some(EditTarget::Wall(WallSegment::vertical(3, 5)))
    );
    assert_eq!(
        g.hit_test_edit(at(&g, 1.5, 1.5), 4.0),
        Some(EditTarget::Cell(CellPos::new(1, 1)))
    );
    assert_eq!(g.hit_test_edit(PixelPos::new(0.0, 0.0), 4.0), None);
}
