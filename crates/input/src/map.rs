//! Mapping from terminal events to editor actions and pointer events.

use crate::types::{EditorAction, PixelPos, PointerEvent, PointerKind, PX_PER_COL, PX_PER_ROW};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to editor actions.
pub fn handle_key_event(key: KeyEvent) -> Option<EditorAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('e') | KeyCode::Char('E') => Some(EditorAction::ToggleEditMode),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(EditorAction::ClearPieces),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(EditorAction::ClearWalls),
        KeyCode::Char('g') | KeyCode::Char('G') | KeyCode::Tab => Some(EditorAction::CycleGridSize),
        KeyCode::Char(d @ '4'..='6') => d.to_digit(10).map(|n| EditorAction::SetGridSize(n as u8)),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(EditorAction::Quit),
        _ => None,
    }
}

/// Check if key should quit the editor.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Pixel position of the center of terminal cell `(column, row)`.
pub fn cell_center(column: u16, row: u16) -> PixelPos {
    PixelPos::new(
        column as f32 * PX_PER_COL + PX_PER_COL / 2.0,
        row as f32 * PX_PER_ROW + PX_PER_ROW / 2.0,
    )
}

/// Map left-button mouse input to pointer events. Other buttons and plain
/// motion (no button held) are ignored.
pub fn mouse_to_pointer(mouse: MouseEvent) -> Option<PointerEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerKind::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
        _ => return None,
    };
    Some(PointerEvent {
        kind,
        position: cell_center(mouse.column, mouse.row),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_editor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('e'))),
            Some(EditorAction::ToggleEditMode)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('c'))),
            Some(EditorAction::ClearPieces)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('W'))),
            Some(EditorAction::ClearWalls)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('g'))),
            Some(EditorAction::CycleGridSize)
        );
    }

    #[test]
    fn test_size_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('4'))),
            Some(EditorAction::SetGridSize(4))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('6'))),
            Some(EditorAction::SetGridSize(6))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('7'))), None);
    }

    #[test]
    fn test_ctrl_c_is_not_clear() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), None);
        assert!(should_quit(ctrl_c));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_left_button_maps_to_pointer() {
        let down = mouse_to_pointer(mouse(MouseEventKind::Down(MouseButton::Left), 3, 2)).unwrap();
        assert_eq!(down.kind, PointerKind::Down);
        assert_eq!(down.position, PixelPos::new(28.0, 40.0));

        let drag = mouse_to_pointer(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0)).unwrap();
        assert_eq!(drag.kind, PointerKind::Move);
        assert_eq!(drag.position, PixelPos::new(4.0, 8.0));

        let up = mouse_to_pointer(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1)).unwrap();
        assert_eq!(up.kind, PointerKind::Up);
    }

    #[test]
    fn test_other_mouse_input_is_ignored() {
        assert!(mouse_to_pointer(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)).is_none());
        assert!(mouse_to_pointer(mouse(MouseEventKind::Moved, 0, 0)).is_none());
        assert!(mouse_to_pointer(mouse(MouseEventKind::ScrollUp, 0, 0)).is_none());
    }
}
