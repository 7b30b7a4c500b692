//! Keyboard mapping.

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use strictly_tictactoe::{Mode, Position};

use crate::ui;

/// What a key press asks the shell to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start a game in the given mode.
    Start(Mode),
    /// Return to the mode menu.
    Reset,
    /// Play the square.
    Place(Position),
    /// Play the square under the cursor.
    PlaceAtCursor,
    /// Move the cursor.
    Cursor(KeyCode),
    /// Leave the application.
    Quit,
}

/// Maps a key to an intent. Unbound keys yield `None`.
///
/// Digits follow the board's key map: `1` is top-left, `9` bottom-right.
pub fn intent_for(key: KeyCode) -> Option<Intent> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Char('t') => Some(Intent::Start(Mode::TwoPlayer)),
        KeyCode::Char('a') => Some(Intent::Start(Mode::VsHeuristic)),
        KeyCode::Char('r') => Some(Intent::Reset),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Intent::PlaceAtCursor),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| Position::from_index(d as usize - 1))
            .map(Intent::Place),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Intent::Cursor(key))
        }
        _ => None,
    }
}

/// Maps a left click on a square to placing there.
///
/// `area` is the full screen the board was drawn into.
pub fn intent_for_mouse(area: Rect, mouse: MouseEvent) -> Option<Intent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            ui::cell_at(area, mouse.column, mouse.row).map(Intent::Place)
        }
        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).and_then(|r| Position::at(r, col)),
        KeyCode::Down => Position::at(row + 1, col),
        KeyCode::Left => col.checked_sub(1).and_then(|c| Position::at(row, c)),
        KeyCode::Right => Position::at(row, col + 1),
        _ => None,
    };
    target.unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_digits_map_to_positions() {
        assert_eq!(
            intent_for(KeyCode::Char('1')),
            Some(Intent::Place(Position::TopLeft))
        );
        assert_eq!(
            intent_for(KeyCode::Char('5')),
            Some(Intent::Place(Position::Center))
        );
        assert_eq!(
            intent_for(KeyCode::Char('9')),
            Some(Intent::Place(Position::BottomRight))
        );
        assert_eq!(intent_for(KeyCode::Char('0')), None);
    }

    #[test]
    fn test_mode_keys() {
        assert_eq!(
            intent_for(KeyCode::Char('t')),
            Some(Intent::Start(Mode::TwoPlayer))
        );
        assert_eq!(
            intent_for(KeyCode::Char('a')),
            Some(Intent::Start(Mode::VsHeuristic))
        );
        assert_eq!(intent_for(KeyCode::Esc), Some(Intent::Quit));
    }

    #[test]
    fn test_cursor_moves_within_board() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Down), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Right), Position::TopCenter);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Down),
            Position::BottomRight
        );
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Right),
            Position::BottomRight
        );
    }

    #[test]
    fn test_left_click_places_on_square() {
        let screen = Rect::new(0, 0, 60, 24);
        let (column, row) = (0..screen.width)
            .flat_map(|x| (0..screen.height).map(move |y| (x, y)))
            .find(|&(x, y)| ui::cell_at(screen, x, y) == Some(Position::Center))
            .unwrap();

        assert_eq!(
            intent_for_mouse(screen, mouse(MouseEventKind::Down(MouseButton::Left), column, row)),
            Some(Intent::Place(Position::Center))
        );
        assert_eq!(
            intent_for_mouse(screen, mouse(MouseEventKind::Down(MouseButton::Right), column, row)),
            None
        );
        assert_eq!(
            intent_for_mouse(screen, mouse(MouseEventKind::Down(MouseButton::Left), 0, 0)),
            None
        );
    }
}
