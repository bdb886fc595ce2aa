//! Key mapping from terminal events to board and dialog actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cursor direction on the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Action taken while the board has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Move(Direction),
    /// Flip the card under the cursor.
    Flip,
    NewGame,
    ShowLeaderboard,
}

/// Action taken while a dialog has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Input(char),
    Backspace,
    Confirm,
    Cancel,
    Retry,
    PlayAgain,
}

/// Map keyboard input on the board.
pub fn map_board_key(key: KeyEvent) -> Option<BoardAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(BoardAction::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(BoardAction::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(BoardAction::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(BoardAction::Move(Direction::Down))
        }

        KeyCode::Enter | KeyCode::Char(' ') => Some(BoardAction::Flip),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(BoardAction::NewGame),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(BoardAction::ShowLeaderboard),

        _ => None,
    }
}

/// Map keyboard input in a dialog.
///
/// With `text_entry` set, printable characters are typed into the focused
/// field instead of being read as commands.
pub fn map_dialog_key(key: KeyEvent, text_entry: bool) -> Option<DialogAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Enter => Some(DialogAction::Confirm),
        KeyCode::Esc => Some(DialogAction::Cancel),
        KeyCode::Backspace if text_entry => Some(DialogAction::Backspace),
        KeyCode::Char(c) if text_entry && !c.is_control() => Some(DialogAction::Input(c)),

        KeyCode::Char('r') | KeyCode::Char('R') if !text_entry => Some(DialogAction::Retry),
        KeyCode::Char('p') | KeyCode::Char('P') if !text_entry => Some(DialogAction::PlayAgain),
        KeyCode::Char('q') | KeyCode::Char('Q') if !text_entry => Some(DialogAction::Cancel),

        _ => None,
    }
}

/// Ctrl-C quits from anywhere.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Check if key should quit the game while the board has focus.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) || is_interrupt(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn board(code: KeyCode) -> Option<BoardAction> {
        map_board_key(KeyEvent::from(code))
    }

    #[test]
    fn test_cursor_keys() {
        assert_eq!(board(KeyCode::Left), Some(BoardAction::Move(Direction::Left)));
        assert_eq!(board(KeyCode::Char('l')), Some(BoardAction::Move(Direction::Right)));
        assert_eq!(board(KeyCode::Char('W')), Some(BoardAction::Move(Direction::Up)));
        assert_eq!(board(KeyCode::Char('j')), Some(BoardAction::Move(Direction::Down)));
    }

    #[test]
    fn test_board_commands() {
        assert_eq!(board(KeyCode::Enter), Some(BoardAction::Flip));
        assert_eq!(board(KeyCode::Char(' ')), Some(BoardAction::Flip));
        assert_eq!(board(KeyCode::Char('n')), Some(BoardAction::NewGame));
        assert_eq!(board(KeyCode::Char('B')), Some(BoardAction::ShowLeaderboard));
        assert_eq!(board(KeyCode::Char('x')), None);
        assert_eq!(
            map_board_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_text_entry_swallows_command_letters() {
        let r = KeyEvent::from(KeyCode::Char('r'));
        assert_eq!(map_dialog_key(r, true), Some(DialogAction::Input('r')));
        assert_eq!(map_dialog_key(r, false), Some(DialogAction::Retry));

        let q = KeyEvent::from(KeyCode::Char('q'));
        assert_eq!(map_dialog_key(q, true), Some(DialogAction::Input('q')));
        assert_eq!(map_dialog_key(q, false), Some(DialogAction::Cancel));

        let p = KeyEvent::from(KeyCode::Char('P'));
        assert_eq!(map_dialog_key(p, false), Some(DialogAction::PlayAgain));
    }

    #[test]
    fn test_dialog_editing_keys() {
        assert_eq!(
            map_dialog_key(KeyEvent::from(KeyCode::Backspace), true),
            Some(DialogAction::Backspace)
        );
        assert_eq!(map_dialog_key(KeyEvent::from(KeyCode::Backspace), false), None);
        assert_eq!(
            map_dialog_key(KeyEvent::from(KeyCode::Enter), true),
            Some(DialogAction::Confirm)
        );
        assert_eq!(
            map_dialog_key(KeyEvent::from(KeyCode::Esc), false),
            Some(DialogAction::Cancel)
        );
        assert_eq!(
            map_dialog_key(KeyEvent::from(KeyCode::Char('é')), true),
            Some(DialogAction::Input('é'))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(is_interrupt(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('q'))));
    }
}
