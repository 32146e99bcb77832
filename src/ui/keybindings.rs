// src/ui/keybindings.rs
//! Keyboard and mouse input mapped to viewer actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Actions derived from input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    ZoomIn,
    ZoomOut,
    /// Slide the window toward lower frequencies.
    PanLower,
    /// Slide the window toward higher frequencies.
    PanHigher,
    FullRange,
    Reset,
    FewerRows,
    MoreRows,
    TogglePause,
    Quit,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Action::ZoomIn,
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => Action::ZoomOut,
        KeyCode::Left => Action::PanLower,
        KeyCode::Right => Action::PanHigher,
        KeyCode::Char('f') => Action::FullRange,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('[') => Action::FewerRows,
        KeyCode::Char(']') => Action::MoreRows,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

/// Wheel over the spectrogram zooms; other mouse events are handled by the
/// drag tracker in the app.
pub fn mouse_to_action(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp => Action::ZoomIn,
        MouseEventKind::ScrollDown => Action::ZoomOut,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseButton;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn documented_keys() {
        assert_eq!(key_to_action(&key(KeyCode::Char('+'))), Action::ZoomIn);
        assert_eq!(key_to_action(&key(KeyCode::Char('-'))), Action::ZoomOut);
        assert_eq!(key_to_action(&key(KeyCode::Left)), Action::PanLower);
        assert_eq!(key_to_action(&key(KeyCode::Right)), Action::PanHigher);
        assert_eq!(key_to_action(&key(KeyCode::Char('f'))), Action::FullRange);
        assert_eq!(key_to_action(&key(KeyCode::Char('r'))), Action::Reset);
        assert_eq!(key_to_action(&key(KeyCode::Char('['))), Action::FewerRows);
        assert_eq!(key_to_action(&key(KeyCode::Char(']'))), Action::MoreRows);
        assert_eq!(key_to_action(&key(KeyCode::Char(' '))), Action::TogglePause);
        assert_eq!(key_to_action(&key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(key_to_action(&key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(&ctrl_c), Action::Quit);
        assert_eq!(key_to_action(&key(KeyCode::Char('c'))), Action::None);
    }

    #[test]
    fn wheel_zooms() {
        let event = |kind| MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(mouse_to_action(&event(MouseEventKind::ScrollUp)), Action::ZoomIn);
        assert_eq!(mouse_to_action(&event(MouseEventKind::ScrollDown)), Action::ZoomOut);
        assert_eq!(
            mouse_to_action(&event(MouseEventKind::Down(MouseButton::Left))),
            Action::None
        );
    }
}
