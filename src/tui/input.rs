use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Distance one drag keystroke moves the card
pub const NUDGE_STEP: f64 = 40.0;

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Apply to the current job
    Apply,
    /// Pass on the current job
    Pass,
    /// Drag the card one step left
    DragLeft,
    /// Drag the card one step right
    DragRight,
    /// Let go of the dragged card
    Release,
    /// Step back to the previous job
    Undo,
    /// Cycle the job type filter
    CycleFilter,
    /// Open the company website
    Open,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Apply: Right arrow or a
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Apply,
        (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::Apply,

        // Pass: Left arrow or p
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Pass,
        (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::Pass,

        // Drag: Shift+arrows or h/l, released with Enter or Space
        (KeyCode::Left, KeyModifiers::SHIFT) => KeyAction::DragLeft,
        (KeyCode::Right, KeyModifiers::SHIFT) => KeyAction::DragRight,
        (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::DragLeft,
        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::DragRight,
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::Release,
        (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Release,

        // Undo: u or Ctrl+Z
        (KeyCode::Char('u'), KeyModifiers::NONE) => KeyAction::Undo,
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => KeyAction::Undo,

        (KeyCode::Char('f'), KeyModifiers::NONE) => KeyAction::CycleFilter,
        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Open,

        // Help: ?
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,
        (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Pointer phases of a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press { column: u16, row: u16 },
    Drag { column: u16 },
    Release,
    None,
}

/// Maps left-button mouse events to drag phases
pub fn handle_mouse_event(mouse: MouseEvent) -> PointerAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Press {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Drag {
            column: mouse.column,
        },
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Release,
        _ => PointerAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row: 5,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_quit() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Quit);
    }

    #[test]
    fn test_key_apply() {
        let key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Apply);

        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Apply);
    }

    #[test]
    fn test_key_pass() {
        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Pass);

        let key = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Pass);
    }

    #[test]
    fn test_key_drag() {
        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(key), KeyAction::DragLeft);

        let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::DragRight);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Release);

        let key = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Release);
    }

    #[test]
    fn test_key_undo() {
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Undo);

        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::Undo);
    }

    #[test]
    fn test_key_misc() {
        let key = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::CycleFilter);

        let key = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Open);

        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Help);
    }

    #[test]
    fn test_key_none() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::None);
    }

    #[test]
    fn test_mouse_phases() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10)),
            PointerAction::Press { column: 10, row: 5 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 14)),
            PointerAction::Drag { column: 14 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 14)),
            PointerAction::Release
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3)),
            PointerAction::None
        );
    }
}
