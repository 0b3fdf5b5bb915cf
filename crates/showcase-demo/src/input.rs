#![forbid(unsafe_code)]

//! Mapping from terminal events to showcase actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::view::{Hit, View};

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Scroll the page by a signed number of rows.
    ScrollBy(i32),
    /// Scroll by a signed number of viewport pages.
    ScrollPages(i32),
    ScrollHome,
    ScrollEnd,
    Previous,
    Next,
    /// Select a catalog index.
    Jump(usize),
    Resize { width: u16, height: u16 },
    Quit,
}

/// Translate a raw terminal event. `view` is the last drawn frame, used to
/// resolve mouse clicks.
pub fn action_for_event(event: &Event, scroll_step: u16, view: &View) -> Option<Action> {
    match event {
        Event::Key(key) => action_for_key(key, scroll_step),
        Event::Mouse(mouse) => action_for_mouse(mouse, scroll_step, view),
        Event::Resize(width, height) => Some(Action::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Keyboard bindings.
pub fn action_for_key(key: &KeyEvent, scroll_step: u16) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let step = i32::from(scroll_step.max(1));
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollBy(step),
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollBy(-step),
        KeyCode::PageDown | KeyCode::Char(' ') => Action::ScrollPages(1),
        KeyCode::PageUp => Action::ScrollPages(-1),
        KeyCode::Home | KeyCode::Char('g') => Action::ScrollHome,
        KeyCode::End | KeyCode::Char('G') => Action::ScrollEnd,
        KeyCode::Left | KeyCode::Char('h') => Action::Previous,
        KeyCode::Right | KeyCode::Char('l') => Action::Next,
        KeyCode::Char(c @ '1'..='9') => Action::Jump(c as usize - '1' as usize),
        _ => return None,
    };
    Some(action)
}

/// Mouse bindings: wheel scrolls, left click hits arrows and labels.
pub fn action_for_mouse(mouse: &MouseEvent, scroll_step: u16, view: &View) -> Option<Action> {
    let step = i32::from(scroll_step.max(1));
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Action::ScrollBy(step)),
        MouseEventKind::ScrollUp => Some(Action::ScrollBy(-step)),
        MouseEventKind::Down(MouseButton::Left) => {
            match view.hit_test(mouse.column, mouse.row)? {
                Hit::Previous => Some(Action::Previous),
                Hit::Next => Some(Action::Next),
                Hit::Label(index) => Some(Action::Jump(index)),
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn arrows_browse_and_scroll() {
        assert_eq!(action_for_key(&key(KeyCode::Left), 3), Some(Action::Previous));
        assert_eq!(action_for_key(&key(KeyCode::Right), 3), Some(Action::Next));
        assert_eq!(action_for_key(&key(KeyCode::Down), 3), Some(Action::ScrollBy(3)));
        assert_eq!(action_for_key(&key(KeyCode::Up), 3), Some(Action::ScrollBy(-3)));
    }

    #[test]
    fn digits_jump_zero_based() {
        assert_eq!(action_for_key(&key(KeyCode::Char('1')), 3), Some(Action::Jump(0)));
        assert_eq!(action_for_key(&key(KeyCode::Char('5')), 3), Some(Action::Jump(4)));
        assert_eq!(action_for_key(&key(KeyCode::Char('0')), 3), None);
    }

    #[test]
    fn quit_bindings() {
        assert_eq!(action_for_key(&key(KeyCode::Char('q')), 3), Some(Action::Quit));
        assert_eq!(action_for_key(&key(KeyCode::Esc), 3), Some(Action::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(&ctrl_c, 3), Some(Action::Quit));
        assert_eq!(action_for_key(&key(KeyCode::Char('c')), 3), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for_key(&release, 3), None);
    }

    #[test]
    fn zero_step_still_scrolls() {
        assert_eq!(action_for_key(&key(KeyCode::Down), 0), Some(Action::ScrollBy(1)));
    }

    #[test]
    fn wheel_scrolls_page() {
        let view = View::default();
        assert_eq!(
            action_for_mouse(&mouse(MouseEventKind::ScrollDown, 0, 0), 2, &view),
            Some(Action::ScrollBy(2))
        );
        assert_eq!(
            action_for_mouse(&mouse(MouseEventKind::ScrollUp, 0, 0), 2, &view),
            Some(Action::ScrollBy(-2))
        );
    }

    #[test]
    fn click_outside_hits_is_ignored() {
        let view = View::default();
        assert_eq!(
            action_for_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 5), 2, &view),
            None
        );
    }

    #[test]
    fn resize_event_maps_through() {
        assert_eq!(
            action_for_event(&Event::Resize(80, 24), 3, &View::default()),
            Some(Action::Resize {
                width: 80,
                height: 24
            })
        );
    }
}
