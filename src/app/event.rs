// Input event handling
//
// This module maps keyboard and mouse input onto the application state.

use super::AppState;
use crate::theme::ThemeOverride;
use crate::widget::Mode;
use crossterm::event::{KeyCode, MouseEvent, MouseEventKind};
use std::time::Instant;

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc` - Quit the application
/// - `f`, `F` - Follow mode
/// - `t`, `T` - Thinking mode
/// - `i`, `I` - Idle mode
/// - `a`, `A` - Theme follows the system
/// - `l`, `L` - Force the light theme
/// - `d`, `D` - Force the dark theme
/// - `s`, `S` - Flip the system dark-mode preference
/// - `b`, `B` - Blink now
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.running = false;
            false
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.set_mode(Mode::Follow);
            true
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.set_mode(Mode::Thinking);
            true
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            app.set_mode(Mode::Idle);
            true
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.apply_theme_override(ThemeOverride::Auto);
            true
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            app.apply_theme_override(ThemeOverride::Light);
            true
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            app.apply_theme_override(ThemeOverride::Dark);
            true
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.toggle_system_preference();
            true
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            app.blink_all(Instant::now());
            true
        }
        _ => true,
    }
}

/// Handle mouse events; only motion matters
///
/// Drags count as motion so the eyes keep watching while a button is held.
pub fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) {
    if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
        app.pointer_moved(mouse.column, mouse.row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::theme::{Palette, Theme};
    use crossterm::event::{KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app(1);

        assert!(app.running);
        let result = handle_key_event(&mut app, KeyCode::Char('q'));
        assert!(!result);
        assert!(!app.running);

        app.running = true;
        let result = handle_key_event(&mut app, KeyCode::Char('Q'));
        assert!(!result);
        assert!(!app.running);

        app.running = true;
        let result = handle_key_event(&mut app, KeyCode::Esc);
        assert!(!result);
        assert!(!app.running);
    }

    #[test]
    fn test_mode_keys() {
        let mut app = test_app(2);

        handle_key_event(&mut app, KeyCode::Char('t'));
        assert!(app.registry.iter().all(|w| w.mode() == Mode::Thinking));

        handle_key_event(&mut app, KeyCode::Char('I'));
        assert!(app.registry.iter().all(|w| w.mode() == Mode::Idle));

        handle_key_event(&mut app, KeyCode::Char('f'));
        assert_eq!(app.mode, Mode::Follow);
        assert!(app.registry.iter().all(|w| w.mode() == Mode::Follow));
    }

    #[test]
    fn test_theme_keys() {
        let mut app = test_app(2);

        handle_key_event(&mut app, KeyCode::Char('d'));
        assert_eq!(app.theme_override, ThemeOverride::Dark);
        assert!(app.registry.iter().all(|w| w.theme() == Theme::Dark));

        handle_key_event(&mut app, KeyCode::Char('L'));
        assert!(app.registry.iter().all(|w| w.theme() == Theme::Light));

        handle_key_event(&mut app, KeyCode::Char('a'));
        assert_eq!(app.theme_override, ThemeOverride::Auto);
        assert_eq!(app.registry.bus().document_theme(), None);
    }

    #[test]
    fn test_system_key_under_override() {
        let mut app = test_app(1);
        handle_key_event(&mut app, KeyCode::Char('l'));
        handle_key_event(&mut app, KeyCode::Char('s'));

        assert!(app.system_prefers_dark());
        let widget = app.registry.get(0).unwrap();
        assert_eq!(widget.theme(), Theme::Light);
        assert_eq!(widget.color(), Palette::light().follow_color);
    }

    #[test]
    fn test_unbound_key_keeps_running() {
        let mut app = test_app(1);
        assert!(handle_key_event(&mut app, KeyCode::Char('x')));
        assert!(app.running);
    }

    #[test]
    fn test_mouse_motion_updates_pointer() {
        let mut app = test_app(1);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Moved, 5, 7));
        assert_eq!(app.pointer, Some((5, 7)));

        handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 6, 8));
        assert_eq!(app.pointer, Some((6, 8)));

        handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollUp, 1, 1));
        assert_eq!(app.pointer, Some((6, 8)));
    }
}
