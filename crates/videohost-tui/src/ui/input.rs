//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use videohost_core::AuthProvider;

use crate::app::{App, FormFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input<P>(app: &mut App<P>, key: KeyEvent) -> bool
where
    P: AuthProvider + 'static,
{
    if key.code == KeyCode::Esc {
        app.quit();
        return true;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('t') => app.toggle_theme(),
            KeyCode::Char('o') if app.auth.state().is_authenticated() => app.sign_out(),
            _ => {}
        }
        return false;
    }

    // The form is hidden while signed in, so nothing else applies
    if !app.view().show_form {
        return false;
    }

    handle_form_input(app, key);
    false
}

fn handle_form_input<P>(app: &mut App<P>, key: KeyEvent)
where
    P: AuthProvider + 'static,
{
    match key.code {
        KeyCode::Left | KeyCode::Right => {
            let tab = app.auth.state().active_tab().other();
            app.switch_tab(tab);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.focus = app.focus.prev();
        }
        KeyCode::Enter => app.activate(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) => {
            // Ignore character input on button
            if app.focus != FormFocus::Button {
                app.push_char(c);
            }
        }
        _ => {}
    }
}
