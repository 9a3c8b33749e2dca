//! Application state for the VideoHost Pro terminal front-end.
//!
//! `App` owns the auth controller plus the purely presentational state the
//! controller doesn't care about: which form element has focus and the
//! colour theme.

use std::sync::Arc;

use tracing::{debug, warn};
use videohost_core::{ActiveTab, AuthProvider, AuthView, AuthViewController, Field};
use videohost_core::controller::ViewState;

use crate::config::{Theme, UiConfig};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for email input (RFC 5321 path limit)
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Quitting,
}

/// Auth form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Email,
    Password,
    Button,
}

impl FormFocus {
    pub fn next(&self) -> Self {
        match self {
            FormFocus::Email => FormFocus::Password,
            FormFocus::Password => FormFocus::Button,
            FormFocus::Button => FormFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormFocus::Email => FormFocus::Button,
            FormFocus::Password => FormFocus::Email,
            FormFocus::Button => FormFocus::Password,
        }
    }

    /// The form field this focus edits, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            FormFocus::Email => Some(Field::Email),
            FormFocus::Password => Some(Field::Password),
            FormFocus::Button => None,
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App<P> {
    pub config: UiConfig,
    pub auth: AuthViewController<P>,
    pub state: AppState,
    pub focus: FormFocus,
}

impl<P> App<P>
where
    P: AuthProvider + 'static,
{
    pub fn new(provider: Arc<P>, config: UiConfig) -> Self {
        let auth = AuthViewController::with_state(provider, ViewState::with_tab(config.last_tab));
        Self {
            config,
            auth,
            state: AppState::Normal,
            focus: FormFocus::Email,
        }
    }

    pub fn view(&self) -> AuthView<'_> {
        self.auth.view()
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    pub fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        debug!(theme = ?self.config.theme, "Theme toggled");
        self.save_config();
    }

    pub fn switch_tab(&mut self, tab: ActiveTab) {
        self.auth.switch_tab(tab);
        if self.config.last_tab != tab {
            self.config.last_tab = tab;
            self.save_config();
        }
    }

    /// Append a typed character to the focused field
    pub fn push_char(&mut self, c: char) {
        let Some(field) = self.focus.field() else {
            return;
        };
        let current = self.field_value(field);
        if can_add_char(field, current.chars().count(), c) {
            let mut value = current.to_string();
            value.push(c);
            self.auth.set_field(field, value);
        }
    }

    /// Delete the last character of the focused field
    pub fn pop_char(&mut self) {
        let Some(field) = self.focus.field() else {
            return;
        };
        let mut value = self.field_value(field).to_string();
        if value.pop().is_some() {
            self.auth.set_field(field, value);
        }
    }

    /// Enter on the form: advance focus, or submit from the button
    pub fn activate(&mut self) {
        match self.focus {
            FormFocus::Email => self.focus = FormFocus::Password,
            FormFocus::Password => self.focus = FormFocus::Button,
            FormFocus::Button => {
                // Focus moves only once the result lands; see `settle_focus`
                self.auth.submit();
            }
        }
    }

    /// Apply finished auth calls and keep focus on a field that still exists
    pub fn check_background_tasks(&mut self) {
        let before = self.form_snapshot();
        if self.auth.check_background_tasks() > 0 {
            self.settle_focus(before);
        }
    }

    /// Wait for and apply the next auth result
    #[cfg(test)]
    pub async fn next_event(&mut self) {
        let before = self.form_snapshot();
        self.auth.next_event().await;
        self.settle_focus(before);
    }

    fn form_snapshot(&self) -> (bool, bool) {
        let state = self.auth.state();
        (state.is_authenticated(), state.form().is_empty())
    }

    /// Start over at the top when a result swapped the session or cleared
    /// the form. A rejection leaves the form as typed, so focus stays put.
    fn settle_focus(&mut self, (was_authenticated, was_empty): (bool, bool)) {
        let (authenticated, empty) = self.form_snapshot();
        if authenticated != was_authenticated || (empty && !was_empty) {
            self.focus = FormFocus::Email;
        }
    }

    pub fn sign_out(&mut self) {
        self.auth.sign_out();
        self.focus = FormFocus::Email;
    }

    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    fn field_value(&self, field: Field) -> &str {
        let form = self.auth.state().form();
        match field {
            Field::Email => &form.email,
            Field::Password => &form.password,
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }
}

// ============================================================================
// Input validation helpers
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a character may be appended to a field of the given length
pub fn can_add_char(field: Field, current_len: usize, c: char) -> bool {
    let max = match field {
        Field::Email => MAX_EMAIL_LENGTH,
        Field::Password => MAX_PASSWORD_LENGTH,
    };
    current_len < max && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
