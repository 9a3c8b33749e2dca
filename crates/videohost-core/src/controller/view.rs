use super::state::{ActiveTab, StatusMessage, ViewState};
use crate::auth::Identity;

/// Label shown on the submit button while a call is in flight
pub const LOADING_LABEL: &str = "Loading...";

/// Everything a front-end needs to draw the auth panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView<'a> {
    /// Tabs and form are hidden once someone is signed in
    pub show_form: bool,
    pub session: Option<&'a Identity>,
    pub active_tab: ActiveTab,
    pub email: &'a str,
    /// Length only; the password itself never reaches the renderer
    pub password_len: usize,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub status: &'a StatusMessage,
}

impl<'a> AuthView<'a> {
    pub fn from_state(state: &'a ViewState) -> Self {
        let pending = state.is_pending();
        let active_tab = state.active_tab();

        Self {
            show_form: !state.is_authenticated(),
            session: state.session(),
            active_tab,
            email: &state.form().email,
            password_len: state.form().password.chars().count(),
            submit_label: if pending {
                LOADING_LABEL
            } else {
                active_tab.submit_label()
            },
            submit_enabled: !pending,
            status: state.status(),
        }
    }
}
