//! The auth view-state machine.
//!
//! `ViewState` holds everything the landing page renders from and applies
//! the transitions for each user operation. It performs no I/O: submissions
//! are split into `begin_submit`, which hands out a `SubmitRequest`, and
//! `finish_submit`, which applies the tagged outcome. The async plumbing
//! lives in `AuthViewController`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::Identity;

// ============================================================================
// Status Copy
// ============================================================================

pub const SIGN_IN_SUCCESS: &str = "Successfully signed in!";
pub const SIGN_UP_SUCCESS: &str = "Check your email to confirm your account!";
pub const SIGN_OUT_SUCCESS: &str = "Successfully signed out!";

/// Shown for any failure that is not an explicit provider rejection.
/// Internal detail goes to the log, never to the screen.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";

// ============================================================================
// State Types
// ============================================================================

/// Which submission the form performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Login,
    Register,
}

impl ActiveTab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            ActiveTab::Login => "Login",
            ActiveTab::Register => "Register",
        }
    }

    /// Label for the submit button while idle
    pub fn submit_label(&self) -> &'static str {
        match self {
            ActiveTab::Login => "Sign In",
            ActiveTab::Register => "Create Account",
        }
    }

    /// The other tab
    pub fn other(&self) -> Self {
        match self {
            ActiveTab::Login => ActiveTab::Register,
            ActiveTab::Register => ActiveTab::Login,
        }
    }
}

/// Form fields addressable by `set_field`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub email: String,
    pub password: String,
}

impl FormInput {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty()
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

impl fmt::Debug for FormInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// At most one of error or success can be shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusMessage {
    #[default]
    None,
    Error(String),
    Success(String),
}

impl StatusMessage {
    pub fn error(&self) -> Option<&str> {
        match self {
            StatusMessage::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match self {
            StatusMessage::Success(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StatusMessage::None)
    }
}

/// Submission guard. Replaces a bare "loading" boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting { generation: u64 },
}

/// Snapshot of the form taken when a submission starts
#[derive(Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub generation: u64,
    pub tab: ActiveTab,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SubmitRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitRequest")
            .field("generation", &self.generation)
            .field("tab", &self.tab)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// How a submission resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    SignedIn(Identity),
    /// Account created; the identity is not authenticated yet
    SignedUp(Identity),
    /// Provider refused, with its description
    Rejected(String),
    /// Network loss, malformed payload, or similar
    Fault,
}

// ============================================================================
// View State
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    session: Option<Identity>,
    form: FormInput,
    active_tab: ActiveTab,
    status: StatusMessage,
    phase: SubmitPhase,
    /// Bumped by every submission start and every sign-out
    generation: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on a specific tab (e.g. the one remembered from the last run)
    pub fn with_tab(active_tab: ActiveTab) -> Self {
        Self {
            active_tab,
            ..Self::default()
        }
    }

    pub fn session(&self) -> Option<&Identity> {
        self.session.as_ref()
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, SubmitPhase::Submitting { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Email => self.form.email = value.into(),
            Field::Password => self.form.password = value.into(),
        }
    }

    /// Only the label/copy changes; form, status and phase are kept.
    pub fn switch_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Move Idle -> Submitting. Returns `None` if a submission is in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.is_pending() {
            debug!("Submission ignored: another one is still in flight");
            return None;
        }

        self.generation += 1;
        self.phase = SubmitPhase::Submitting {
            generation: self.generation,
        };
        self.status = StatusMessage::None;

        Some(SubmitRequest {
            generation: self.generation,
            tab: self.active_tab,
            email: self.form.email.clone(),
            password: self.form.password.clone(),
        })
    }

    /// Apply a submission result. Returns false if the result was stale and
    /// only released the submission guard.
    pub fn finish_submit(&mut self, generation: u64, outcome: SubmitOutcome) -> bool {
        if self.phase == (SubmitPhase::Submitting { generation }) {
            self.phase = SubmitPhase::Idle;
        }

        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Discarding stale submission result"
            );
            return false;
        }

        match outcome {
            SubmitOutcome::SignedIn(identity) => {
                self.session = Some(identity);
                self.status = StatusMessage::Success(SIGN_IN_SUCCESS.to_string());
                self.form.clear();
            }
            SubmitOutcome::SignedUp(_) => {
                self.status = StatusMessage::Success(SIGN_UP_SUCCESS.to_string());
                self.form.clear();
            }
            SubmitOutcome::Rejected(reason) => {
                self.status = StatusMessage::Error(reason);
            }
            SubmitOutcome::Fault => {
                self.status = StatusMessage::Error(UNEXPECTED_ERROR.to_string());
            }
        }
        true
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Clear the session regardless of what the provider reports.
    /// Any submission still in flight becomes stale.
    pub fn sign_out(&mut self) {
        self.generation += 1;
        self.session = None;
        self.status = StatusMessage::Success(SIGN_OUT_SUCCESS.to_string());
    }

    /// Apply the startup session lookup. Silent: status and phase are never
    /// touched, and the result is dropped if anything happened meanwhile.
    pub fn finish_session_check(&mut self, generation: u64, identity: Option<Identity>) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Discarding stale session check");
            return false;
        }
        if identity.is_some() {
            self.session = identity;
        }
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
