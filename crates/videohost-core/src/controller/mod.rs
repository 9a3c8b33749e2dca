//! Auth view controller.
//!
//! `AuthViewController` wires a `ViewState` to an injected `AuthProvider`.
//! Provider calls run in spawned Tokio tasks and report back through an MPSC
//! channel; the owner folds the results in with `check_background_tasks`
//! (non-blocking, once per frame) or `next_event` (awaits one result).
//! All state mutation happens on the owner's side of the channel.

pub mod state;
pub mod view;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::auth::{AuthError, AuthProvider, Identity};

pub use state::{
    ActiveTab, Field, FormInput, StatusMessage, SubmitOutcome, SubmitPhase, SubmitRequest,
    ViewState, SIGN_IN_SUCCESS, SIGN_OUT_SUCCESS, SIGN_UP_SUCCESS, UNEXPECTED_ERROR,
};
pub use view::{AuthView, LOADING_LABEL};

/// Buffer size for the result channel.
/// At most one submission and one session check are outstanding at a time.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Results sent from provider tasks back to the controller
#[derive(Debug)]
pub enum AuthEvent {
    SessionChecked {
        generation: u64,
        identity: Option<Identity>,
    },
    Submitted {
        generation: u64,
        outcome: SubmitOutcome,
    },
}

pub struct AuthViewController<P> {
    provider: Arc<P>,
    state: ViewState,
    event_tx: mpsc::Sender<AuthEvent>,
    event_rx: mpsc::Receiver<AuthEvent>,
}

impl<P> AuthViewController<P>
where
    P: AuthProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_state(provider, ViewState::new())
    }

    pub fn with_state(provider: Arc<P>, state: ViewState) -> Self {
        let (event_tx, event_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            provider,
            state,
            event_tx,
            event_rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> AuthView<'_> {
        AuthView::from_state(&self.state)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Look up the provider's current session once, in the background
    pub fn init(&mut self) {
        let generation = self.state.generation();
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let identity = match provider.current_user().await {
                Ok(identity) => identity,
                Err(e) => {
                    debug!(error = %e, "Session check failed, treating as signed out");
                    None
                }
            };
            send_event(&tx, AuthEvent::SessionChecked { generation, identity }).await;
        });
    }

    /// Submit the form for the active tab.
    /// Returns false (and calls nothing) if a submission is already in flight.
    pub fn submit(&mut self) -> bool {
        let Some(request) = self.state.begin_submit() else {
            return false;
        };
        debug!(?request, "Submitting auth form");

        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let generation = request.generation;
            let outcome = run_submission(provider.as_ref(), &request).await;
            send_event(&tx, AuthEvent::Submitted { generation, outcome }).await;
        });
        true
    }

    /// Sign out. The view is updated immediately; the provider call is
    /// fire-and-forget.
    pub fn sign_out(&mut self) {
        self.spawn_provider_sign_out();
        self.state.sign_out();
        info!("Signed out");
    }

    fn spawn_provider_sign_out(&self) {
        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            if let Err(e) = provider.sign_out().await {
                warn!(error = %e, "Provider sign-out failed");
            }
        });
    }

    pub fn switch_tab(&mut self, tab: ActiveTab) {
        self.state.switch_tab(tab);
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.set_field(field, value);
    }

    // =========================================================================
    // Background Results
    // =========================================================================

    /// Apply every result that has arrived. Returns how many were processed.
    pub fn check_background_tasks(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event);
            processed += 1;
        }
        processed
    }

    /// Wait for the next result and apply it
    pub async fn next_event(&mut self) {
        // The controller holds a sender, so the channel never closes here
        if let Some(event) = self.event_rx.recv().await {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SessionChecked {
                generation,
                identity,
            } => {
                let found = identity.is_some();
                if self.state.finish_session_check(generation, identity) && found {
                    info!("Restored existing session");
                }
            }
            AuthEvent::Submitted {
                generation,
                outcome,
            } => {
                let signed_in = matches!(outcome, SubmitOutcome::SignedIn(_));
                if !self.state.finish_submit(generation, outcome) && signed_in {
                    // The user signed out while this was in flight, so the
                    // provider session it just opened must not outlive it
                    info!("Revoking session from a sign-in that resolved after sign-out");
                    self.spawn_provider_sign_out();
                }
            }
        }
    }
}

/// Run the provider call for one submission and classify its result
async fn run_submission<P>(provider: &P, request: &SubmitRequest) -> SubmitOutcome
where
    P: AuthProvider + ?Sized,
{
    let result = match request.tab {
        ActiveTab::Login => provider
            .sign_in(&request.email, &request.password)
            .await
            .map(SubmitOutcome::SignedIn),
        ActiveTab::Register => provider
            .sign_up(&request.email, &request.password)
            .await
            .map(SubmitOutcome::SignedUp),
    };

    match result {
        Ok(outcome) => {
            info!(tab = request.tab.title(), "Auth submission succeeded");
            outcome
        }
        Err(AuthError::Rejected(reason)) => {
            info!(tab = request.tab.title(), %reason, "Auth submission rejected");
            SubmitOutcome::Rejected(reason)
        }
        Err(AuthError::Unexpected(e)) => {
            error!(tab = request.tab.title(), error = %e, "Auth submission failed");
            SubmitOutcome::Fault
        }
    }
}

async fn send_event(tx: &mpsc::Sender<AuthEvent>, event: AuthEvent) {
    if tx.send(event).await.is_err() {
        debug!("Controller dropped before auth result arrived");
    }
}

// ============================================================================
// Tests
// ============================================================================
