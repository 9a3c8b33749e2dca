use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An identity as reported by the hosted auth provider.
///
/// The `id` is opaque to this crate; GoTrue hands out UUIDs but nothing here
/// depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            email_confirmed_at: None,
        }
    }

    /// Whether the provider has seen the address confirmed
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}
