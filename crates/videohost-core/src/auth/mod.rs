//! Authentication types shared by the provider client and the view controller.
//!
//! This module provides:
//! - `Identity`: the user record returned by the hosted provider
//! - `AuthProvider`: the four-operation capability the controller depends on
//! - `AuthError`: provider rejection vs. unexpected fault
//!
//! Nothing here persists a session; the provider owns session lifetime.

pub mod identity;
pub mod provider;

pub use identity::Identity;
pub use provider::{AuthError, AuthProvider};
