//! REST client module for the hosted identity provider.
//!
//! This module provides the `HostedAuthClient`, an `AuthProvider` that talks
//! to a GoTrue-compatible auth API (`/auth/v1/...`) using the project's
//! anon key and an in-memory access token.

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::HostedAuthClient;
pub use error::ApiError;
