//! Core library for VideoHost Pro.
//!
//! - `auth`: identity model and the `AuthProvider` capability
//! - `api`: `HostedAuthClient`, a GoTrue-compatible provider over HTTP
//! - `config`: locating the hosted provider
//! - `controller`: the auth view-state machine and its async driver
//!
//! Front-ends construct a provider, hand it to `AuthViewController`, and
//! render from `AuthViewController::view`.

pub mod api;
pub mod auth;
pub mod config;
pub mod controller;

pub use api::{ApiError, HostedAuthClient};
pub use auth::{AuthError, AuthProvider, Identity};
pub use config::{AuthConfig, ConfigError};
pub use controller::{ActiveTab, AuthView, AuthViewController, Field, StatusMessage};
