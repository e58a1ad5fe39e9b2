//! Datum client - session-aware REST client for the Datum field-sales backend.
//!
//! This crate keeps a JWT session alive across restarts, renews it on 401
//! responses, and caches backend collections in typed resource stores.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the session, request pipeline and stores.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the navigation gate and command runner.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "datum";
