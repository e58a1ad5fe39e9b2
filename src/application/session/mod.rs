//! Session lifecycle.

mod credential_store;

pub use credential_store::CredentialStore;
