//! Token storage adapters.

mod file_storage;
#[cfg(feature = "keyring")]
mod keyring_storage;
#[cfg(not(feature = "keyring"))]
mod keyring_storage_stub;

pub use file_storage::FileTokenStorage;
#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringTokenStorage;
#[cfg(not(feature = "keyring"))]
pub use keyring_storage_stub::KeyringTokenStorage;
