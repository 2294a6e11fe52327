//! Error types for Strongbox core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these to
//! user-facing messages and exit codes.
//!
//! Cryptographic failures deliberately carry no detail about *why* they
//! failed. `DecryptionFailed` names the entry it happened on and nothing else.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for Strongbox operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for Strongbox operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Passphrase rejected by the creation policy
    #[error("Weak passphrase: {0}")]
    WeakPassphrase(String),

    /// Wrong passphrase, or a credential document that does not verify
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// A record operation was attempted without an unlocked session
    #[error("Vault is locked")]
    SessionLocked,

    /// A sealed secret could not be opened under the session key
    #[error("Decryption failed{}", entry_suffix(.entry_id))]
    DecryptionFailed { entry_id: Option<Uuid> },

    /// Unknown entry id
    #[error("Entry not found: {0}")]
    NotFound(Uuid),

    /// A persisted document failed to parse
    #[error("Storage corrupt: {0}")]
    StorageCorrupt(String),

    /// An entry with the same service and username already exists
    #[error("Entry already exists for {service} / {username}")]
    DuplicateEntry { service: String, username: String },

    /// `create_master` on a vault that already has a master credential
    #[error("Vault is already initialized")]
    AlreadyInitialized,

    /// `unlock` on a vault without a master credential
    #[error("Vault is not initialized")]
    NotInitialized,

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal cryptographic failure (RNG, parameter setup)
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Storage backend error (I/O)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VaultError {
    /// A `DecryptionFailed` that is not yet attributed to an entry.
    pub fn decryption_failed() -> Self {
        VaultError::DecryptionFailed { entry_id: None }
    }
}

fn entry_suffix(entry_id: &Option<Uuid>) -> String {
    match entry_id {
        Some(id) => format!(" for entry {}", id),
        None => String::new(),
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decryption_failed_names_entry_only() {
        let id = Uuid::new_v4();
        let err = VaultError::DecryptionFailed { entry_id: Some(id) };
        assert_eq!(err.to_string(), format!("Decryption failed for entry {}", id));

        let bare = VaultError::decryption_failed();
        assert_eq!(bare.to_string(), "Decryption failed");
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: VaultError = io.into();
        assert!(matches!(err, VaultError::Storage(ref msg) if msg.contains("disk full")));
    }
}
