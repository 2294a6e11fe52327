//! # Strongbox Core
//!
//! Core library for Strongbox - a local, single-user, encrypted vault for
//! credentials.
//!
//! This crate provides the cryptography, storage and session logic
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, master credential, secret sealing
//! - **storage**: the `VaultStore` trait and its JSON and in-memory backends
//! - **session**: the lock/unlock state machine and record operations
//! - **fs**: atomic file replacement

pub mod crypto;
pub mod error;
pub mod fs;
pub mod session;
pub mod storage;

pub use error::{Result, VaultError};
pub use session::{Session, SessionState, VaultOptions};
pub use storage::{Entry, EntryUpdate, JsonFileStore, MemoryStore, NewEntry, VaultStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
