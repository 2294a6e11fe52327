//! Storage backend trait definition.
//!
//! The `VaultStore` trait is the seam between the session and wherever the
//! two vault documents live. The session never sees file paths.

use super::types::RecordsDocument;
use crate::crypto::MasterCredential;
use crate::error::Result;

/// Persistence interface for a vault's two documents.
///
/// All implementations must ensure:
/// - A write is all-or-nothing from the caller's perspective
/// - Unparseable documents surface as `VaultError::StorageCorrupt`
/// - Key material never passes through this interface
pub trait VaultStore: Send {
    /// Load the master credential.
    ///
    /// Returns `Ok(None)` if the vault has never been initialized.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::StorageCorrupt` if the document exists but does
    /// not parse, or carries invalid derivation parameters.
    fn load_credential(&self) -> Result<Option<MasterCredential>>;

    /// Persist the master credential, replacing any existing one.
    fn save_credential(&mut self, credential: &MasterCredential) -> Result<()>;

    /// Load the records document.
    ///
    /// A vault without a records document has no entries.
    fn load_records(&self) -> Result<RecordsDocument>;

    /// Persist the full records document atomically.
    fn save_records(&mut self, records: &RecordsDocument) -> Result<()>;

    /// Remove both documents. Irreversible.
    fn destroy(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_boxed_store(_store: Box<dyn VaultStore>) {}
    }
}
