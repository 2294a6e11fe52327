//! In-memory storage backend.
//!
//! Holds both documents in process memory. Useful for embedding the vault
//! behind another persistence layer and for tests that need several
//! independent vaults in one process.

use super::traits::VaultStore;
use super::types::RecordsDocument;
use crate::crypto::MasterCredential;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryStore {
    credential: Option<MasterCredential>,
    records: RecordsDocument,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The records document as last persisted.
    pub fn records(&self) -> &RecordsDocument {
        &self.records
    }

    /// Direct access to the persisted records, bypassing any session.
    pub fn records_mut(&mut self) -> &mut RecordsDocument {
        &mut self.records
    }

    /// Number of successful document writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl VaultStore for MemoryStore {
    fn load_credential(&self) -> Result<Option<MasterCredential>> {
        Ok(self.credential.clone())
    }

    fn save_credential(&mut self, credential: &MasterCredential) -> Result<()> {
        self.credential = Some(credential.clone());
        self.writes += 1;
        Ok(())
    }

    fn load_records(&self) -> Result<RecordsDocument> {
        Ok(self.records.clone())
    }

    fn save_records(&mut self, records: &RecordsDocument) -> Result<()> {
        self.records = records.clone();
        self.writes += 1;
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.credential = None;
        self.records = RecordsDocument::default();
        Ok(())
    }
}
