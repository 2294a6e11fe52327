//! Core data types for the storage layer.
//!
//! `Entry` and `RecordsDocument` are the persisted shape of the records
//! document; field names follow the on-disk camelCase format.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::SealedSecret;

/// A stored credential record.
///
/// Only the secret is encrypted. Service, username and notes are plaintext
/// so they can be listed and searched without touching the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Stable identifier, assigned at creation
    pub id: Uuid,

    /// Service or website name
    pub service: String,

    pub username: String,

    /// Sealed secret value
    pub secret_ciphertext: SealedSecret,

    /// Free-text notes (not confidential)
    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (informational)
    pub modified_at: DateTime<Utc>,
}

impl Entry {
    /// Case-insensitive substring match over service, username and notes.
    ///
    /// `query_lower` must already be lowercased.
    pub(crate) fn matches(&self, query_lower: &str) -> bool {
        self.service.to_lowercase().contains(query_lower)
            || self.username.to_lowercase().contains(query_lower)
            || self.notes.to_lowercase().contains(query_lower)
    }

    /// Whether this entry occupies the same (service, username) slot.
    ///
    /// Services compare case-insensitively, usernames exactly.
    pub(crate) fn same_slot(&self, service: &str, username: &str) -> bool {
        self.service.to_lowercase() == service.to_lowercase() && self.username == username
    }
}

/// The persisted records document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsDocument {
    /// When the collection was last written (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Builder for creating new entries.
#[derive(Debug)]
pub struct NewEntry {
    pub service: String,
    pub username: String,
    pub secret: SecretString,
    pub notes: String,
}

impl NewEntry {
    pub fn new(
        service: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            username: username.into(),
            secret: SecretString::from(secret.into()),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Field changes for an existing entry. `None` leaves a field untouched.
#[derive(Debug, Default)]
pub struct EntryUpdate {
    pub service: Option<String>,
    pub username: Option<String>,
    pub secret: Option<SecretString>,
    pub notes: Option<String>,
}

impl EntryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(SecretString::from(secret.into()));
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.service.is_none()
            && self.username.is_none()
            && self.secret.is_none()
            && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn sample_entry() -> Entry {
        let now = Utc::now();
        Entry {
            id: Uuid::new_v4(),
            service: "Example.com".to_string(),
            username: "alice".to_string(),
            secret_ciphertext: SealedSecret::from_encoded("AAAA"),
            notes: "Work account".to_string(),
            created_at: now,
            modified_at: now,
        }
    }

    #[test]
    fn test_new_entry_builder() {
        let entry = NewEntry::new("example.com", "alice", "p@ss!23").with_notes("personal");

        assert_eq!(entry.service, "example.com");
        assert_eq!(entry.username, "alice");
        assert_eq!(entry.secret.expose_secret(), "p@ss!23");
        assert_eq!(entry.notes, "personal");
    }

    #[test]
    fn test_new_entry_debug_hides_secret() {
        let entry = NewEntry::new("example.com", "alice", "p@ss!23");
        assert!(!format!("{:?}", entry).contains("p@ss!23"));
    }

    #[test]
    fn test_entry_update_builder() {
        assert!(EntryUpdate::new().is_empty());

        let update = EntryUpdate::new().username("bob").notes("");
        assert!(!update.is_empty());
        assert_eq!(update.username.as_deref(), Some("bob"));
        assert_eq!(update.notes.as_deref(), Some(""));
        assert!(update.service.is_none());
        assert!(update.secret.is_none());
    }

    #[test]
    fn test_matches_is_case_insensitive_over_plaintext_fields() {
        let entry = sample_entry();
        assert!(entry.matches("example"));
        assert!(entry.matches("alic"));
        assert!(entry.matches("work"));
        assert!(!entry.matches("aaaa"));
    }

    #[test]
    fn test_same_slot() {
        let entry = sample_entry();
        assert!(entry.same_slot("EXAMPLE.COM", "alice"));
        assert!(!entry.same_slot("example.com", "Alice"));
    }

    #[test]
    fn test_entry_document_field_names() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        for field in [
            "id",
            "service",
            "username",
            "secretCiphertext",
            "notes",
            "createdAt",
            "modifiedAt",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(value["secretCiphertext"], "AAAA");
    }

    #[test]
    fn test_records_document_defaults() {
        let doc: RecordsDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.entries.is_empty());
        assert!(doc.last_modified.is_none());
    }
}
