//! JSON output formatting for entries.

use strongbox_core::Entry;

/// Convert an entry to JSON for output. The sealed secret is left out.
pub fn entry_json(entry: &Entry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "service": entry.service,
        "username": entry.username,
        "notes": entry.notes,
        "created_at": entry.created_at,
        "modified_at": entry.modified_at,
    })
}

/// Convert multiple entries to a JSON array for output.
pub fn entries_json(entries: &[Entry]) -> Vec<serde_json::Value> {
    entries.iter().map(entry_json).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use strongbox_core::crypto::SealedSecret;
    use uuid::Uuid;

    #[test]
    fn test_entry_json_omits_ciphertext() {
        let now = Utc::now();
        let entry = Entry {
            id: Uuid::new_v4(),
            service: "mail".to_string(),
            username: "alice".to_string(),
            secret_ciphertext: SealedSecret::from_encoded("c2VhbGVk"),
            notes: "work".to_string(),
            created_at: now,
            modified_at: now,
        };
        let value = entry_json(&entry);
        assert_eq!(value["service"], "mail");
        assert_eq!(value["username"], "alice");
        assert_eq!(value["notes"], "work");
        let rendered = value.to_string();
        assert!(!rendered.contains("c2VhbGVk"));
        assert!(value.get("secret_ciphertext").is_none());
    }
}
