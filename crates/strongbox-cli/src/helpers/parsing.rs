//! Entry ID parsing.

use strongbox_core::Entry;
use uuid::Uuid;

use crate::errors::CliError;

/// Resolve a full UUID or a unique, case-insensitive prefix of one.
pub fn resolve_entry_id(input: &str, entries: &[Entry]) -> anyhow::Result<Uuid> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Err(CliError::invalid_input("Entry ID cannot be empty").into());
    }

    if let Ok(id) = Uuid::parse_str(&needle) {
        return Ok(id);
    }

    let matches: Vec<Uuid> = entries
        .iter()
        .map(|entry| entry.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::not_found(
            format!("No entry matches ID \"{}\"", input.trim()),
            "Hint: Run `strongbox list` to find entry IDs.",
        )
        .into()),
        _ => Err(CliError::invalid_input(format!(
            "ID prefix \"{}\" matches {} entries; use more characters",
            input.trim(),
            matches.len()
        ))
        .into()),
    }
}
