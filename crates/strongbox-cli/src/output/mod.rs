//! Output formatting helpers for the CLI.
//!
//! Entries are shown as JSON, a table, or a detail block. None of these
//! ever include the sealed secret.

mod json;
mod text;

pub use json::{entries_json, entry_json};
pub use text::{print_entry, print_entry_list};
