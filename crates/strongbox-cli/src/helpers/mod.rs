//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Reading passphrases and secrets piped on stdin (`input`)
//! - Resolving entry IDs from full UUIDs or prefixes (`parsing`)

mod input;
mod parsing;

pub use input::StdinLines;
pub use parsing::resolve_entry_id;
