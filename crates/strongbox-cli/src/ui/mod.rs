//! UI primitives for the Strongbox CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and color styles
//! - **Render**: Tables, headers, receipts, hints
//! - **Progress**: Spinner shown while the master key is derived
//! - **Prompt**: Hidden passphrase and secret prompts, confirmations
//! - **Format**: String utilities (truncate, short ids, timestamps)

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod prompt;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::{parse_format, OutputMode};
pub use theme::Badge;

pub use render::{
    badge, blank_line, header, header_with_context, hint, kv, print, print_error, receipt, table,
    Column,
};

pub use format::{format_datetime, or_dash, short_id, single_line, truncate};
