//! Application-level utilities for the Strongbox CLI.
//!
//! This module provides:
//! - Path resolution for the config file and vault directory
//! - The per-invocation context (CLI args, lazily loaded config, stdin)
//! - Session opening with passphrase retry logic

mod context;
mod resolver;
mod unlock;

pub use context::AppContext;
pub use resolver::resolve_config_path;
pub use unlock::{create_session, open_session, open_store};
