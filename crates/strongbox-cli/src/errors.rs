//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use strongbox_core::VaultError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Resource not found (config, vault, entry)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Stored data failed to decrypt or parse
    IntegrityFailed { message: String, hint: String },

    /// Record operation without an unlocked session
    SessionLocked(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } => write!(f, "{}", message),
            CliError::AuthFailed { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed { message, .. } => write!(f, "{}", message),
            CliError::SessionLocked(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error without a hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Translate a core error into its CLI form, if it has one.
    ///
    /// Storage and crypto failures have no dedicated exit code and stay
    /// generic errors.
    pub fn from_vault(err: &VaultError) -> Option<Self> {
        let mapped = match err {
            VaultError::NotFound(id) => CliError::not_found(
                format!("Entry {} not found", id),
                "Hint: Run `strongbox list` to find entry IDs.",
            ),
            VaultError::NotInitialized => CliError::not_found(
                "Vault is not initialized",
                "Hint: Run `strongbox init` to create a vault.",
            ),
            VaultError::AuthenticationFailed => CliError::auth_failed("Incorrect passphrase."),
            VaultError::WeakPassphrase(reason) => CliError::invalid_input(format!(
                "Passphrase does not meet requirements: {}",
                reason
            )),
            VaultError::DuplicateEntry { .. }
            | VaultError::AlreadyInitialized
            | VaultError::InvalidInput(_) => CliError::invalid_input(err.to_string()),
            VaultError::DecryptionFailed { .. } => CliError::IntegrityFailed {
                message: err.to_string(),
                hint: "Hint: The stored secret was modified or damaged. Other entries are unaffected."
                    .to_string(),
            },
            VaultError::StorageCorrupt(_) => CliError::IntegrityFailed {
                message: err.to_string(),
                hint: "Hint: Restore the vault directory from a backup.".to_string(),
            },
            VaultError::SessionLocked => CliError::SessionLocked(err.to_string()),
            VaultError::Crypto(_) | VaultError::Storage(_) => return None,
        };
        Some(mapped)
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } | CliError::IntegrityFailed { hint, .. } => Some(hint),
            CliError::AuthFailed { hint, .. } => hint.as_deref(),
            CliError::InvalidInput(_) | CliError::SessionLocked(_) => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed { .. } => exit_codes::INTEGRITY_FAILED,
            CliError::SessionLocked(_) => exit_codes::SESSION_LOCKED,
        }
    }
}
