//! Passphrase policy.
//!
//! Enforces the minimum requirements for a new master passphrase. The policy
//! only applies at creation; unlocking never re-checks it.

use crate::error::{Result, VaultError};

/// Default minimum passphrase length in characters.
pub const DEFAULT_MIN_PASSPHRASE_LENGTH: usize = 8;

/// Policy applied when a master passphrase is first chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassphrasePolicy {
    pub min_length: usize,
}

impl Default for PassphrasePolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_PASSPHRASE_LENGTH,
        }
    }
}

impl PassphrasePolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Validate a passphrase against this policy.
    ///
    /// Length is counted in characters, not bytes, so a passphrase of
    /// multi-byte characters is not favoured.
    ///
    /// # Examples
    ///
    /// ```
    /// use strongbox_core::crypto::PassphrasePolicy;
    ///
    /// let policy = PassphrasePolicy::default();
    /// assert!(policy.validate("my-secure-passphrase-123").is_ok());
    /// assert!(policy.validate("short").is_err());
    /// ```
    pub fn validate(&self, passphrase: &str) -> Result<()> {
        if passphrase.trim().is_empty() {
            return Err(VaultError::WeakPassphrase(
                "Passphrase cannot be empty".to_string(),
            ));
        }

        let length = passphrase.chars().count();
        if length < self.min_length {
            return Err(VaultError::WeakPassphrase(format!(
                "Passphrase must be at least {} characters (got {})",
                self.min_length, length
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_passphrase() {
        let policy = PassphrasePolicy::default();
        assert!(policy.validate("my-secure-passphrase-123").is_ok());
        assert!(policy.validate("Tr0ub4dor&3").is_ok());
        assert!(policy
            .validate("longer passphrase with spaces and symbols!@#")
            .is_ok());
    }

    #[test]
    fn test_passphrase_too_short() {
        let err = PassphrasePolicy::default().validate("short").unwrap_err();
        assert!(matches!(err, VaultError::WeakPassphrase(_)));
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn test_passphrase_empty() {
        let policy = PassphrasePolicy::default();
        assert!(policy.validate("").is_err());
        assert!(policy.validate("   ").is_err());
        assert!(policy.validate("\n\t").is_err());
    }

    #[test]
    fn test_passphrase_exactly_min_length() {
        assert!(PassphrasePolicy::default().validate("12345678").is_ok());
        assert!(PassphrasePolicy::new(12).validate("12345678").is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        // 7 characters, 14 bytes
        let passphrase = "ééééééé";
        assert_eq!(passphrase.len(), 14);
        assert!(PassphrasePolicy::default().validate(passphrase).is_err());
    }
}
