//! Key derivation using PBKDF2-HMAC-SHA-256.
//!
//! Derivation parameters are fixed per vault at creation time and stored in
//! the master credential document, so unlocking always re-derives with the
//! exact parameters the vault was created with.

use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VaultError};

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// Minimum salt length accepted by [`derive_key`].
pub const MIN_SALT_LENGTH: usize = 16;

/// Default PBKDF2 round count for new vaults.
///
/// Roughly 100-300ms on current desktop hardware in an optimized build.
pub const DEFAULT_KDF_ITERATIONS: u32 = 200_000;

/// Lowest round count the core will derive with.
///
/// Front ends enforce a much higher floor for real vaults; this only guards
/// against degenerate parameters in a tampered credential document.
pub const MIN_KDF_ITERATIONS: u32 = 1_000;

/// Key derivation algorithm identifier, persisted as `kdfAlgorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KdfAlgorithm {
    #[serde(rename = "pbkdf2-hmac-sha256")]
    Pbkdf2HmacSha256,
}

/// Derivation parameters stored alongside the salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    #[serde(rename = "kdfAlgorithm")]
    pub algorithm: KdfAlgorithm,

    #[serde(rename = "kdfIterations")]
    pub iterations: u32,
}

impl KdfParams {
    /// PBKDF2-HMAC-SHA-256 with the given round count.
    pub fn new(iterations: u32) -> Result<Self> {
        let params = Self {
            algorithm: KdfAlgorithm::Pbkdf2HmacSha256,
            iterations,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations < MIN_KDF_ITERATIONS {
            return Err(VaultError::InvalidInput(format!(
                "KDF iterations must be at least {} (got {})",
                MIN_KDF_ITERATIONS, self.iterations
            )));
        }
        Ok(())
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: KdfAlgorithm::Pbkdf2HmacSha256,
            iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

/// A cryptographic key derived from a passphrase.
///
/// Key material is zeroized when dropped. The type is deliberately not
/// `Clone`: the unlocked session holds the only copy.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a KDF or a
    /// secure random source.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate
    /// encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase.
///
/// Same passphrase + salt + params always produce the same key. The salt
/// does not need to be secret but must be unique per vault.
///
/// # Examples
///
/// ```
/// use strongbox_core::crypto::{derive_key, KdfParams};
///
/// let params = KdfParams::new(1_000).unwrap();
/// let key = derive_key("my-passphrase", b"unique-salt-16by", &params).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(passphrase: &str, salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(VaultError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    if salt.len() < MIN_SALT_LENGTH {
        return Err(VaultError::InvalidInput(format!(
            "Salt must be at least {} bytes",
            MIN_SALT_LENGTH
        )));
    }

    params.validate()?;

    let mut key_bytes = [0u8; KEY_LENGTH];
    match params.algorithm {
        KdfAlgorithm::Pbkdf2HmacSha256 => {
            pbkdf2_hmac::<Sha256>(
                passphrase.as_bytes(),
                salt,
                params.iterations,
                &mut key_bytes,
            );
        }
    }

    let key = DerivedKey::from_bytes(key_bytes);
    zeroize::Zeroize::zeroize(&mut key_bytes);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> KdfParams {
        KdfParams::new(MIN_KDF_ITERATIONS).unwrap()
    }

    #[test]
    fn test_key_derivation_deterministic() {
        let salt = b"unique-salt-1234567890123456";

        let key1 = derive_key("test-passphrase", salt, &fast_params()).unwrap();
        let key2 = derive_key("test-passphrase", salt, &fast_params()).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let params = fast_params();
        let key1 = derive_key("test-passphrase", b"salt1-1234567890123456", &params).unwrap();
        let key2 = derive_key("test-passphrase", b"salt2-1234567890123456", &params).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_iterations_different_key() {
        let salt = b"fixed-salt-123456789012345";
        let key1 = derive_key("test-passphrase", salt, &KdfParams::new(1_000).unwrap()).unwrap();
        let key2 = derive_key("test-passphrase", salt, &KdfParams::new(2_000).unwrap()).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_matches_reference_vector() {
        // Published PBKDF2-HMAC-SHA-256 vector (c = 4096), first 32 bytes.
        let params = KdfParams::new(4096).unwrap();
        let key = derive_key(
            "passwordPASSWORDpassword",
            b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
            &params,
        )
        .unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "348c89dbcbd32b2f32d814b8116e84cf2b17347ebc1800181c4e2a1fb8dd53e1"
        );
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = derive_key("", b"salt-1234567890123456", &fast_params());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Passphrase cannot be empty"));
    }

    #[test]
    fn test_short_salt_rejected() {
        let result = derive_key("test-passphrase", b"short", &fast_params());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Salt must be at least 16 bytes"));
    }

    #[test]
    fn test_too_few_iterations_rejected() {
        assert!(KdfParams::new(10).is_err());
        let params = KdfParams {
            algorithm: KdfAlgorithm::Pbkdf2HmacSha256,
            iterations: 1,
        };
        assert!(derive_key("test-passphrase", b"salt-1234567890123456", &params).is_err());
    }

    #[test]
    fn test_params_serialize_with_document_names() {
        let json = serde_json::to_value(KdfParams::default()).unwrap();
        assert_eq!(json["kdfAlgorithm"], "pbkdf2-hmac-sha256");
        assert_eq!(json["kdfIterations"], DEFAULT_KDF_ITERATIONS);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("test-passphrase", b"salt-1234567890123456", &fast_params()).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
