//! Master credential creation and passphrase verification.
//!
//! A vault stores a random salt, its derivation parameters and a
//! verification token: HMAC-SHA-256 over a fixed label, keyed with the
//! derived key. A candidate passphrase is checked by re-deriving the key and
//! verifying the token in constant time. Neither the passphrase nor the key
//! is ever written anywhere.

use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::key::{derive_key, DerivedKey, KdfParams};
use super::passphrase::PassphrasePolicy;
use crate::error::{Result, VaultError};

/// Salt length for new vaults.
pub const SALT_LENGTH: usize = 16;

/// Label authenticated by the verification token.
const VERIFICATION_LABEL: &[u8] = b"strongbox/master-verification/v1";

type HmacSha256 = Hmac<Sha256>;

/// The persisted half of a vault's master passphrase: everything needed to
/// test a candidate passphrase, nothing that recovers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterCredential {
    #[serde(with = "salt_base64")]
    pub salt: [u8; SALT_LENGTH],

    #[serde(with = "token_base64")]
    pub verification_token: Vec<u8>,

    #[serde(flatten)]
    pub kdf: KdfParams,
}

/// Create a master credential for a new vault.
///
/// Returns the credential to persist and the key for the session. The key
/// is never part of the credential.
pub fn create(
    passphrase: &str,
    policy: &PassphrasePolicy,
    params: KdfParams,
) -> Result<(MasterCredential, DerivedKey)> {
    policy.validate(passphrase)?;
    params.validate()?;

    let mut salt = [0u8; SALT_LENGTH];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| VaultError::Crypto(format!("Failed to generate salt: {}", e)))?;

    let key = derive_key(passphrase, &salt, &params)?;
    let verification_token = compute_token(&key)?;

    let credential = MasterCredential {
        salt,
        verification_token,
        kdf: params,
    };
    Ok((credential, key))
}

/// Verify a candidate passphrase against a stored credential.
///
/// Returns the derived key on success. Any mismatch, including a token that
/// was corrupted on disk, is `AuthenticationFailed`.
pub fn verify(passphrase: &str, credential: &MasterCredential) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(VaultError::AuthenticationFailed);
    }

    let key = derive_key(passphrase, &credential.salt, &credential.kdf)?;

    let mut mac = keyed_mac(&key)?;
    mac.update(VERIFICATION_LABEL);
    mac.verify_slice(&credential.verification_token)
        .map_err(|_| VaultError::AuthenticationFailed)?;

    Ok(key)
}

fn compute_token(key: &DerivedKey) -> Result<Vec<u8>> {
    let mut mac = keyed_mac(key)?;
    mac.update(VERIFICATION_LABEL);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn keyed_mac(key: &DerivedKey) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Crypto(format!("HMAC setup failed: {}", e)))
}

mod salt_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::SALT_LENGTH;

    pub fn serialize<S: Serializer>(salt: &[u8; SALT_LENGTH], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(salt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; SALT_LENGTH], D::Error> {
        let encoded = String::deserialize(d)?;
        let bytes = STANDARD.decode(encoded.as_bytes()).map_err(de::Error::custom)?;
        bytes.try_into().map_err(|bytes: Vec<u8>| {
            de::Error::custom(format!(
                "salt must be {} bytes (got {})",
                SALT_LENGTH,
                bytes.len()
            ))
        })
    }
}

mod token_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(token: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(token))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(d)?;
        STANDARD.decode(encoded.as_bytes()).map_err(de::Error::custom)
    }
}
