//! Authenticated encryption of record secrets.
//!
//! Secrets are sealed with AES-256-GCM under the session key. Every seal
//! draws a fresh random 96-bit nonce, and the stored form is standard base64
//! of `nonce || ciphertext || tag` so it can live in a JSON document.
//!
//! Opening verifies the tag before any plaintext is released. All failure
//! causes (bad encoding, truncation, tampering, wrong key, wrong context)
//! collapse into a single `DecryptionFailed`.

use std::fmt;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::key::DerivedKey;
use crate::error::{Result, VaultError};

/// AES-GCM nonce length in bytes.
pub const NONCE_LENGTH: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LENGTH: usize = 16;

/// A sealed secret in its storable, text-safe form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SealedSecret(String);

impl SealedSecret {
    /// Wrap an encoded value read from storage. No validation happens here;
    /// a malformed value fails when opened.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SealedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SealedSecret")
            .field(&format_args!("{} bytes", self.0.len()))
            .finish()
    }
}

/// Seal `plaintext` under `key`.
pub fn seal(plaintext: &[u8], key: &DerivedKey) -> Result<SealedSecret> {
    seal_with_context(plaintext, key, &[])
}

/// Open a sealed secret under `key`.
pub fn open(sealed: &SealedSecret, key: &DerivedKey) -> Result<Zeroizing<Vec<u8>>> {
    open_with_context(sealed, key, &[])
}

/// Seal `plaintext` under `key`, authenticating `context` as associated data.
///
/// The same `context` must be supplied to [`open_with_context`].
pub fn seal_with_context(
    plaintext: &[u8],
    key: &DerivedKey,
    context: &[u8],
) -> Result<SealedSecret> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Crypto(format!("Cipher setup failed: {}", e)))?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad: context,
            },
        )
        .map_err(|_| VaultError::Crypto("Encryption failed".to_string()))?;

    let mut framed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    framed.extend_from_slice(nonce.as_slice());
    framed.extend_from_slice(&ciphertext);

    Ok(SealedSecret(STANDARD.encode(framed)))
}

/// Open a sealed secret under `key`, checking `context` as associated data.
pub fn open_with_context(
    sealed: &SealedSecret,
    key: &DerivedKey,
    context: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let framed = STANDARD
        .decode(sealed.0.as_bytes())
        .map_err(|_| VaultError::decryption_failed())?;
    if framed.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(VaultError::decryption_failed());
    }

    let (nonce, ciphertext) = framed.split_at(NONCE_LENGTH);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| VaultError::decryption_failed())?;

    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: context,
            },
        )
        .map_err(|_| VaultError::decryption_failed())?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key::KEY_LENGTH;
    use proptest::prelude::*;

    fn key(byte: u8) -> DerivedKey {
        DerivedKey::from_bytes([byte; KEY_LENGTH])
    }

    fn raw(sealed: &SealedSecret) -> Vec<u8> {
        STANDARD.decode(sealed.as_str()).unwrap()
    }

    fn encode(bytes: &[u8]) -> SealedSecret {
        SealedSecret::from_encoded(STANDARD.encode(bytes))
    }

    #[test]
    fn test_seal_open_round_trip() {
        let k = key(7);
        let sealed = seal(b"p@ss!23", &k).unwrap();
        let opened = open(&sealed, &k).unwrap();
        assert_eq!(opened.as_slice(), b"p@ss!23");
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let k = key(7);
        let sealed = seal(b"", &k).unwrap();
        assert_eq!(raw(&sealed).len(), NONCE_LENGTH + TAG_LENGTH);
        assert!(open(&sealed, &k).unwrap().is_empty());
    }

    #[test]
    fn test_layout_is_nonce_ciphertext_tag() {
        let k = key(7);
        let sealed = seal(b"twelve bytes", &k).unwrap();
        assert_eq!(raw(&sealed).len(), NONCE_LENGTH + 12 + TAG_LENGTH);
    }

    #[test]
    fn test_sealed_output_hides_plaintext() {
        let k = key(7);
        let sealed = seal(b"PLAINTEXT_MARKER_123", &k).unwrap();
        assert!(!sealed.as_str().contains("PLAINTEXT_MARKER_123"));
        let bytes = raw(&sealed);
        assert!(!bytes
            .windows(b"PLAINTEXT_MARKER_123".len())
            .any(|w| w == b"PLAINTEXT_MARKER_123"));
    }

    #[test]
    fn test_truncated_input_fails() {
        let k = key(7);
        let sealed = seal(b"secret", &k).unwrap();
        let bytes = raw(&sealed);

        for len in [0, 1, NONCE_LENGTH, NONCE_LENGTH + TAG_LENGTH - 1, bytes.len() - 1] {
            let result = open(&encode(&bytes[..len]), &k);
            assert!(
                matches!(result, Err(VaultError::DecryptionFailed { entry_id: None })),
                "length {} should fail",
                len
            );
        }
    }

    #[test]
    fn test_invalid_base64_fails() {
        let k = key(7);
        let result = open(&SealedSecret::from_encoded("not base64 at all!"), &k);
        assert!(matches!(result, Err(VaultError::DecryptionFailed { .. })));
    }

    #[test]
    fn test_context_binding() {
        let k = key(7);
        let sealed = seal_with_context(b"secret", &k, b"entry-a").unwrap();

        assert_eq!(
            open_with_context(&sealed, &k, b"entry-a").unwrap().as_slice(),
            b"secret"
        );
        assert!(open_with_context(&sealed, &k, b"entry-b").is_err());
        assert!(open(&sealed, &k).is_err());
    }

    #[test]
    fn test_debug_does_not_print_ciphertext() {
        let sealed = seal(b"secret", &key(7)).unwrap();
        let debug = format!("{:?}", sealed);
        assert!(!debug.contains(sealed.as_str()));
    }

    #[test]
    fn test_every_single_byte_flip_is_detected() {
        let k = key(9);
        let sealed = seal(b"a modest secret", &k).unwrap();
        let bytes = raw(&sealed);

        for index in 0..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[index] ^= 0x01;
            assert!(
                matches!(
                    open(&encode(&tampered), &k),
                    Err(VaultError::DecryptionFailed { .. })
                ),
                "flip at byte {} went undetected",
                index
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_round_trip(plaintext in proptest::collection::vec(any::<u8>(), 0..512), k in any::<u8>()) {
            let k = key(k);
            let sealed = seal(&plaintext, &k).unwrap();
            let opened = open(&sealed, &k).unwrap();
            prop_assert_eq!(opened.as_slice(), plaintext.as_slice());
        }

        #[test]
        fn prop_seal_is_not_deterministic(plaintext in proptest::collection::vec(any::<u8>(), 0..64)) {
            let k = key(3);
            let first = seal(&plaintext, &k).unwrap();
            let second = seal(&plaintext, &k).unwrap();
            prop_assert_ne!(first, second);
        }

        #[test]
        fn prop_wrong_key_rejected(
            plaintext in proptest::collection::vec(any::<u8>(), 0..64),
            k1 in any::<u8>(),
            k2 in any::<u8>(),
        ) {
            prop_assume!(k1 != k2);
            let sealed = seal(&plaintext, &key(k1)).unwrap();
            prop_assert!(
                matches!(open(&sealed, &key(k2)), Err(VaultError::DecryptionFailed { .. })),
                "open under a different key should fail"
            );
        }

        #[test]
        fn prop_tamper_detected(
            plaintext in proptest::collection::vec(any::<u8>(), 1..64),
            position in any::<prop::sample::Index>(),
            mask in 1u8..=255,
        ) {
            let k = key(5);
            let mut bytes = raw(&seal(&plaintext, &k).unwrap());
            let index = position.index(bytes.len());
            bytes[index] ^= mask;
            prop_assert!(
                matches!(open(&encode(&bytes), &k), Err(VaultError::DecryptionFailed { .. })),
                "tampered byte {} should fail",
                index
            );
        }
    }
}
