//! Cryptographic operations for Strongbox.
//!
//! Built only from vetted constructions:
//! - **PBKDF2-HMAC-SHA-256**: passphrase to key derivation
//! - **HMAC-SHA-256**: passphrase verification token
//! - **AES-256-GCM**: authenticated encryption of record secrets
//!
//! ## Security Model
//!
//! - The passphrase and the derived key are never persisted
//! - Key material is zeroized from memory on drop
//! - Decryption failures do not reveal their cause
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the vault directory
//! - Offline brute-force attacks on the passphrase (salted, iterated KDF)
//! - Tampering with stored secrets
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / process memory

pub mod cipher;
pub mod kdf;
pub mod key;
pub mod passphrase;

pub use cipher::{open, open_with_context, seal, seal_with_context, SealedSecret};
pub use kdf::MasterCredential;
pub use key::{derive_key, DerivedKey, KdfAlgorithm, KdfParams, DEFAULT_KDF_ITERATIONS};
pub use passphrase::PassphrasePolicy;
