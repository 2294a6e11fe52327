use std::fs;

use secrecy::ExposeSecret;
use serde_json::Value;
use strongbox_core::crypto::KdfParams;
use strongbox_core::{JsonFileStore, NewEntry, Session, VaultError, VaultOptions};
use tempfile::TempDir;

const PASSPHRASE: &str = "Tr0ub4dor&3";

struct TempVault {
    dir: TempDir,
}

impl TempVault {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir should be available"),
        }
    }

    fn session(&self) -> Session<JsonFileStore> {
        let store = JsonFileStore::open(self.dir.path()).expect("open should succeed");
        let options = VaultOptions {
            kdf: KdfParams::new(1_000).expect("params should be valid"),
            ..VaultOptions::default()
        };
        Session::new(store, options)
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).expect("read should succeed")
    }

    fn write(&self, name: &str, contents: &str) {
        fs::write(self.dir.path().join(name), contents).expect("write should succeed");
    }
}

#[test]
fn test_entries_survive_reopen() {
    let vault = TempVault::new();

    let id = {
        let mut session = vault.session();
        session.create_master(PASSPHRASE).expect("create should succeed");
        session
            .add_entry(NewEntry::new("example.com", "alice", "p@ss!23"))
            .expect("add should succeed")
            .id
    };

    let mut session = vault.session();
    assert!(session.has_master().expect("load should succeed"));
    session.unlock(PASSPHRASE).expect("unlock should succeed");

    let secret = session.reveal_secret(&id).expect("reveal should succeed");
    assert_eq!(secret.expose_secret(), "p@ss!23");
}

#[test]
fn test_wrong_passphrase_after_reopen() {
    let vault = TempVault::new();
    vault
        .session()
        .create_master(PASSPHRASE)
        .expect("create should succeed");

    let mut session = vault.session();
    assert!(matches!(
        session.unlock("tr0ub4dor&3"),
        Err(VaultError::AuthenticationFailed)
    ));
    assert!(!session.is_unlocked());
}

#[test]
fn test_documents_hold_no_plaintext_secrets() {
    let vault = TempVault::new();
    let mut session = vault.session();
    session.create_master(PASSPHRASE).expect("create should succeed");
    session
        .add_entry(NewEntry::new("example.com", "alice", "p@ss!23").with_notes("work"))
        .expect("add should succeed");

    let master = vault.read("master.json");
    let entries = vault.read("entries.json");

    for document in [&master, &entries] {
        assert!(!document.contains(PASSPHRASE));
        assert!(!document.contains("p@ss!23"));
    }
    assert!(entries.contains("example.com"));

    let master: Value = serde_json::from_str(&master).expect("master.json should parse");
    assert_eq!(master["kdfAlgorithm"], "pbkdf2-hmac-sha256");
    assert_eq!(master["kdfIterations"], 1_000);
    assert!(master["salt"].is_string());
    assert!(master["verificationToken"].is_string());
}

#[test]
fn test_tampered_secret_fails_only_its_entry() {
    let vault = TempVault::new();
    let (good, bad) = {
        let mut session = vault.session();
        session.create_master(PASSPHRASE).expect("create should succeed");
        let good = session
            .add_entry(NewEntry::new("good.com", "alice", "fine"))
            .expect("add should succeed");
        let bad = session
            .add_entry(NewEntry::new("bad.com", "alice", "doomed"))
            .expect("add should succeed");
        (good.id, bad.id)
    };

    let mut doc: Value =
        serde_json::from_str(&vault.read("entries.json")).expect("entries.json should parse");
    let entry = doc["entries"]
        .as_array_mut()
        .expect("entries should be an array")
        .iter_mut()
        .find(|e| e["id"] == bad.to_string())
        .expect("entry should exist");
    let mut sealed = entry["secretCiphertext"]
        .as_str()
        .expect("ciphertext should be a string")
        .to_string()
        .into_bytes();
    let middle = sealed.len() / 2;
    sealed[middle] = if sealed[middle] == b'A' { b'B' } else { b'A' };
    entry["secretCiphertext"] = Value::String(String::from_utf8(sealed).expect("ascii"));
    vault.write("entries.json", &doc.to_string());

    let mut session = vault.session();
    session.unlock(PASSPHRASE).expect("unlock should succeed");

    assert!(matches!(
        session.reveal_secret(&bad),
        Err(VaultError::DecryptionFailed { entry_id: Some(id) }) if id == bad
    ));
    let secret = session.reveal_secret(&good).expect("reveal should succeed");
    assert_eq!(secret.expose_secret(), "fine");
}

#[test]
fn test_corrupt_records_document_blocks_unlock() {
    let vault = TempVault::new();
    vault
        .session()
        .create_master(PASSPHRASE)
        .expect("create should succeed");
    vault.write("entries.json", "{ \"entries\": [ ");

    let mut session = vault.session();
    assert!(matches!(
        session.unlock(PASSPHRASE),
        Err(VaultError::StorageCorrupt(_))
    ));
    assert!(!session.is_unlocked());
}

#[test]
fn test_reset_removes_documents() {
    let vault = TempVault::new();
    let mut session = vault.session();
    session.create_master(PASSPHRASE).expect("create should succeed");

    session.reset_vault().expect("reset should succeed");

    assert!(!vault.dir.path().join("master.json").exists());
    assert!(!vault.dir.path().join("entries.json").exists());
    assert!(!vault.session().has_master().expect("load should succeed"));
}
