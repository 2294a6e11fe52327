//! Vault session: the capability interface front ends depend on.
//!
//! A `Session` owns a store and, while unlocked, the derived key and the
//! record collection. It is an ordinary value: construct one per vault and
//! hand it to whatever front end needs it.
//!
//! ## States
//!
//! - **Locked**: no key material held; every record operation fails with
//!   `VaultError::SessionLocked`.
//! - **Unlocking**: transient, for the duration of `unlock`/`create_master`
//!   while the key is being derived. The exclusive borrow makes it
//!   unobservable from outside.
//! - **Unlocked**: key and records held in memory.
//!
//! `lock()` (or dropping the session) drops the key, which zeroizes it.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::crypto::{self, kdf, DerivedKey, KdfParams, PassphrasePolicy};
use crate::error::{Result, VaultError};
use crate::storage::{Entry, EntryUpdate, NewEntry, RecordsDocument, VaultStore};

/// Policy and derivation parameters for vaults created by a session.
///
/// `kdf` only applies to `create_master`; unlocking always uses the
/// parameters stored with the vault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VaultOptions {
    pub policy: PassphrasePolicy,
    pub kdf: KdfParams,
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Locked,
    Unlocked,
}

struct Unlocked {
    key: DerivedKey,
    records: RecordsDocument,
}

/// A single-user vault session.
pub struct Session<S: VaultStore> {
    store: S,
    options: VaultOptions,
    unlocked: Option<Unlocked>,
}

impl<S: VaultStore> Session<S> {
    /// Open a locked session over `store` with default options.
    pub fn open(store: S) -> Self {
        Self::new(store, VaultOptions::default())
    }

    /// Create a locked session over `store`.
    pub fn new(store: S, options: VaultOptions) -> Self {
        Self {
            store,
            options,
            unlocked: None,
        }
    }

    pub fn options(&self) -> &VaultOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session, dropping any key material, and return the store.
    pub fn into_store(mut self) -> S {
        self.lock();
        self.store
    }

    pub fn state(&self) -> SessionState {
        if self.unlocked.is_some() {
            SessionState::Unlocked
        } else {
            SessionState::Locked
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.is_some()
    }

    /// Whether the vault has a master credential.
    pub fn has_master(&self) -> Result<bool> {
        Ok(self.store.load_credential()?.is_some())
    }

    /// Initialize the vault with a master passphrase and unlock it.
    ///
    /// # Errors
    ///
    /// - `WeakPassphrase` if the passphrase fails the policy (nothing is
    ///   written)
    /// - `AlreadyInitialized` if the vault already has a credential
    pub fn create_master(&mut self, passphrase: &str) -> Result<()> {
        self.lock();

        if self.store.load_credential()?.is_some() {
            return Err(VaultError::AlreadyInitialized);
        }

        let (credential, key) = kdf::create(passphrase, &self.options.policy, self.options.kdf)?;

        // Empty records first so a leftover records document from an older
        // vault can never be paired with the new credential.
        let records = RecordsDocument {
            last_modified: Some(Utc::now()),
            entries: Vec::new(),
        };
        self.store.save_records(&records)?;
        self.store.save_credential(&credential)?;

        info!(
            iterations = credential.kdf.iterations,
            "master credential created"
        );
        self.unlocked = Some(Unlocked { key, records });
        Ok(())
    }

    /// Unlock the vault with the master passphrase.
    ///
    /// Any previously held key is dropped first. On failure the session
    /// stays locked; the attempt is never retried here.
    ///
    /// # Errors
    ///
    /// - `NotInitialized` if the vault has no credential
    /// - `StorageCorrupt` if either document fails to parse
    /// - `AuthenticationFailed` for a wrong passphrase or a token that does
    ///   not verify
    pub fn unlock(&mut self, passphrase: &str) -> Result<()> {
        self.lock();

        let credential = self
            .store
            .load_credential()?
            .ok_or(VaultError::NotInitialized)?;
        let records = self.store.load_records()?;

        let key = match kdf::verify(passphrase, &credential) {
            Ok(key) => key,
            Err(err) => {
                warn!("unlock attempt failed");
                return Err(err);
            }
        };

        info!(entries = records.entries.len(), "vault unlocked");
        self.unlocked = Some(Unlocked { key, records });
        Ok(())
    }

    /// Discard the key and the in-memory records.
    pub fn lock(&mut self) {
        if self.unlocked.take().is_some() {
            info!("vault locked");
        }
    }

    /// Remove the master credential and every record. Irreversible.
    ///
    /// Works in any state; the session ends up locked and uninitialized.
    pub fn reset_vault(&mut self) -> Result<()> {
        self.lock();
        self.store.destroy()?;
        warn!("vault reset; all entries discarded");
        Ok(())
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> Result<&[Entry]> {
        Ok(&self.unlocked_ref()?.records.entries)
    }

    pub fn get_entry(&self, id: &Uuid) -> Result<&Entry> {
        self.unlocked_ref()?
            .records
            .entries
            .iter()
            .find(|entry| entry.id == *id)
            .ok_or(VaultError::NotFound(*id))
    }

    /// Add a new entry, sealing its secret under the session key.
    pub fn add_entry(&mut self, new_entry: NewEntry) -> Result<Entry> {
        let (store, state) = self.unlocked_parts()?;

        let service = new_entry.service.trim().to_string();
        if service.is_empty() {
            return Err(VaultError::InvalidInput(
                "Service cannot be empty".to_string(),
            ));
        }
        ensure_unique_slot(&state.records, &service, &new_entry.username, None)?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let entry = Entry {
            id,
            secret_ciphertext: seal_for_entry(&new_entry.secret, &state.key, &id)?,
            service,
            username: new_entry.username,
            notes: new_entry.notes,
            created_at: now,
            modified_at: now,
        };

        let mut next = state.records.clone();
        next.entries.push(entry.clone());
        commit(store, state, next)?;

        debug!(entry_id = %id, "entry added");
        Ok(entry)
    }

    /// Apply field changes to an entry.
    ///
    /// A new secret is sealed with a fresh nonce. `id` and `created_at` are
    /// preserved; `modified_at` is bumped.
    pub fn update_entry(&mut self, id: &Uuid, update: EntryUpdate) -> Result<Entry> {
        let (store, state) = self.unlocked_parts()?;

        let index = position_of(&state.records, id)?;
        let mut entry = state.records.entries[index].clone();

        if let Some(service) = update.service {
            let service = service.trim().to_string();
            if service.is_empty() {
                return Err(VaultError::InvalidInput(
                    "Service cannot be empty".to_string(),
                ));
            }
            entry.service = service;
        }
        if let Some(username) = update.username {
            entry.username = username;
        }
        ensure_unique_slot(&state.records, &entry.service, &entry.username, Some(id))?;

        if let Some(secret) = update.secret.as_ref() {
            entry.secret_ciphertext = seal_for_entry(secret, &state.key, id)?;
        }
        if let Some(notes) = update.notes {
            entry.notes = notes;
        }
        entry.modified_at = Utc::now();

        let mut next = state.records.clone();
        next.entries[index] = entry.clone();
        commit(store, state, next)?;

        debug!(entry_id = %id, "entry updated");
        Ok(entry)
    }

    /// Delete an entry. There is no tombstone; the secret is gone.
    pub fn delete_entry(&mut self, id: &Uuid) -> Result<()> {
        let (store, state) = self.unlocked_parts()?;

        let index = position_of(&state.records, id)?;
        let mut next = state.records.clone();
        next.entries.remove(index);
        commit(store, state, next)?;

        debug!(entry_id = %id, "entry deleted");
        Ok(())
    }

    /// Decrypt and return an entry's secret.
    ///
    /// # Errors
    ///
    /// `DecryptionFailed` names the entry but not the cause. The session
    /// stays unlocked and other entries remain readable.
    pub fn reveal_secret(&self, id: &Uuid) -> Result<SecretString> {
        let state = self.unlocked_ref()?;
        let entry = self.get_entry(id)?;

        let failed = || VaultError::DecryptionFailed {
            entry_id: Some(*id),
        };
        let plaintext =
            crypto::open_with_context(&entry.secret_ciphertext, &state.key, id.as_bytes())
                .map_err(|err| match err {
                    VaultError::DecryptionFailed { .. } => {
                        warn!(entry_id = %id, "secret failed to decrypt");
                        failed()
                    }
                    other => other,
                })?;
        let text = std::str::from_utf8(&plaintext).map_err(|_| failed())?;

        Ok(SecretString::from(text.to_owned()))
    }

    /// Case-insensitive substring search over service, username and notes.
    ///
    /// An empty query matches every entry. Secrets are never searched.
    pub fn search(&self, query: &str) -> Result<Vec<Entry>> {
        let state = self.unlocked_ref()?;
        let query = query.trim().to_lowercase();

        Ok(state
            .records
            .entries
            .iter()
            .filter(|entry| query.is_empty() || entry.matches(&query))
            .cloned()
            .collect())
    }

    fn unlocked_ref(&self) -> Result<&Unlocked> {
        self.unlocked.as_ref().ok_or(VaultError::SessionLocked)
    }

    fn unlocked_parts(&mut self) -> Result<(&mut S, &mut Unlocked)> {
        match self.unlocked.as_mut() {
            Some(state) => Ok((&mut self.store, state)),
            None => Err(VaultError::SessionLocked),
        }
    }
}

impl<S: VaultStore> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Persist `next` and only then make it the in-memory collection.
fn commit<S: VaultStore>(
    store: &mut S,
    state: &mut Unlocked,
    mut next: RecordsDocument,
) -> Result<()> {
    next.last_modified = Some(Utc::now());
    store.save_records(&next)?;
    state.records = next;
    Ok(())
}

fn seal_for_entry(
    secret: &SecretString,
    key: &DerivedKey,
    id: &Uuid,
) -> Result<crypto::SealedSecret> {
    crypto::seal_with_context(secret.expose_secret().as_bytes(), key, id.as_bytes())
}

fn position_of(records: &RecordsDocument, id: &Uuid) -> Result<usize> {
    records
        .entries
        .iter()
        .position(|entry| entry.id == *id)
        .ok_or(VaultError::NotFound(*id))
}

fn ensure_unique_slot(
    records: &RecordsDocument,
    service: &str,
    username: &str,
    except: Option<&Uuid>,
) -> Result<()> {
    let taken = records
        .entries
        .iter()
        .filter(|entry| Some(&entry.id) != except)
        .any(|entry| entry.same_slot(service, username));
    if taken {
        return Err(VaultError::DuplicateEntry {
            service: service.to_string(),
            username: username.to_string(),
        });
    }
    Ok(())
}
