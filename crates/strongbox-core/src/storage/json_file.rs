//! JSON document storage backend.
//!
//! A vault is a directory holding `master.json` (salt, verification token,
//! KDF parameters) and `entries.json` (the records document). Both are
//! replaced atomically on every write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::traits::VaultStore;
use super::types::RecordsDocument;
use crate::crypto::MasterCredential;
use crate::error::{Result, VaultError};

/// Master credential document filename.
pub const CREDENTIAL_FILE: &str = "master.json";

/// Records document filename.
pub const RECORDS_FILE: &str = "entries.json";

/// Delay before the single retry of a failed write.
const WRITE_RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Vault stored as two JSON documents in a directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) the vault directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                VaultError::Storage(format!(
                    "Failed to create vault directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            restrict_dir_permissions(&dir)?;
        }
        if !dir.is_dir() {
            return Err(VaultError::Storage(format!(
                "Vault path is not a directory: {}",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn credential_path(&self) -> PathBuf {
        self.dir.join(CREDENTIAL_FILE)
    }

    pub fn records_path(&self) -> PathBuf {
        self.dir.join(RECORDS_FILE)
    }

    fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(VaultError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    err
                )))
            }
        };
        serde_json::from_slice(&contents).map(Some).map_err(|e| {
            VaultError::StorageCorrupt(format!("{} does not parse: {}", path.display(), e))
        })
    }

    fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
        Self::write_document_with(path, document, crate::fs::write_atomic)
    }

    /// Serialize and write `document`, retrying a failed `write` once after
    /// a short backoff.
    fn write_document_with<T, W>(path: &Path, document: &T, mut write: W) -> Result<()>
    where
        T: Serialize,
        W: FnMut(&Path, &[u8]) -> io::Result<()>,
    {
        let data = serde_json::to_vec_pretty(document)
            .map_err(|e| VaultError::Storage(format!("Failed to serialize document: {}", e)))?;

        if let Err(first) = write(path, &data) {
            warn!(
                path = %path.display(),
                error = %first,
                "vault write failed, retrying once"
            );
            sleep(WRITE_RETRY_BACKOFF);
            write(path, &data).map_err(|e| {
                VaultError::Storage(format!("Failed to write {}: {}", path.display(), e))
            })?;
        }
        debug!(path = %path.display(), bytes = data.len(), "vault document written");
        Ok(())
    }
}

impl VaultStore for JsonFileStore {
    fn load_credential(&self) -> Result<Option<MasterCredential>> {
        let path = self.credential_path();
        let credential: Option<MasterCredential> = Self::read_document(&path)?;
        if let Some(credential) = credential.as_ref() {
            credential.kdf.validate().map_err(|e| {
                VaultError::StorageCorrupt(format!("{}: {}", path.display(), e))
            })?;
        }
        Ok(credential)
    }

    fn save_credential(&mut self, credential: &MasterCredential) -> Result<()> {
        Self::write_document(&self.credential_path(), credential)
    }

    fn load_records(&self) -> Result<RecordsDocument> {
        Ok(Self::read_document(&self.records_path())?.unwrap_or_default())
    }

    fn save_records(&mut self, records: &RecordsDocument) -> Result<()> {
        Self::write_document(&self.records_path(), records)
    }

    fn destroy(&mut self) -> Result<()> {
        // Records go first: a credential without records is an empty vault,
        // records without their credential are unreadable leftovers.
        for path in [self.records_path(), self.credential_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(VaultError::Storage(format!(
                        "Failed to remove {}: {}",
                        path.display(),
                        err
                    )))
                }
            }
        }
        Ok(())
    }
}

fn restrict_dir_permissions(dir: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(dir)?.permissions();
        perms.set_mode(0o700);
        fs::set_permissions(dir, perms)?;
    }
    #[cfg(not(unix))]
    let _ = dir;
    Ok(())
}
