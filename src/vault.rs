// src/vault.rs
//! The credential vault: `vault.json` plus the operations on it
//!
//! The file is read, changed and rewritten on every invocation. Nothing is
//! cached between calls. Writes go to a temporary file in the same
//! directory which is then persisted over the original.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::aliases::{LoginPassword, VaultKeyText};
use crate::crypto::{decrypt_password, encrypt_password, generate_key, VaultCipher};
use crate::error::{VaultError, VaultResult};
use crate::key_ops::{key_fingerprint, EmbeddedKey, KeyProvider};

/// On-disk shape of `vault.json`
///
/// Fields this tool does not know about are kept in `extra` and written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDocument {
    pub key: String,
    #[serde(default)]
    pub users: Vec<CredentialRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One registered user; `password` is a Fernet token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record with its password decrypted, ready for one automation run
pub struct Credential {
    pub name: String,
    pub username: String,
    pub password: LoginPassword,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

pub struct Vault {
    path: PathBuf,
    keys: Box<dyn KeyProvider>,
}

impl Vault {
    pub fn new(path: impl Into<PathBuf>, keys: Box<dyn KeyProvider>) -> Self {
        Self {
            path: path.into(),
            keys,
        }
    }

    /// Vault whose key lives in the file itself
    pub fn with_embedded_key(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Box::new(EmbeddedKey))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a new vault with a fresh key and no users
    ///
    /// Refuses to touch an existing file. Returns the generated key so the
    /// caller can show its fingerprint.
    pub fn init(&self) -> VaultResult<VaultKeyText> {
        if self.path.exists() {
            return Err(VaultError::AlreadyExists(self.path.clone()));
        }
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let key = generate_key();
        let document = VaultDocument {
            key: key.expose_secret().clone(),
            users: Vec::new(),
            extra: Map::new(),
        };

        let tmp = self.write_temp(&document)?;
        tmp.persist_noclobber(&self.path).map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                VaultError::AlreadyExists(self.path.clone())
            } else {
                self.io_error(e.error)
            }
        })?;

        info!(path = %self.path.display(), fingerprint = %key_fingerprint(&key), "created vault");
        Ok(key)
    }

    /// Encrypt `password` and append a new record
    ///
    /// Duplicate usernames are accepted and produce duplicate records.
    pub fn register(
        &self,
        name: &str,
        username: &str,
        password: &LoginPassword,
    ) -> VaultResult<CredentialRecord> {
        if name.trim().is_empty() {
            return Err(VaultError::EmptyField { field: "name" });
        }
        if username.trim().is_empty() {
            return Err(VaultError::EmptyField { field: "username" });
        }
        if password.expose_secret().is_empty() {
            return Err(VaultError::EmptyField { field: "password" });
        }

        let mut document = self.load_document()?;
        let cipher = self.cipher_for(&document)?;

        let record = CredentialRecord {
            name: name.to_owned(),
            username: username.to_owned(),
            password: encrypt_password(&cipher, password),
            extra: Map::new(),
        };
        document.users.push(record.clone());
        self.save_document(&document)?;

        info!(%username, position = document.users.len() - 1, "registered user");
        Ok(record)
    }

    /// Decrypt the record at `index`, or every record in stored order
    ///
    /// Every selected password is decrypted before this returns, so a bad
    /// key or a tampered record fails the whole call up front.
    pub fn load_for_run(&self, index: Option<usize>) -> VaultResult<Vec<Credential>> {
        let document = self.load_document()?;

        let selected: Vec<&CredentialRecord> = match index {
            Some(index) => {
                let record = document
                    .users
                    .get(index)
                    .ok_or(VaultError::IndexOutOfRange {
                        index,
                        len: document.users.len(),
                    })?;
                vec![record]
            }
            None => document.users.iter().collect(),
        };
        if selected.is_empty() {
            debug!("no users registered, nothing to decrypt");
            return Ok(Vec::new());
        }

        let cipher = self.cipher_for(&document)?;
        selected
            .into_iter()
            .map(|record| -> VaultResult<Credential> {
                Ok(Credential {
                    name: record.name.clone(),
                    username: record.username.clone(),
                    password: decrypt_password(&cipher, record)?,
                })
            })
            .collect()
    }

    /// All records as stored, nothing decrypted
    pub fn records(&self) -> VaultResult<Vec<CredentialRecord>> {
        Ok(self.load_document()?.users)
    }

    pub fn load_document(&self) -> VaultResult<VaultDocument> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let document: VaultDocument =
            serde_json::from_str(&raw).map_err(|source| VaultError::Json {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), users = document.users.len(), "loaded vault");
        Ok(document)
    }

    /// Full overwrite, pretty-printed with a four-space indent
    pub fn save_document(&self, document: &VaultDocument) -> VaultResult<()> {
        let tmp = self.write_temp(document)?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    fn cipher_for(&self, document: &VaultDocument) -> VaultResult<VaultCipher> {
        let key = self.keys.vault_key(document)?;
        debug!(fingerprint = %key_fingerprint(&key), "using vault key");
        VaultCipher::new(&key)
    }

    fn write_temp(&self, document: &VaultDocument) -> VaultResult<NamedTempFile> {
        let bytes = to_pretty_json(document).map_err(|source| VaultError::Json {
            path: self.path.clone(),
            source,
        })?;

        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&bytes).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        Ok(tmp)
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    fn io_error(&self, source: std::io::Error) -> VaultError {
        VaultError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn to_pretty_json(document: &VaultDocument) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document.serialize(&mut serializer)?;
    Ok(out)
}
