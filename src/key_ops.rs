//! Where the vault key comes from
//!
//! By default the vault file carries its own key in plaintext
//! ([`EmbeddedKey`]). [`EnvKey`] reads it from the environment instead.

use blake3::Hasher;
use tracing::debug;

use crate::aliases::VaultKeyText;
use crate::config::{KeySource, KeysConfig};
use crate::consts::KEY_FINGERPRINT_HEX_LEN;
use crate::error::{VaultError, VaultResult};
use crate::vault::VaultDocument;

/// Yields the key used to encrypt and decrypt a vault's records
pub trait KeyProvider {
    fn vault_key(&self, document: &VaultDocument) -> VaultResult<VaultKeyText>;
}

/// The `key` field stored in the vault file itself
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedKey;

impl KeyProvider for EmbeddedKey {
    fn vault_key(&self, document: &VaultDocument) -> VaultResult<VaultKeyText> {
        Ok(VaultKeyText::new(document.key.clone()))
    }
}

/// A key held in an environment variable; the file's `key` field is ignored
#[derive(Debug, Clone)]
pub struct EnvKey {
    var: String,
}

impl EnvKey {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl KeyProvider for EnvKey {
    fn vault_key(&self, _document: &VaultDocument) -> VaultResult<VaultKeyText> {
        debug!(var = %self.var, "reading vault key from environment");
        std::env::var(&self.var)
            .map(VaultKeyText::new)
            .map_err(|_| VaultError::MissingKey {
                var: self.var.clone(),
            })
    }
}

/// Build the provider selected by the `[keys]` config table
pub fn provider_from_config(keys: &KeysConfig) -> Box<dyn KeyProvider> {
    match keys.source {
        KeySource::Vault => Box::new(EmbeddedKey),
        KeySource::Env => Box::new(EnvKey::new(keys.env_var.clone())),
    }
}

/// Short BLAKE3 fingerprint, safe to print or log in place of the key
pub fn key_fingerprint(key: &VaultKeyText) -> String {
    let mut hex = Hasher::new()
        .update(key.expose_secret().trim().as_bytes())
        .finalize()
        .to_hex()
        .to_string();
    hex.truncate(KEY_FINGERPRINT_HEX_LEN);
    hex
}
