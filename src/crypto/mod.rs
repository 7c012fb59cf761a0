//! Fernet encryption of login secrets, pure and without I/O
//!
//! Tokens are the same AES-128-CBC + HMAC-SHA256 format that Python's
//! `cryptography.fernet` produces, so existing `vault.json` files keep
//! working.

mod decrypt;
mod encrypt;

pub use decrypt::decrypt_password;
pub use encrypt::encrypt_password;

use fernet::Fernet;

use crate::aliases::VaultKeyText;
use crate::error::{VaultError, VaultResult};

/// A validated vault key, ready to encrypt and decrypt
pub struct VaultCipher {
    fernet: Fernet,
}

impl VaultCipher {
    pub fn new(key: &VaultKeyText) -> VaultResult<Self> {
        let fernet = Fernet::new(key.expose_secret().trim()).ok_or(VaultError::InvalidKey)?;
        Ok(Self { fernet })
    }
}

/// Fresh random Fernet key (URL-safe base64, 44 characters)
pub fn generate_key() -> VaultKeyText {
    VaultKeyText::new(Fernet::generate_key())
}
