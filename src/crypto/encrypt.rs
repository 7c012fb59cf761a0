// src/crypto/encrypt.rs
use crate::aliases::LoginPassword;

use super::VaultCipher;

/// Encrypt a login secret → Fernet token text as stored in `vault.json`
pub fn encrypt_password(cipher: &VaultCipher, password: &LoginPassword) -> String {
    cipher.fernet.encrypt(password.expose_secret().as_bytes())
}
