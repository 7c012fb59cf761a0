// src/crypto/decrypt.rs
use crate::aliases::LoginPassword;
use crate::error::{VaultError, VaultResult};
use crate::vault::CredentialRecord;

use super::VaultCipher;

/// Decrypt the password token of one record
///
/// Fails with [`VaultError::Decryption`] if the HMAC does not verify under
/// this key, which covers both a wrong key and a tampered token.
pub fn decrypt_password(
    cipher: &VaultCipher,
    record: &CredentialRecord,
) -> VaultResult<LoginPassword> {
    let plaintext = cipher
        .fernet
        .decrypt(record.password.trim())
        .map_err(|_| VaultError::Decryption {
            name: record.name.clone(),
        })?;

    let text = String::from_utf8(plaintext).map_err(|_| VaultError::NotUtf8 {
        name: record.name.clone(),
    })?;
    Ok(LoginPassword::new(text))
}
