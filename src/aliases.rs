//! Secret wrappers used for anything that must not linger in memory
//!
//! Both types zeroize on drop and redact themselves in `Debug` output.

pub use secure_gate::dynamic_alias;

// A decrypted login secret, exposed only when typed into the login form
dynamic_alias!(LoginPassword, String);

// The Fernet key text (URL-safe base64 of 32 bytes)
dynamic_alias!(VaultKeyText, String);
