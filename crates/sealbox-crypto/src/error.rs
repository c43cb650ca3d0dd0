//! Crypto error types.

use sealbox_core::error::SealboxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// The configured process secret is not a usable 32-byte key.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// The token is structurally malformed (bad encoding or too short).
    #[error("invalid ciphertext token")]
    InvalidCiphertext,

    /// Tag verification failed: wrong key or tampered token. No partial
    /// plaintext is ever returned on this path.
    #[error("decryption failed")]
    DecryptionFailed,

    #[error("encryption failed")]
    EncryptionFailed,
}

impl From<CryptoError> for SealboxError {
    fn from(err: CryptoError) -> Self {
        SealboxError::Crypto(err.to_string())
    }
}
