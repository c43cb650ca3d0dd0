//! AES-256-GCM secret encryption with a 16-byte random nonce.
//!
//! Token layout is `nonce(16) || tag(16) || ciphertext`, encoded as
//! URL-safe base64 without padding. The nonce is freshly random on
//! every call, so encrypting the same plaintext twice never yields the
//! same token.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::CryptoError;

/// AES-256-GCM instantiated with a 16-byte nonce.
type Cipher = AesGcm<Aes256, U16>;

const NONCE_LENGTH: usize = 16;
const TAG_LENGTH: usize = 16;

/// Stateless codec holding the 32-byte process key.
#[derive(Clone)]
pub struct SecretCipher {
    key: [u8; 32],
}

impl std::fmt::Debug for SecretCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must not leak through Debug output.
        f.debug_struct("SecretCipher").finish_non_exhaustive()
    }
}

impl SecretCipher {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Build a cipher from the process-wide secret configuration value.
    ///
    /// Exactly two encodings are accepted: a 64-character hex string,
    /// or a base64url string that decodes to exactly 32 bytes.
    pub fn from_material(material: &str) -> Result<Self, CryptoError> {
        Ok(Self::new(parse_key_material(material)?))
    }

    /// Encrypt a plaintext into a transport-safe token.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let cipher = Cipher::new(Key::<Cipher>::from_slice(&self.key));
        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::<U16>::from_slice(&nonce_bytes);

        let sealed = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptionFailed)?;

        // aes-gcm appends the tag; the stored layout carries it up front.
        let (body, tag) = sealed.split_at(sealed.len() - TAG_LENGTH);
        let mut combined = Vec::with_capacity(NONCE_LENGTH + TAG_LENGTH + body.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(tag);
        combined.extend_from_slice(body);
        Ok(URL_SAFE_NO_PAD.encode(combined))
    }

    /// Decrypt a token produced by [`SecretCipher::encrypt`].
    pub fn decrypt(&self, token: &str) -> Result<String, CryptoError> {
        let combined = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CryptoError::InvalidCiphertext)?;
        if combined.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(CryptoError::InvalidCiphertext);
        }

        let (nonce_bytes, rest) = combined.split_at(NONCE_LENGTH);
        let (tag, body) = rest.split_at(TAG_LENGTH);
        let mut sealed = Vec::with_capacity(body.len() + TAG_LENGTH);
        sealed.extend_from_slice(body);
        sealed.extend_from_slice(tag);

        let cipher = Cipher::new(Key::<Cipher>::from_slice(&self.key));
        let nonce = Nonce::<U16>::from_slice(nonce_bytes);
        let plaintext = cipher
            .decrypt(nonce, sealed.as_ref())
            .map_err(|_| CryptoError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)
    }
}

/// Parse the process-wide secret into a 32-byte key.
fn parse_key_material(material: &str) -> Result<[u8; 32], CryptoError> {
    let material = material.trim();
    if material.is_empty() {
        return Err(CryptoError::InvalidKeyMaterial("value is empty".into()));
    }

    if material.len() == 64 && material.bytes().all(|b| b.is_ascii_hexdigit()) {
        let decoded = hex::decode(material)
            .map_err(|e| CryptoError::InvalidKeyMaterial(format!("hex decode: {e}")))?;
        let mut key = [0u8; 32];
        key.copy_from_slice(&decoded);
        return Ok(key);
    }

    let decoded = URL_SAFE_NO_PAD.decode(material).map_err(|_| {
        CryptoError::InvalidKeyMaterial("expected 64-char hex or base64url".into())
    })?;
    if decoded.len() != 32 {
        return Err(CryptoError::InvalidKeyMaterial(format!(
            "base64url value decodes to {} bytes, need 32",
            decoded.len()
        )));
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&decoded);
    Ok(key)
}
