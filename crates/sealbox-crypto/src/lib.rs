//! Sealbox Crypto — AES-256-GCM encryption of provider keys at rest.
//!
//! The codec turns a secret string into a self-contained, transport-safe
//! token and back. Key material is parsed once at construction time and
//! carried explicitly; nothing in this crate reads ambient global state.

pub mod cipher;
pub mod error;

pub use cipher::SecretCipher;
pub use error::CryptoError;
