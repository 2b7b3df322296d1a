pub mod aes;

use thiserror::Error;

pub use aes::{decrypt, decrypt_from_text, encrypt, encrypt_to_text, AesSecret};

/// Errors returned by the encryption helpers.
///
/// These are handed straight back to the caller, nothing in this module logs
/// or swallows them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretError {
    #[error("invalid key size {0}, expect 16, 24 or 32 bytes")]
    InvalidKeySize(usize),

    #[error("secure random source is unavailable")]
    RandomnessUnavailable,

    #[error("plaintext exceeds the AES-GCM limit of 2^36 - 32 bytes")]
    PlaintextTooLarge,

    #[error("malformed ciphertext")]
    MalformedCiphertext,

    #[error("message authentication failed")]
    AuthenticationFailed,
}

/// Trait for data encryption and decryption operations.
///
/// Implementors own their key material; the same value can be shared across
/// threads and used concurrently.
pub trait Secret {
    /// Encrypts the provided data. The output is self-describing and can be
    /// passed to [`Secret::decrypt`] as is.
    ///
    /// Besides randomness failures this only errors with
    /// [`SecretError::PlaintextTooLarge`], never with a ciphertext error.
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError>;

    /// Decrypts and authenticates the provided data. No plaintext is
    /// returned unless authentication succeeds.
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError>;
}
