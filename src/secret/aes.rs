use std::fmt;

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};

use crate::code::{base64_url_decode, base64_url_encode};

use super::{Secret, SecretError};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// AES-GCM symmetric encryption with a caller supplied key.
///
/// The key size selects the variant: 16 bytes for AES-128, 24 bytes for
/// AES-192 and 32 bytes for AES-256. Every call to [`Secret::encrypt`] draws
/// a fresh 12 bytes nonce from the operating system and prepends it to the
/// sealed output:
///
/// ```text
/// [12 bytes nonce][encrypted data][16 bytes tag]
/// ```
///
/// No associated data is bound. The key is never derived, stored or
/// generated here.
///
/// # Examples
/// ```
/// use utilkit::secret::{AesSecret, Secret};
///
/// let secret = AesSecret::new(b"1234567891234568").unwrap();
///
/// let encrypted = secret.encrypt(b"some text").unwrap();
/// assert_eq!(encrypted.len(), 12 + 9 + 16);
///
/// let decrypted = secret.decrypt(&encrypted).unwrap();
/// assert_eq!(decrypted, b"some text");
/// ```
#[derive(Clone)]
pub struct AesSecret {
    cipher: Cipher,
}

#[derive(Clone)]
enum Cipher {
    Aes128(Box<Aes128Gcm>),
    Aes192(Box<Aes192Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl AesSecret {
    pub const NONCE_LENGTH: usize = 12;
    pub const TAG_LENGTH: usize = 16;

    /// Creates a secret from a raw AES key.
    ///
    /// # Errors
    /// [`SecretError::InvalidKeySize`] unless the key is 16, 24 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, SecretError> {
        let cipher = match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(|c| Cipher::Aes128(Box::new(c))),
            24 => Aes192Gcm::new_from_slice(key).map(|c| Cipher::Aes192(Box::new(c))),
            32 => Aes256Gcm::new_from_slice(key).map(|c| Cipher::Aes256(Box::new(c))),
            size => return Err(SecretError::InvalidKeySize(size)),
        };
        match cipher {
            Ok(cipher) => Ok(Self { cipher }),
            Err(_) => Err(SecretError::InvalidKeySize(key.len())),
        }
    }

    /// Size of the key this secret was built with, in bytes.
    pub fn key_size(&self) -> usize {
        match self.cipher {
            Cipher::Aes128(_) => 16,
            Cipher::Aes192(_) => 24,
            Cipher::Aes256(_) => 32,
        }
    }

    /// Encrypts and encodes the result as URL-safe base64 without padding.
    pub fn encrypt_to_text(&self, data: &[u8]) -> Result<String, SecretError> {
        let encrypted = self.encrypt(data)?;
        Ok(base64_url_encode(encrypted))
    }

    /// Decodes URL-safe unpadded base64 and decrypts it.
    ///
    /// Text that is not valid base64 is treated as an empty ciphertext, so it
    /// fails the same way a truncated ciphertext does
    /// ([`SecretError::MalformedCiphertext`]) instead of with a dedicated
    /// decoding error.
    pub fn decrypt_from_text(&self, text: &str) -> Result<Vec<u8>, SecretError> {
        let data = base64_url_decode(text).unwrap_or_default();
        self.decrypt(&data)
    }

    fn generate_nonce() -> Result<[u8; Self::NONCE_LENGTH], SecretError> {
        let mut nonce = [0u8; Self::NONCE_LENGTH];
        if OsRng.try_fill_bytes(&mut nonce).is_err() {
            return Err(SecretError::RandomnessUnavailable);
        }
        Ok(nonce)
    }
}

impl Secret for AesSecret {
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError> {
        check_plaintext_len(data.len())?;
        let nonce = Self::generate_nonce()?;
        let nonce_ref = Nonce::<U12>::from_slice(&nonce);

        let sealed = match self.cipher {
            Cipher::Aes128(ref c) => c.encrypt(nonce_ref, data),
            Cipher::Aes192(ref c) => c.encrypt(nonce_ref, data),
            Cipher::Aes256(ref c) => c.encrypt(nonce_ref, data),
        };
        let sealed = sealed.map_err(|_| SecretError::PlaintextTooLarge)?;

        let mut ret = Vec::with_capacity(Self::NONCE_LENGTH + sealed.len());
        ret.extend_from_slice(&nonce);
        ret.extend(sealed);
        Ok(ret)
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError> {
        if data.len() < Self::NONCE_LENGTH {
            return Err(SecretError::MalformedCiphertext);
        }

        let (nonce, sealed) = data.split_at(Self::NONCE_LENGTH);
        let nonce = Nonce::<U12>::from_slice(nonce);

        let opened = match self.cipher {
            Cipher::Aes128(ref c) => c.decrypt(nonce, sealed),
            Cipher::Aes192(ref c) => c.decrypt(nonce, sealed),
            Cipher::Aes256(ref c) => c.decrypt(nonce, sealed),
        };
        opened.map_err(|_| SecretError::AuthenticationFailed)
    }
}

/// GCM plaintext limit, 2^36 - 32 bytes.
const MAX_PLAINTEXT_LENGTH: u64 = (1 << 36) - 32;

fn check_plaintext_len(len: usize) -> Result<(), SecretError> {
    if len as u64 > MAX_PLAINTEXT_LENGTH {
        return Err(SecretError::PlaintextTooLarge);
    }
    Ok(())
}

impl fmt::Debug for AesSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesSecret")
            .field("key_size", &self.key_size())
            .finish_non_exhaustive()
    }
}

/// Encrypts `plaintext` under `key` with AES-GCM, returning
/// `nonce || ciphertext || tag`. See [`AesSecret`].
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, SecretError> {
    AesSecret::new(key)?.encrypt(plaintext)
}

/// Reverses [`encrypt`].
pub fn decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, SecretError> {
    AesSecret::new(key)?.decrypt(ciphertext)
}

/// [`encrypt`], then URL-safe base64 without padding.
pub fn encrypt_to_text(plaintext: &[u8], key: &[u8]) -> Result<String, SecretError> {
    AesSecret::new(key)?.encrypt_to_text(plaintext)
}

/// Reverses [`encrypt_to_text`]. See [`AesSecret::decrypt_from_text`] for how
/// invalid base64 is handled.
pub fn decrypt_from_text(text: &str, key: &[u8]) -> Result<Vec<u8>, SecretError> {
    AesSecret::new(key)?.decrypt_from_text(text)
}
