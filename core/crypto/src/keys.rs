//! Letter key type with secure memory handling.
//!
//! A letter key is generated fresh for exactly one letter, exported into
//! the share-link fragment, and re-imported on the recipient's device.
//! It zeroizes its memory on drop so key material does not persist.

use aes_gcm::{
    aead::{KeyInit, OsRng},
    Aes256Gcm,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use letterlock_common::{Error, Result};

/// Length of letter keys in bytes (256-bit).
pub const KEY_LENGTH: usize = 32;

/// Symmetric key for sealing one letter.
///
/// Never persisted and never transmitted to the server: the only channel
/// carrying it to the recipient is the URL fragment of the share link.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LetterKey {
    key: [u8; KEY_LENGTH],
}

impl LetterKey {
    /// Generate a fresh random key from the OS CSPRNG.
    ///
    /// # Postconditions
    /// - Returns a key suitable for AES-256-GCM
    /// - Two calls produce independent keys
    pub fn generate() -> Self {
        let key: [u8; KEY_LENGTH] = Aes256Gcm::generate_key(&mut OsRng).into();
        Self { key }
    }

    /// Create a key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Get the key bytes.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }

    /// Serialize the raw key to a URL-fragment-safe encoding.
    ///
    /// Uses unpadded URL-safe base64 so the result can be appended after
    /// `#` in a share link verbatim.
    pub fn export(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.key)
    }

    /// Inverse of [`LetterKey::export`].
    ///
    /// # Errors
    /// - `InvalidKeyFormat` if the text does not decode to exactly
    ///   KEY_LENGTH bytes
    pub fn import(encoded: &str) -> Result<Self> {
        let mut bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| Error::InvalidKeyFormat(format!("Key is not valid base64: {}", e)))?;

        if bytes.len() != KEY_LENGTH {
            bytes.zeroize();
            return Err(Error::InvalidKeyFormat(format!(
                "Invalid key length: expected {}, got {}",
                KEY_LENGTH,
                bytes.len()
            )));
        }

        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self { key })
    }
}

impl fmt::Debug for LetterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LetterKey([REDACTED])")
    }
}
