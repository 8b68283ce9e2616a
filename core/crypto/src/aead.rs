//! Authenticated encryption using AES-256-GCM.
//!
//! AES-256-GCM provides both confidentiality and authenticity. The 12-byte
//! nonce is generated randomly per encryption and stored alongside the
//! ciphertext; it is required for decryption but is not secret. Because
//! each letter key encrypts exactly one message, random nonces need no
//! counter state and the birthday bound is irrelevant at this volume.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::keys::LetterKey;
use letterlock_common::{Error, Result};

/// Nonce size for AES-256-GCM (12 bytes).
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size (16 bytes).
pub const TAG_SIZE: usize = 16;

/// Encrypted letter body in wire form.
///
/// Both fields are base64 strings, safe to store and transmit as text.
/// Neither is secret: without the key they reveal nothing but length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedLetter {
    /// Base64 of ciphertext || tag.
    pub ciphertext: String,
    /// Base64 of the per-message nonce.
    pub iv: String,
}

/// Encrypt a letter body under a letter key.
///
/// # Postconditions
/// - A fresh random nonce is generated for this call
/// - Both outputs are base64 encoded
/// - Encrypting the same plaintext twice yields different ciphertext and iv
///
/// # Errors
/// - Returns `Crypto` error if the cipher itself fails
pub fn encrypt(key: &LetterKey, plaintext: &str) -> Result<SealedLetter> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| Error::Crypto(format!("Encryption failed: {}", e)))?;

    Ok(SealedLetter {
        ciphertext: STANDARD.encode(&ciphertext),
        iv: STANDARD.encode(nonce),
    })
}

/// Decrypt a letter body.
///
/// # Preconditions
/// - `ciphertext` and `iv` are the base64 strings produced by [`encrypt`]
///
/// # Postconditions
/// - Returns the original plaintext only if the authentication tag verifies
///
/// # Errors
/// - `DecryptionFailure` on wrong key, corrupted ciphertext/iv, or
///   tampering. The error is deliberately generic and carries no detail
///   about which input was wrong; partial plaintext is never returned.
pub fn decrypt(key: &LetterKey, ciphertext: &str, iv: &str) -> Result<String> {
    let ciphertext = STANDARD
        .decode(ciphertext)
        .map_err(|_| Error::DecryptionFailure)?;
    let iv = STANDARD.decode(iv).map_err(|_| Error::DecryptionFailure)?;

    if iv.len() != NONCE_SIZE || ciphertext.len() < TAG_SIZE {
        return Err(Error::DecryptionFailure);
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let nonce = Nonce::from_slice(&iv);

    let plaintext = cipher
        .decrypt(nonce, ciphertext.as_slice())
        .map_err(|_| Error::DecryptionFailure)?;

    String::from_utf8(plaintext).map_err(|_| Error::DecryptionFailure)
}
