//! Cryptographic core for Letterlock.
//!
//! This module provides:
//! - Single-use letter keys with automatic zeroization
//! - Authenticated encryption using AES-256-GCM
//! - Fragment-safe key export/import for share links
//!
//! # Security Guarantees
//! - Key material is automatically zeroized on drop
//! - No plaintext or key material is ever logged
//! - A fresh random nonce is generated for every encryption
//! - Decryption failures are generic and never yield partial plaintext

pub mod aead;
pub mod keys;

pub use aead::{decrypt, encrypt, SealedLetter, NONCE_SIZE, TAG_SIZE};
pub use keys::{LetterKey, KEY_LENGTH};
