//! Property tests for the cipher adapter laws.

use proptest::prelude::*;

use letterlock_crypto::{decrypt, encrypt, LetterKey, KEY_LENGTH};

proptest! {
    /// decrypt(encrypt(P, K), K) == P for all plaintexts and keys.
    #[test]
    fn roundtrip_law(plaintext in ".{0,2000}", key_bytes in prop::array::uniform32(any::<u8>())) {
        let key = LetterKey::from_bytes(key_bytes);
        let sealed = encrypt(&key, &plaintext).unwrap();
        let decrypted = decrypt(&key, &sealed.ciphertext, &sealed.iv).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    /// An exported-then-imported key decrypts anything encrypted under the original.
    #[test]
    fn export_import_preserves_behavior(plaintext in ".{0,500}") {
        let key = LetterKey::generate();
        let sealed = encrypt(&key, &plaintext).unwrap();

        let reimported = LetterKey::import(&key.export()).unwrap();
        let decrypted = decrypt(&reimported, &sealed.ciphertext, &sealed.iv).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    /// Re-encrypting the same plaintext under the same key never repeats the nonce.
    #[test]
    fn nonce_freshness(plaintext in ".{0,200}") {
        let key = LetterKey::generate();
        let a = encrypt(&key, &plaintext).unwrap();
        let b = encrypt(&key, &plaintext).unwrap();
        prop_assert_ne!(&a.iv, &b.iv);
        prop_assert_ne!(&a.ciphertext, &b.ciphertext);
    }

    /// A key differing in any byte fails to decrypt, with no plaintext-shaped result.
    #[test]
    fn wrong_key_fails(plaintext in ".{0,200}", flip_at in 0usize..KEY_LENGTH) {
        let key = LetterKey::generate();
        let sealed = encrypt(&key, &plaintext).unwrap();

        let mut other_bytes = *key.as_bytes();
        other_bytes[flip_at] ^= 0x01;
        let other = LetterKey::from_bytes(other_bytes);

        prop_assert!(decrypt(&other, &sealed.ciphertext, &sealed.iv).is_err());
    }

    /// Arbitrary strings never import as keys unless they decode to 32 bytes.
    #[test]
    fn import_rejects_garbage(garbage in "[A-Za-z0-9_-]{0,40}") {
        // 32 raw bytes encode to 43 unpadded base64 chars.
        if garbage.len() != 43 {
            prop_assert!(LetterKey::import(&garbage).is_err());
        }
    }
}
