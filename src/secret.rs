//! Key secret generation and hashing.
//!
//! Plaintext keys are shown to the caller once, at issuance. Only the SHA-256
//! hash and a short display prefix (`start`) are stored.

use sha2::{Digest, Sha256};

/// Characters of the random part kept in `start`.
const START_LEN: usize = 4;

/// A freshly issued key.
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    /// Full key, returned to the caller and never stored
    pub plaintext: String,
    /// Display prefix, stored in `keys.start`
    pub start: String,
    /// Stored in `keys.hash`
    pub hash: String,
}

/// SHA-256 of the plaintext key, as 64 lowercase hex characters.
pub fn hash_secret(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a new key with an optional prefix.
///
/// # Format
///
/// `<prefix>_<32 hex chars>` (16 random bytes), or just the hex part when no
/// prefix is given. `start` is the prefix plus the first four hex characters.
pub fn generate_key(prefix: Option<&str>) -> GeneratedKey {
    let bytes: [u8; 16] = rand::random();
    let random = hex::encode(bytes);

    let head = match prefix {
        Some(p) if !p.is_empty() => format!("{p}_"),
        _ => String::new(),
    };

    let plaintext = format!("{head}{random}");
    let start = format!("{head}{}", &random[..START_LEN]);
    let hash = hash_secret(&plaintext);

    GeneratedKey {
        plaintext,
        start,
        hash,
    }
}

/// Check a presented key against a stored hash.
pub fn verify_secret(candidate: &str, stored_hash: &str) -> bool {
    hash_secret(candidate).eq_ignore_ascii_case(stored_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_sha256_hex() {
        assert_eq!(
            hash_secret("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_generated_key_shape() {
        let key = generate_key(Some("sk"));
        assert!(key.plaintext.starts_with("sk_"));
        assert_eq!(key.plaintext.len(), 3 + 32);
        assert_eq!(key.start.len(), 3 + START_LEN);
        assert!(key.plaintext.starts_with(&key.start));
        assert_eq!(key.hash, hash_secret(&key.plaintext));
    }

    #[test]
    fn test_generated_key_without_prefix() {
        let key = generate_key(None);
        assert_eq!(key.plaintext.len(), 32);
        assert_eq!(key.start, key.plaintext[..START_LEN]);
    }

    #[test]
    fn test_keys_are_unique() {
        assert_ne!(generate_key(None).plaintext, generate_key(None).plaintext);
    }

    #[test]
    fn test_verify() {
        let key = generate_key(Some("api"));
        assert!(verify_secret(&key.plaintext, &key.hash));
        assert!(verify_secret(&key.plaintext, &key.hash.to_uppercase()));
        assert!(!verify_secret("api_wrong", &key.hash));
    }
}
