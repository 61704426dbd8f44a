//! Bot token encryption at rest.
//!
//! Tokens are sealed with AES-256-GCM under a key derived from the
//! `ENCRYPTION_KEY` passphrase. The stored form is `noncehex:taghex:datahex`.
//! Values without a `:` predate encryption and are returned as-is.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use sha2::{Digest, Sha256};

use crate::server::error::internal::InternalError;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Symmetric cipher for bot tokens.
#[derive(Clone)]
pub struct TokenCipher {
    key: [u8; 32],
}

impl TokenCipher {
    /// Derives the 256-bit key from a passphrase.
    pub fn new(passphrase: &str) -> Self {
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { key }
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key))
    }

    /// Encrypts a plaintext token into its stored form.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, InternalError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher()
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| InternalError::TokenEncryption)?;

        // aes-gcm appends the tag to the ciphertext
        let (data, tag) = sealed.split_at(sealed.len() - TAG_LEN);

        Ok(format!(
            "{}:{}:{}",
            hex::encode(nonce),
            hex::encode(tag),
            hex::encode(data)
        ))
    }

    /// Decrypts a stored token. Legacy plaintext tokens pass through unchanged.
    pub fn decrypt(&self, stored: &str) -> Result<String, InternalError> {
        if !stored.contains(':') {
            return Ok(stored.to_string());
        }

        let parts: Vec<&str> = stored.split(':').collect();
        let [nonce_hex, tag_hex, data_hex] = parts.as_slice() else {
            return Err(InternalError::TokenDecryption(
                "expected three ':' separated parts".to_string(),
            ));
        };

        let decode = |part: &str| {
            hex::decode(part).map_err(|e| InternalError::TokenDecryption(e.to_string()))
        };
        let nonce = decode(nonce_hex)?;
        let tag = decode(tag_hex)?;
        let mut sealed = decode(data_hex)?;

        if nonce.len() != NONCE_LEN || tag.len() != TAG_LEN {
            return Err(InternalError::TokenDecryption(
                "nonce or tag has the wrong length".to_string(),
            ));
        }
        sealed.extend_from_slice(&tag);

        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(&nonce), sealed.as_ref())
            .map_err(|_| InternalError::TokenDecryption("authentication failed".to_string()))?;

        String::from_utf8(plaintext).map_err(|e| InternalError::TokenDecryption(e.to_string()))
    }
}

/// Whether a stored token is in the encrypted `nonce:tag:data` form.
pub fn is_encrypted(stored: &str) -> bool {
    let parts: Vec<&str> = stored.split(':').collect();
    parts.len() == 3
        && parts[0].len() == NONCE_LEN * 2
        && parts[1].len() == TAG_LEN * 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypted_token_decrypts_with_same_key() {
        let cipher = TokenCipher::new("passphrase");
        let stored = cipher.encrypt("MTIz.abc.def").unwrap();

        assert!(is_encrypted(&stored));
        assert_eq!(cipher.decrypt(&stored).unwrap(), "MTIz.abc.def");
    }

    #[test]
    fn nonces_differ_between_encryptions() {
        let cipher = TokenCipher::new("passphrase");
        assert_ne!(cipher.encrypt("token").unwrap(), cipher.encrypt("token").unwrap());
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let stored = TokenCipher::new("one").encrypt("token").unwrap();
        assert!(TokenCipher::new("two").decrypt(&stored).is_err());
    }

    #[test]
    fn legacy_plaintext_passes_through() {
        let cipher = TokenCipher::new("passphrase");
        assert!(!is_encrypted("MTIz.abc.def"));
        assert_eq!(cipher.decrypt("MTIz.abc.def").unwrap(), "MTIz.abc.def");
    }

    #[test]
    fn malformed_value_is_rejected() {
        let cipher = TokenCipher::new("passphrase");
        assert!(cipher.decrypt("zz:yy").is_err());
        assert!(cipher.decrypt("00:11:22").is_err());
    }
}
