//! AES-256-GCM envelope for session payloads.
//!
//! Wire format v1:
//! [1 byte: version=1][12 bytes: nonce][N bytes: ciphertext + tag]
//!
//! key    = SHA-256(key material)
//! key id = SHA-256(SHA-256(key material)), bound as AAD

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::types::{
    AES_GCM_NONCE_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, ENVELOPE_VERSION, SUPPORTED_VERSIONS,
};

/// Derive the 256-bit encryption key: a single SHA-256 of the key material.
pub fn derive_key(material: &[u8]) -> [u8; AES_KEY_LENGTH] {
    Sha256::digest(material).into()
}

/// Derive the key identifier: SHA-256 of the derived key.
///
/// Not secret on its own, but only computable from the key material.
pub fn derive_key_id(material: &[u8]) -> [u8; 32] {
    let mut key = derive_key(material);
    let id = Sha256::digest(key).into();
    key.zeroize();
    id
}

/// Generate a random 12-byte nonce for AES-GCM.
fn generate_nonce() -> Result<[u8; AES_GCM_NONCE_LENGTH], CryptoError> {
    let mut nonce = [0u8; AES_GCM_NONCE_LENGTH];
    getrandom::getrandom(&mut nonce).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(nonce)
}

/// Symmetric cipher for session envelopes, keyed once from the configured
/// key material.
pub struct SessionCipher {
    cipher: Aes256Gcm,
    key_id: [u8; 32],
}

impl SessionCipher {
    pub fn new(material: &[u8]) -> Result<Self, CryptoError> {
        let mut key = derive_key(material);
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()));
        key.zeroize();
        Ok(Self {
            cipher: cipher?,
            key_id: derive_key_id(material),
        })
    }

    /// Encrypt a padded plaintext into a v1 envelope.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce_bytes = generate_nonce()?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(
                nonce,
                Payload {
                    msg: plaintext,
                    aad: &self.key_id,
                },
            )
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        let mut envelope = Vec::with_capacity(1 + nonce_bytes.len() + ciphertext.len());
        envelope.push(ENVELOPE_VERSION);
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(envelope)
    }

    /// Decrypt a v1 envelope. Fails on a wrong key or any tampering.
    pub fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let min_length = 1 + AES_GCM_NONCE_LENGTH + AES_GCM_TAG_LENGTH;
        if envelope.len() < min_length {
            return Err(CryptoError::DataTooShort);
        }

        let version = envelope[0];
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(CryptoError::UnsupportedVersion(version));
        }

        let nonce = Nonce::from_slice(&envelope[1..1 + AES_GCM_NONCE_LENGTH]);
        let ciphertext = &envelope[1 + AES_GCM_NONCE_LENGTH..];

        self.cipher
            .decrypt(
                nonce,
                Payload {
                    msg: ciphertext,
                    aad: &self.key_id,
                },
            )
            .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
    }
}

impl Drop for SessionCipher {
    fn drop(&mut self) {
        self.key_id.zeroize();
    }
}
