//! Portable AEAD backend.
//!
//! Pure-Rust AES-CCM and AES-GCM for modes and shapes the native engine
//! does not expose. Output is byte-identical to any conforming
//! implementation, so data sealed here opens anywhere else.

mod ccm;
mod gcm;

use crate::backend::AeadBackend;
use crate::error::CryptoError;
use crate::params::{AesEncryptionParams, Algorithm};
use crate::secret::SecretBuffer;

/// The portable fallback engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct PortableAead;

impl AeadBackend for PortableAead {
    fn name(&self) -> &'static str {
        "portable"
    }

    fn supports(&self, algorithm: &Algorithm) -> bool {
        matches!(algorithm, Algorithm::AesCcm | Algorithm::AesGcm)
    }

    fn seal(
        &self,
        key: &[u8],
        plaintext: &[u8],
        params: &AesEncryptionParams,
    ) -> Result<Vec<u8>, CryptoError> {
        match &params.algorithm {
            Algorithm::AesCcm => ccm::seal(key, plaintext, params),
            Algorithm::AesGcm => gcm::seal(key, plaintext, params),
            other => Err(CryptoError::NotSupported(format!(
                "portable engine has no `{other}`"
            ))),
        }
    }

    fn open(
        &self,
        key: &[u8],
        ciphertext: &[u8],
        params: &AesEncryptionParams,
    ) -> Result<SecretBuffer, CryptoError> {
        match &params.algorithm {
            Algorithm::AesCcm => ccm::open(key, ciphertext, params),
            Algorithm::AesGcm => gcm::open(key, ciphertext, params),
            other => Err(CryptoError::NotSupported(format!(
                "portable engine has no `{other}`"
            ))),
        }
    }
}
