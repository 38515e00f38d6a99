//! AES-GCM on `ring`.
//!
//! `ring` only exposes the shape every modern platform accelerates:
//! 128- or 256-bit keys, a 96-bit IV and a full 128-bit tag. Anything else
//! is reported as [`CryptoError::NotSupported`] so the routing table can send
//! it to the portable backend instead.

use ring::aead;
use zeroize::Zeroize;

use crate::backend::AeadBackend;
use crate::error::CryptoError;
use crate::params::{AesEncryptionParams, Algorithm};
use crate::secret::SecretBuffer;

/// IV length accepted by `ring` (96 bits).
const NONCE_LEN: usize = aead::NONCE_LEN;

/// Only tag size `ring` produces, in bits.
const TAG_BITS: u32 = 128;

/// The host-native AEAD engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeAead;

impl NativeAead {
    fn key(key: &[u8], params: &AesEncryptionParams) -> Result<aead::LessSafeKey, CryptoError> {
        if params.algorithm != Algorithm::AesGcm {
            return Err(CryptoError::NotSupported(format!(
                "native engine has no `{}`",
                params.algorithm
            )));
        }
        if params.tag_size != TAG_BITS {
            return Err(CryptoError::NotSupported(format!(
                "native AES-GCM only produces {TAG_BITS}-bit tags, got {}",
                params.tag_size
            )));
        }
        if params.iv.len() != NONCE_LEN {
            return Err(CryptoError::NotSupported(format!(
                "native AES-GCM only takes {NONCE_LEN}-byte IVs, got {}",
                params.iv.len()
            )));
        }

        let algorithm = match key.len() {
            16 => &aead::AES_128_GCM,
            32 => &aead::AES_256_GCM,
            n => {
                return Err(CryptoError::NotSupported(format!(
                    "native AES-GCM has no {}-bit keys",
                    n.saturating_mul(8)
                )))
            }
        };
        let unbound = aead::UnboundKey::new(algorithm, key)
            .map_err(|_| CryptoError::InvalidKey("AES-GCM key rejected by engine".into()))?;
        Ok(aead::LessSafeKey::new(unbound))
    }

    fn nonce(iv: &[u8]) -> Result<aead::Nonce, CryptoError> {
        aead::Nonce::try_assume_unique_for_key(iv)
            .map_err(|_| CryptoError::InvalidParameters("AES-GCM IV has the wrong length".into()))
    }
}

impl AeadBackend for NativeAead {
    fn name(&self) -> &'static str {
        "native"
    }

    fn supports(&self, algorithm: &Algorithm) -> bool {
        matches!(algorithm, Algorithm::AesGcm)
    }

    fn seal(
        &self,
        key: &[u8],
        plaintext: &[u8],
        params: &AesEncryptionParams,
    ) -> Result<Vec<u8>, CryptoError> {
        let key = Self::key(key, params)?;
        let nonce = Self::nonce(&params.iv)?;

        let mut in_out = Vec::with_capacity(plaintext.len().saturating_add(aead::MAX_TAG_LEN));
        in_out.extend_from_slice(plaintext);
        if key
            .seal_in_place_append_tag(nonce, aead::Aad::from(&params.additional_data), &mut in_out)
            .is_err()
        {
            in_out.zeroize();
            return Err(CryptoError::EncryptionFailed(
                "AES-GCM encryption failed".into(),
            ));
        }
        Ok(in_out)
    }

    fn open(
        &self,
        key: &[u8],
        ciphertext: &[u8],
        params: &AesEncryptionParams,
    ) -> Result<SecretBuffer, CryptoError> {
        let key = Self::key(key, params)?;
        let nonce = Self::nonce(&params.iv)?;

        let mut in_out = ciphertext.to_vec();
        let opened = key
            .open_in_place(nonce, aead::Aad::from(&params.additional_data), &mut in_out)
            .map(|plaintext| SecretBuffer::new(plaintext));
        in_out.zeroize();
        opened.map_err(|_| CryptoError::DecryptionFailed)
    }
}
