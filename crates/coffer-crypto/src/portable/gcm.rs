//! AES-GCM on the RustCrypto `aes-gcm` crate.
//!
//! Takes the shapes `ring` refuses: 192-bit keys and 128-bit IVs.

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::consts::{U12, U16};
use aes_gcm::aead::{Aead, KeyInit, Nonce, Payload};
use aes_gcm::AesGcm;

use crate::error::CryptoError;
use crate::params::AesEncryptionParams;
use crate::secret::SecretBuffer;

const TAG_BITS: u32 = 128;

fn check_tag(params: &AesEncryptionParams) -> Result<(), CryptoError> {
    if params.tag_size == TAG_BITS {
        Ok(())
    } else {
        Err(CryptoError::NotSupported(format!(
            "portable AES-GCM only produces {TAG_BITS}-bit tags, got {}",
            params.tag_size
        )))
    }
}

fn unsupported_shape(key_len: usize, iv_len: usize) -> CryptoError {
    CryptoError::NotSupported(format!(
        "portable AES-GCM with a {}-bit key and a {}-bit IV",
        key_len.saturating_mul(8),
        iv_len.saturating_mul(8)
    ))
}

fn cipher<C: KeyInit>(key: &[u8]) -> Result<C, CryptoError> {
    C::new_from_slice(key).map_err(|_| CryptoError::InvalidKey("AES-GCM key rejected".into()))
}

fn seal_with<C: Aead + KeyInit>(
    key: &[u8],
    iv: &[u8],
    payload: Payload<'_, '_>,
) -> Result<Vec<u8>, CryptoError> {
    cipher::<C>(key)?
        .encrypt(Nonce::<C>::from_slice(iv), payload)
        .map_err(|_| CryptoError::EncryptionFailed("AES-GCM encryption failed".into()))
}

fn open_with<C: Aead + KeyInit>(
    key: &[u8],
    iv: &[u8],
    payload: Payload<'_, '_>,
) -> Result<SecretBuffer, CryptoError> {
    cipher::<C>(key)?
        .decrypt(Nonce::<C>::from_slice(iv), payload)
        .map(SecretBuffer::from_vec)
        .map_err(|_| CryptoError::DecryptionFailed)
}

pub(super) fn seal(
    key: &[u8],
    plaintext: &[u8],
    params: &AesEncryptionParams,
) -> Result<Vec<u8>, CryptoError> {
    check_tag(params)?;
    let iv = params.iv.as_slice();
    let payload = Payload {
        msg: plaintext,
        aad: &params.additional_data,
    };
    match (key.len(), iv.len()) {
        (16, 12) => seal_with::<AesGcm<Aes128, U12>>(key, iv, payload),
        (16, 16) => seal_with::<AesGcm<Aes128, U16>>(key, iv, payload),
        (24, 12) => seal_with::<AesGcm<Aes192, U12>>(key, iv, payload),
        (24, 16) => seal_with::<AesGcm<Aes192, U16>>(key, iv, payload),
        (32, 12) => seal_with::<AesGcm<Aes256, U12>>(key, iv, payload),
        (32, 16) => seal_with::<AesGcm<Aes256, U16>>(key, iv, payload),
        (key_len, iv_len) => Err(unsupported_shape(key_len, iv_len)),
    }
}

pub(super) fn open(
    key: &[u8],
    ciphertext: &[u8],
    params: &AesEncryptionParams,
) -> Result<SecretBuffer, CryptoError> {
    check_tag(params)?;
    let iv = params.iv.as_slice();
    let payload = Payload {
        msg: ciphertext,
        aad: &params.additional_data,
    };
    match (key.len(), iv.len()) {
        (16, 12) => open_with::<AesGcm<Aes128, U12>>(key, iv, payload),
        (16, 16) => open_with::<AesGcm<Aes128, U16>>(key, iv, payload),
        (24, 12) => open_with::<AesGcm<Aes192, U12>>(key, iv, payload),
        (24, 16) => open_with::<AesGcm<Aes192, U16>>(key, iv, payload),
        (32, 12) => open_with::<AesGcm<Aes256, U12>>(key, iv, payload),
        (32, 16) => open_with::<AesGcm<Aes256, U16>>(key, iv, payload),
        (key_len, iv_len) => Err(unsupported_shape(key_len, iv_len)),
    }
}
