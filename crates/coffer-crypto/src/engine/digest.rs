//! Digests, HMAC and PBKDF2 on `ring`.

use std::num::NonZeroU32;

use ring::{digest, hmac, pbkdf2};

use crate::error::CryptoError;
use crate::params::{bits_to_bytes, check_key_len, HashAlgorithm, HmacParams, Pbkdf2Params};
use crate::secret::SecretBuffer;

fn digest_algorithm(hash: HashAlgorithm) -> &'static digest::Algorithm {
    match hash {
        HashAlgorithm::Sha1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
        HashAlgorithm::Sha256 => &digest::SHA256,
        HashAlgorithm::Sha384 => &digest::SHA384,
        HashAlgorithm::Sha512 => &digest::SHA512,
    }
}

fn hmac_algorithm(hash: HashAlgorithm) -> hmac::Algorithm {
    match hash {
        HashAlgorithm::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
        HashAlgorithm::Sha256 => hmac::HMAC_SHA256,
        HashAlgorithm::Sha384 => hmac::HMAC_SHA384,
        HashAlgorithm::Sha512 => hmac::HMAC_SHA512,
    }
}

fn pbkdf2_algorithm(hash: HashAlgorithm) -> pbkdf2::Algorithm {
    match hash {
        HashAlgorithm::Sha1 => pbkdf2::PBKDF2_HMAC_SHA1,
        HashAlgorithm::Sha256 => pbkdf2::PBKDF2_HMAC_SHA256,
        HashAlgorithm::Sha384 => pbkdf2::PBKDF2_HMAC_SHA384,
        HashAlgorithm::Sha512 => pbkdf2::PBKDF2_HMAC_SHA512,
    }
}

pub(super) fn hash(input: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    digest::digest(digest_algorithm(algorithm), input)
        .as_ref()
        .to_vec()
}

/// HMAC tag. The key must be exactly `key_size` bits.
pub(super) fn hmac_sign(key: &[u8], data: &[u8], params: &HmacParams) -> Result<Vec<u8>, CryptoError> {
    check_key_len(key, params.key_size)?;
    let key = hmac::Key::new(hmac_algorithm(params.hash), key);
    Ok(hmac::sign(&key, data).as_ref().to_vec())
}

/// PBKDF2-HMAC. Iterations have no upper bound besides `u32`.
pub(super) fn pbkdf2_derive(
    password: &[u8],
    params: &Pbkdf2Params,
) -> Result<SecretBuffer, CryptoError> {
    let iterations = NonZeroU32::new(params.iterations).ok_or_else(|| {
        CryptoError::InvalidParameters("PBKDF2 iteration count must be non-zero".into())
    })?;
    if params.salt.is_empty() {
        return Err(CryptoError::InvalidParameters(
            "PBKDF2 salt must not be empty".into(),
        ));
    }
    let len = bits_to_bytes(params.key_size, "derived key size")?;

    let mut out = vec![0u8; len];
    pbkdf2::derive(
        pbkdf2_algorithm(params.hash),
        iterations,
        &params.salt,
        password,
        &mut out,
    );
    Ok(SecretBuffer::from_vec(out))
}
