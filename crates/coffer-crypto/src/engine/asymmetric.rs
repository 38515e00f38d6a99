//! RSA key pairs, OAEP and PSS on the `rsa` crate.
//!
//! Keys travel as DER: PKCS#8 `PrivateKeyInfo` for private keys and X.509
//! `SubjectPublicKeyInfo` for public keys, the encodings every other client
//! of the vault format already reads. Only SHA-2 digests are accepted.

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Oaep, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::CryptoError;
use crate::params::{HashAlgorithm, RsaEncryptionParams, RsaKeyParams, RsaSigningParams};
use crate::provider::RsaKeyPair;
use crate::secret::SecretBuffer;

const MIN_MODULUS_BITS: u32 = 2048;
const MAX_MODULUS_BITS: u32 = 4096;

fn sha1_not_supported(operation: &str) -> CryptoError {
    CryptoError::NotSupported(format!("{operation} with SHA-1"))
}

/// Validate and decode a big-endian public exponent of at most 32 bits.
fn public_exponent(bytes: &[u8]) -> Result<BigUint, CryptoError> {
    if bytes.is_empty() || bytes.len() > 4 {
        return Err(CryptoError::InvalidParameters(format!(
            "RSA public exponent must be 1 to 4 bytes, got {}",
            bytes.len()
        )));
    }
    let mut padded = [0u8; 4];
    padded[4_usize.saturating_sub(bytes.len())..].copy_from_slice(bytes);
    let exponent = u32::from_be_bytes(padded);
    if exponent < 3 || exponent % 2 == 0 {
        return Err(CryptoError::InvalidParameters(format!(
            "RSA public exponent must be odd and at least 3, got {exponent}"
        )));
    }
    Ok(BigUint::from(exponent))
}

pub(super) fn generate(params: &RsaKeyParams) -> Result<RsaKeyPair, CryptoError> {
    if params.hash == HashAlgorithm::Sha1 {
        return Err(sha1_not_supported("RSA"));
    }
    let bits = params.modulus_length;
    if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits) || bits % 8 != 0 {
        return Err(CryptoError::InvalidParameters(format!(
            "RSA modulus must be a multiple of 8 between {MIN_MODULUS_BITS} and \
             {MAX_MODULUS_BITS} bits, got {bits}"
        )));
    }
    let exponent = public_exponent(&params.public_exponent)?;
    let bits = usize::try_from(bits)
        .map_err(|_| CryptoError::InvalidParameters("RSA modulus too large".into()))?;

    let private = RsaPrivateKey::new_with_exp(&mut OsRng, bits, &exponent)
        .map_err(|e| CryptoError::Backend(format!("RSA key generation failed: {e}")))?;
    let private_der = private
        .to_pkcs8_der()
        .map_err(|e| CryptoError::Backend(format!("PKCS#8 encoding failed: {e}")))?;
    let public_der = private
        .to_public_key()
        .to_public_key_der()
        .map_err(|e| CryptoError::Backend(format!("SPKI encoding failed: {e}")))?;

    Ok(RsaKeyPair {
        private_key: SecretBuffer::new(private_der.as_bytes()),
        public_key: public_der.as_bytes().to_vec(),
    })
}

fn private_key(der: &[u8]) -> Result<RsaPrivateKey, CryptoError> {
    RsaPrivateKey::from_pkcs8_der(der)
        .map_err(|e| CryptoError::InvalidKey(format!("RSA private key is not PKCS#8 DER: {e}")))
}

fn public_key(der: &[u8]) -> Result<RsaPublicKey, CryptoError> {
    RsaPublicKey::from_public_key_der(der)
        .map_err(|e| CryptoError::InvalidKey(format!("RSA public key is not SPKI DER: {e}")))
}

fn oaep(hash: HashAlgorithm) -> Result<Oaep, CryptoError> {
    match hash {
        HashAlgorithm::Sha1 => Err(sha1_not_supported("RSA-OAEP")),
        HashAlgorithm::Sha256 => Ok(Oaep::new::<Sha256>()),
        HashAlgorithm::Sha384 => Ok(Oaep::new::<Sha384>()),
        HashAlgorithm::Sha512 => Ok(Oaep::new::<Sha512>()),
    }
}

pub(super) fn encrypt(
    public_der: &[u8],
    plaintext: &[u8],
    params: &RsaEncryptionParams,
) -> Result<Vec<u8>, CryptoError> {
    let padding = oaep(params.hash)?;
    let key = public_key(public_der)?;
    key.encrypt(&mut OsRng, padding, plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(format!("RSA-OAEP: {e}")))
}

pub(super) fn decrypt(
    private_der: &[u8],
    ciphertext: &[u8],
    params: &RsaEncryptionParams,
) -> Result<SecretBuffer, CryptoError> {
    let padding = oaep(params.hash)?;
    let key = private_key(private_der)?;
    key.decrypt_blinded(&mut OsRng, padding, ciphertext)
        .map(SecretBuffer::from_vec)
        .map_err(|_| CryptoError::DecryptionFailed)
}

/// PSS scheme plus the message digest it signs over.
fn pss(params: &RsaSigningParams, data: &[u8]) -> Result<(Pss, Vec<u8>), CryptoError> {
    let salt_len = usize::try_from(params.salt_length)
        .map_err(|_| CryptoError::InvalidParameters("PSS salt length too large".into()))?;
    match params.hash {
        HashAlgorithm::Sha1 => Err(sha1_not_supported("RSA-PSS")),
        HashAlgorithm::Sha256 => Ok((
            Pss::new_with_salt::<Sha256>(salt_len),
            Sha256::digest(data).to_vec(),
        )),
        HashAlgorithm::Sha384 => Ok((
            Pss::new_with_salt::<Sha384>(salt_len),
            Sha384::digest(data).to_vec(),
        )),
        HashAlgorithm::Sha512 => Ok((
            Pss::new_with_salt::<Sha512>(salt_len),
            Sha512::digest(data).to_vec(),
        )),
    }
}

/// PSS needs `modulus >= hash + salt + 2` bytes.
fn check_salt_fits(params: &RsaSigningParams, modulus_bytes: usize) -> Result<(), CryptoError> {
    let room = modulus_bytes
        .checked_sub(params.hash.output_len())
        .and_then(|n| n.checked_sub(2))
        .unwrap_or(0);
    let fits = usize::try_from(params.salt_length).is_ok_and(|salt| salt <= room);
    if fits {
        Ok(())
    } else {
        Err(CryptoError::InvalidParameters(format!(
            "PSS salt of {} bytes does not fit a {modulus_bytes}-byte modulus with {}",
            params.salt_length, params.hash
        )))
    }
}

pub(super) fn sign(
    private_der: &[u8],
    data: &[u8],
    params: &RsaSigningParams,
) -> Result<Vec<u8>, CryptoError> {
    let (scheme, hashed) = pss(params, data)?;
    let key = private_key(private_der)?;
    check_salt_fits(params, key.size())?;
    key.sign_with_rng(&mut OsRng, scheme, &hashed)
        .map_err(|e| CryptoError::Backend(format!("RSA-PSS signing failed: {e}")))
}

/// `Ok(false)` for any signature that does not verify under a parseable key.
pub(super) fn verify(
    public_der: &[u8],
    signature: &[u8],
    data: &[u8],
    params: &RsaSigningParams,
) -> Result<bool, CryptoError> {
    let (scheme, hashed) = pss(params, data)?;
    let key = public_key(public_der)?;
    check_salt_fits(params, key.size())?;
    Ok(key.verify(scheme, &hashed, signature).is_ok())
}
