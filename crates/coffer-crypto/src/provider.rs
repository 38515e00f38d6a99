//! The `CryptoProvider` contract.
//!
//! This trait is the whole surface the rest of the application sees: key
//! management, vault encryption and authentication all call into it and
//! never pick an engine themselves. Every operation is a single-shot
//! function of its arguments; implementations hold no mutable state and
//! must be callable concurrently.

use std::fmt;

use crate::error::CryptoError;
use crate::params::{
    EncryptionParams, HashAlgorithm, HashParams, HmacKeyParams, HmacParams, KeyParams,
    Pbkdf2Params, SigningParams,
};
use crate::secret::SecretBuffer;

/// An RSA key pair in interoperable DER encodings.
///
/// Private key bytes never appear in `Debug` output.
pub struct RsaKeyPair {
    /// PKCS#8 `PrivateKeyInfo`.
    pub private_key: SecretBuffer,
    /// X.509 `SubjectPublicKeyInfo`.
    pub public_key: Vec<u8>,
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("private_key", &self.private_key)
            .field("public_key_len", &self.public_key.len())
            .finish()
    }
}

/// Result of [`CryptoProvider::generate_key`].
#[derive(Debug)]
pub enum GeneratedKey {
    /// AES or HMAC key.
    Symmetric(SecretBuffer),
    /// RSA key pair.
    KeyPair(RsaKeyPair),
}

impl GeneratedKey {
    /// Unwrap a symmetric key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameters`] for a key pair.
    pub fn into_symmetric(self) -> Result<SecretBuffer, CryptoError> {
        match self {
            Self::Symmetric(key) => Ok(key),
            Self::KeyPair(_) => Err(CryptoError::InvalidParameters(
                "expected a symmetric key, got a key pair".into(),
            )),
        }
    }

    /// Unwrap a key pair.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameters`] for a symmetric key.
    pub fn into_key_pair(self) -> Result<RsaKeyPair, CryptoError> {
        match self {
            Self::KeyPair(pair) => Ok(pair),
            Self::Symmetric(_) => Err(CryptoError::InvalidParameters(
                "expected a key pair, got a symmetric key".into(),
            )),
        }
    }
}

/// Every cryptographic operation the application performs.
pub trait CryptoProvider: Send + Sync {
    /// `len` bytes from a cryptographically secure source.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Entropy`] if the source fails; weak randomness is never
    /// substituted.
    fn random_bytes(&self, len: usize) -> Result<Vec<u8>, CryptoError>;

    /// One-way digest of `input`.
    ///
    /// # Errors
    ///
    /// [`CryptoError::NotSupported`] if the engine lacks the digest.
    fn hash(&self, input: &[u8], params: &HashParams) -> Result<Vec<u8>, CryptoError>;

    /// Generate a symmetric key, HMAC key, or RSA key pair.
    ///
    /// # Errors
    ///
    /// [`CryptoError::NotSupported`] for an unknown tag or a tag that does not
    /// belong to the record kind; no key material is produced in that case.
    fn generate_key(&self, params: &KeyParams) -> Result<GeneratedKey, CryptoError>;

    /// Derive a symmetric key from a password with PBKDF2.
    ///
    /// Deterministic in (password, salt, iterations, hash, key size).
    ///
    /// # Errors
    ///
    /// [`CryptoError::NotSupported`] for a tag other than `PBKDF2`,
    /// [`CryptoError::InvalidParameters`] for zero iterations, an empty salt or
    /// a bad output size.
    fn derive_key(&self, password: &[u8], params: &Pbkdf2Params)
        -> Result<SecretBuffer, CryptoError>;

    /// Encrypt with an AEAD mode (symmetric key) or RSA-OAEP (SPKI public key).
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidParameters`] for any other tag,
    /// [`CryptoError::EncryptionFailed`] for engine failures.
    fn encrypt(
        &self,
        key: &[u8],
        plaintext: &[u8],
        params: &EncryptionParams,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Inverse of [`encrypt`](CryptoProvider::encrypt) given identical
    /// parameters and the matching key (PKCS#8 private key for RSA-OAEP).
    ///
    /// # Errors
    ///
    /// [`CryptoError::DecryptionFailed`] if authentication or the engine fails.
    fn decrypt(
        &self,
        key: &[u8],
        ciphertext: &[u8],
        params: &EncryptionParams,
    ) -> Result<SecretBuffer, CryptoError>;

    /// HMAC tag or RSA-PSS signature (PKCS#8 private key).
    ///
    /// # Errors
    ///
    /// [`CryptoError::NotSupported`] for any tag other than `HMAC`/`RSA-PSS`.
    fn sign(&self, key: &[u8], data: &[u8], params: &SigningParams)
        -> Result<Vec<u8>, CryptoError>;

    /// Check an HMAC tag or RSA-PSS signature (SPKI public key).
    ///
    /// A well-formed mismatch returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Only for structurally invalid input: unparseable keys or parameters.
    fn verify(
        &self,
        key: &[u8],
        signature: &[u8],
        data: &[u8],
        params: &SigningParams,
    ) -> Result<bool, CryptoError>;

    /// SHA-256 of an encoded public key, for out-of-band identity checks.
    ///
    /// # Errors
    ///
    /// Propagates [`hash`](CryptoProvider::hash) errors.
    fn fingerprint(&self, public_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.hash(public_key, &HashParams::new(HashAlgorithm::Sha256))
    }

    /// Compare two byte strings in time independent of their content.
    ///
    /// Both inputs are MACed under a fresh random key and the fixed-size MACs
    /// are compared with [`constant_time_eq`](crate::compare::constant_time_eq).
    /// Unequal lengths yield unequal MACs, so no branch depends on where or
    /// whether the inputs differ.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Entropy`] if the comparison key cannot be generated.
    fn timing_safe_equal(&self, a: &[u8], b: &[u8]) -> Result<bool, CryptoError> {
        let key = self
            .generate_key(&KeyParams::Hmac(HmacKeyParams::default()))?
            .into_symmetric()?;
        let params = SigningParams::Hmac(HmacParams::default());
        let mac_a = self.sign(key.expose(), a, &params)?;
        let mac_b = self.sign(key.expose(), b, &params)?;
        let same_len = a.len() == b.len();
        Ok(crate::compare::constant_time_eq(&mac_a, &mac_b) & same_len)
    }
}
