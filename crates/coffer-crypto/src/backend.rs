//! Strategy seam between the primary provider and the engines that run
//! authenticated encryption.
//!
//! The primary provider owns one [`AeadBackend`] per engine and picks one by
//! algorithm tag, using the routing table in
//! [`ProviderConfig`](crate::config::ProviderConfig). Both implementations
//! take the exact same key, data and parameters, so the caller cannot tell
//! which one ran.

use std::fmt;

use crate::error::CryptoError;
use crate::params::{AesEncryptionParams, Algorithm};
use crate::secret::SecretBuffer;

/// An engine able to run one or more AEAD modes.
///
/// Implementations receive parameters whose key length already matches
/// `key_size` and whose tag is one the backend reported in [`supports`].
/// Output is `ciphertext || tag`.
///
/// [`supports`]: AeadBackend::supports
pub trait AeadBackend: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this backend implements the AEAD mode at all.
    fn supports(&self, algorithm: &Algorithm) -> bool;

    /// Encrypt and authenticate.
    ///
    /// # Errors
    ///
    /// [`CryptoError::NotSupported`] for shapes the engine cannot run,
    /// [`CryptoError::InvalidParameters`] for inconsistent parameters,
    /// [`CryptoError::EncryptionFailed`] for engine failures.
    fn seal(
        &self,
        key: &[u8],
        plaintext: &[u8],
        params: &AesEncryptionParams,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Verify and decrypt.
    ///
    /// # Errors
    ///
    /// [`CryptoError::DecryptionFailed`] if the tag does not verify or the
    /// engine fails; the parameter errors of [`seal`](AeadBackend::seal).
    fn open(
        &self,
        key: &[u8],
        ciphertext: &[u8],
        params: &AesEncryptionParams,
    ) -> Result<SecretBuffer, CryptoError>;
}
