//! Error taxonomy for `coffer-crypto`.
//!
//! Every failure maps to exactly one [`ErrorKind`] so callers can tell
//! "the data was tampered with" ([`CryptoError::DecryptionFailed`]) apart
//! from "the environment is broken" ([`CryptoError::Entropy`],
//! [`CryptoError::Backend`]). Messages carry algorithm names and sizes only,
//! never key material or plaintext.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by provider operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// No native or portable implementation exists for the requested
    /// algorithm/parameter combination.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// The parameter record is structurally inconsistent for the operation
    /// (unknown encryption algorithm tag, zero iterations, bad tag size).
    #[error("invalid encryption parameters: {0}")]
    InvalidParameters(String),

    /// Key bytes do not parse, or do not match the size the parameters declare.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// The forward transform failed inside the engine.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// The inverse transform failed or the authentication tag did not verify.
    ///
    /// The plaintext cannot be trusted or recovered; retrying with adjusted
    /// parameters is never correct.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The operating system CSPRNG could not produce bytes.
    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    /// Any other engine or runtime fault (key generation, worker panic).
    #[error("crypto backend failure: {0}")]
    Backend(String),
}

/// Stable, serializable classification of a [`CryptoError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`CryptoError::NotSupported`].
    NotSupported,
    /// See [`CryptoError::InvalidParameters`].
    #[serde(rename = "invalid_encryption_params")]
    InvalidParameters,
    /// See [`CryptoError::InvalidKey`].
    InvalidKey,
    /// See [`CryptoError::EncryptionFailed`].
    EncryptionFailed,
    /// See [`CryptoError::DecryptionFailed`].
    DecryptionFailed,
    /// See [`CryptoError::Entropy`].
    #[serde(rename = "entropy_unavailable")]
    Entropy,
    /// See [`CryptoError::Backend`].
    #[serde(rename = "backend_failure")]
    Backend,
}

impl ErrorKind {
    /// Wire code for this kind, identical to its serde representation.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotSupported => "not_supported",
            Self::InvalidParameters => "invalid_encryption_params",
            Self::InvalidKey => "invalid_key",
            Self::EncryptionFailed => "encryption_failed",
            Self::DecryptionFailed => "decryption_failed",
            Self::Entropy => "entropy_unavailable",
            Self::Backend => "backend_failure",
        }
    }
}

impl CryptoError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotSupported(_) => ErrorKind::NotSupported,
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::InvalidKey(_) => ErrorKind::InvalidKey,
            Self::EncryptionFailed(_) => ErrorKind::EncryptionFailed,
            Self::DecryptionFailed => ErrorKind::DecryptionFailed,
            Self::Entropy(_) => ErrorKind::Entropy,
            Self::Backend(_) => ErrorKind::Backend,
        }
    }
}
