//! Async facade over a [`CryptoProvider`].
//!
//! Every provider call is CPU-bound and some are slow (PBKDF2 with a high
//! iteration count, RSA key generation), so async callers run them on
//! tokio's blocking pool instead of stalling a runtime worker. Arguments are
//! taken by value because they move into the worker thread.

use std::sync::Arc;

use tracing::error;

use crate::error::CryptoError;
use crate::params::{EncryptionParams, HashParams, KeyParams, Pbkdf2Params, SigningParams};
use crate::provider::{CryptoProvider, GeneratedKey};
use crate::secret::SecretBuffer;

/// Cloneable async handle to a shared provider.
#[derive(Debug)]
pub struct AsyncProvider<P> {
    inner: Arc<P>,
}

impl<P> Clone for AsyncProvider<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: CryptoProvider + 'static> AsyncProvider<P> {
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// The wrapped provider, for synchronous calls.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.inner
    }

    async fn run<T, F>(&self, operation: &'static str, f: F) -> Result<T, CryptoError>
    where
        T: Send + 'static,
        F: FnOnce(&P) -> Result<T, CryptoError> + Send + 'static,
    {
        let provider = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&*provider))
            .await
            .map_err(|e| {
                error!(operation, "crypto worker did not complete: {e}");
                CryptoError::Backend(format!("{operation} worker did not complete: {e}"))
            })?
    }

    /// See [`CryptoProvider::random_bytes`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn random_bytes(&self, len: usize) -> Result<Vec<u8>, CryptoError> {
        self.run("random_bytes", move |p| p.random_bytes(len)).await
    }

    /// See [`CryptoProvider::hash`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn hash(&self, input: Vec<u8>, params: HashParams) -> Result<Vec<u8>, CryptoError> {
        self.run("hash", move |p| p.hash(&input, &params)).await
    }

    /// See [`CryptoProvider::generate_key`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn generate_key(&self, params: KeyParams) -> Result<GeneratedKey, CryptoError> {
        self.run("generate_key", move |p| p.generate_key(&params)).await
    }

    /// See [`CryptoProvider::derive_key`]. The password buffer is erased
    /// once the derivation finishes.
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn derive_key(
        &self,
        password: SecretBuffer,
        params: Pbkdf2Params,
    ) -> Result<SecretBuffer, CryptoError> {
        self.run("derive_key", move |p| p.derive_key(password.expose(), &params))
            .await
    }

    /// See [`CryptoProvider::encrypt`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn encrypt(
        &self,
        key: SecretBuffer,
        plaintext: SecretBuffer,
        params: EncryptionParams,
    ) -> Result<Vec<u8>, CryptoError> {
        self.run("encrypt", move |p| {
            p.encrypt(key.expose(), plaintext.expose(), &params)
        })
        .await
    }

    /// See [`CryptoProvider::decrypt`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn decrypt(
        &self,
        key: SecretBuffer,
        ciphertext: Vec<u8>,
        params: EncryptionParams,
    ) -> Result<SecretBuffer, CryptoError> {
        self.run("decrypt", move |p| p.decrypt(key.expose(), &ciphertext, &params))
            .await
    }

    /// See [`CryptoProvider::sign`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn sign(
        &self,
        key: SecretBuffer,
        data: Vec<u8>,
        params: SigningParams,
    ) -> Result<Vec<u8>, CryptoError> {
        self.run("sign", move |p| p.sign(key.expose(), &data, &params))
            .await
    }

    /// See [`CryptoProvider::verify`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn verify(
        &self,
        key: Vec<u8>,
        signature: Vec<u8>,
        data: Vec<u8>,
        params: SigningParams,
    ) -> Result<bool, CryptoError> {
        self.run("verify", move |p| p.verify(&key, &signature, &data, &params))
            .await
    }

    /// See [`CryptoProvider::fingerprint`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn fingerprint(&self, public_key: Vec<u8>) -> Result<Vec<u8>, CryptoError> {
        self.run("fingerprint", move |p| p.fingerprint(&public_key))
            .await
    }

    /// See [`CryptoProvider::timing_safe_equal`].
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CryptoError::Backend`] if the worker panicked.
    pub async fn timing_safe_equal(&self, a: Vec<u8>, b: Vec<u8>) -> Result<bool, CryptoError> {
        self.run("timing_safe_equal", move |p| p.timing_safe_equal(&a, &b))
            .await
    }
}

impl<P: CryptoProvider + 'static> From<P> for AsyncProvider<P> {
    fn from(provider: P) -> Self {
        Self::new(provider)
    }
}
