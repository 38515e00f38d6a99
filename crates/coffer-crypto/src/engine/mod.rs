//! The primary provider.
//!
//! [`RingCryptoProvider`] runs digests, HMAC, PBKDF2 and AES-GCM on `ring`
//! and RSA on the `rsa` crate. AEAD modes are dispatched through the
//! routing table in [`ProviderConfig`]; by default AES-CCM goes to the
//! portable backend because no native engine offers it.

mod aead;
mod asymmetric;
mod digest;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, warn};

pub use self::aead::NativeAead;

use crate::backend::AeadBackend;
use crate::config::{ProviderConfig, Route};
use crate::error::CryptoError;
use crate::params::{
    bits_to_bytes, check_key_len, AesEncryptionParams, AesKeyParams, Algorithm,
    EncryptionParams, HashParams, HmacKeyParams, HmacParams, KeyParams, Pbkdf2Params,
    RsaEncryptionParams, RsaKeyParams, RsaSigningParams, SigningParams,
};
use crate::portable::PortableAead;
use crate::provider::{CryptoProvider, GeneratedKey};
use crate::secret::SecretBuffer;

/// AES key sizes in bits.
const AES_KEY_BITS: [u32; 3] = [128, 192, 256];

/// Tag lengths any AEAD mode may use, in bytes.
const MIN_TAG_LEN: usize = 4;
const MAX_TAG_LEN: usize = 16;

/// Provider backed by `ring`, `rsa` and the portable AEAD fallback.
#[derive(Clone, Debug)]
pub struct RingCryptoProvider {
    config: ProviderConfig,
    native: NativeAead,
    portable: PortableAead,
}

impl RingCryptoProvider {
    /// Provider with the default routing table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ProviderConfig::default(),
            native: NativeAead,
            portable: PortableAead,
        }
    }

    /// Provider with an explicit routing table.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::NotSupported`] if a mode is routed to a backend
    /// that does not implement it (for example AES-CCM to the native engine).
    pub fn with_config(config: ProviderConfig) -> Result<Self, CryptoError> {
        let provider = Self {
            config,
            ..Self::new()
        };
        for (algorithm, route) in provider.config.routed_algorithms() {
            let backend = provider.backend(route);
            if !backend.supports(&algorithm) {
                return Err(CryptoError::NotSupported(format!(
                    "`{algorithm}` cannot be routed to the {} backend",
                    backend.name()
                )));
            }
            debug!(%algorithm, backend = backend.name(), "AEAD route configured");
        }
        if provider.config.aes_gcm == Route::Portable {
            warn!("AES-GCM routed to the portable backend, native acceleration unused");
        }
        Ok(provider)
    }

    /// Active routing table.
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn backend(&self, route: Route) -> &dyn AeadBackend {
        match route {
            Route::Native => &self.native,
            Route::Portable => &self.portable,
        }
    }

    fn aead_backend(&self, params: &AesEncryptionParams) -> Result<&dyn AeadBackend, CryptoError> {
        let route = self.config.route_for(&params.algorithm).ok_or_else(|| {
            CryptoError::InvalidParameters(format!(
                "`{}` is not an AEAD mode",
                params.algorithm
            ))
        })?;
        let backend = self.backend(route);
        debug!(
            algorithm = %params.algorithm,
            backend = backend.name(),
            "dispatching AEAD operation"
        );
        Ok(backend)
    }
}

impl Default for RingCryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks shared by every AEAD backend, run before routing.
fn check_aead_shape(key: &[u8], params: &AesEncryptionParams) -> Result<(), CryptoError> {
    if !AES_KEY_BITS.contains(&params.key_size) {
        return Err(CryptoError::InvalidParameters(format!(
            "AES key size must be 128, 192 or 256 bits, got {}",
            params.key_size
        )));
    }
    check_key_len(key, params.key_size)?;
    let tag_len = bits_to_bytes(params.tag_size, "tag size")?;
    if !(MIN_TAG_LEN..=MAX_TAG_LEN).contains(&tag_len) {
        return Err(CryptoError::InvalidParameters(format!(
            "tag size must be between 32 and 128 bits, got {}",
            params.tag_size
        )));
    }
    if params.iv.is_empty() {
        return Err(CryptoError::InvalidParameters("IV must not be empty".into()));
    }
    Ok(())
}

fn not_an_encryption_algorithm(algorithm: &Algorithm) -> CryptoError {
    CryptoError::InvalidParameters(format!("`{algorithm}` is not an encryption algorithm"))
}

fn not_a_signing_algorithm(algorithm: &Algorithm) -> CryptoError {
    CryptoError::NotSupported(format!("signing with `{algorithm}`"))
}

impl CryptoProvider for RingCryptoProvider {
    fn random_bytes(&self, len: usize) -> Result<Vec<u8>, CryptoError> {
        let mut bytes = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::Entropy(format!("OS CSPRNG failed: {e}")))?;
        Ok(bytes)
    }

    fn hash(&self, input: &[u8], params: &HashParams) -> Result<Vec<u8>, CryptoError> {
        Ok(digest::hash(input, params.algorithm))
    }

    fn generate_key(&self, params: &KeyParams) -> Result<GeneratedKey, CryptoError> {
        match params {
            KeyParams::Aes(AesKeyParams {
                algorithm: Algorithm::Aes,
                key_size,
            }) => {
                if !AES_KEY_BITS.contains(key_size) {
                    return Err(CryptoError::InvalidParameters(format!(
                        "AES key size must be 128, 192 or 256 bits, got {key_size}"
                    )));
                }
                let len = bits_to_bytes(*key_size, "key size")?;
                SecretBuffer::random(len).map(GeneratedKey::Symmetric)
            }
            KeyParams::Hmac(HmacKeyParams {
                algorithm: Algorithm::Hmac,
                key_size,
            }) => {
                let len = bits_to_bytes(*key_size, "key size")?;
                SecretBuffer::random(len).map(GeneratedKey::Symmetric)
            }
            KeyParams::Rsa(
                rsa_params @ RsaKeyParams {
                    algorithm: Algorithm::Rsa,
                    ..
                },
            ) => {
                debug!(
                    modulus_length = rsa_params.modulus_length,
                    "generating RSA key pair"
                );
                asymmetric::generate(rsa_params).map(GeneratedKey::KeyPair)
            }
            other => Err(CryptoError::NotSupported(format!(
                "key generation for `{}`",
                other.algorithm()
            ))),
        }
    }

    fn derive_key(
        &self,
        password: &[u8],
        params: &Pbkdf2Params,
    ) -> Result<SecretBuffer, CryptoError> {
        match &params.algorithm {
            Algorithm::Pbkdf2 => {
                debug!(
                    hash = %params.hash,
                    iterations = params.iterations,
                    key_size = params.key_size,
                    "deriving key"
                );
                digest::pbkdf2_derive(password, params)
            }
            other => Err(CryptoError::NotSupported(format!(
                "key derivation with `{other}`"
            ))),
        }
    }

    fn encrypt(
        &self,
        key: &[u8],
        plaintext: &[u8],
        params: &EncryptionParams,
    ) -> Result<Vec<u8>, CryptoError> {
        match params {
            EncryptionParams::Aes(
                aes @ AesEncryptionParams {
                    algorithm: Algorithm::AesGcm | Algorithm::AesCcm,
                    ..
                },
            ) => {
                check_aead_shape(key, aes)?;
                self.aead_backend(aes)?.seal(key, plaintext, aes)
            }
            EncryptionParams::Rsa(
                rsa_params @ RsaEncryptionParams {
                    algorithm: Algorithm::RsaOaep,
                    ..
                },
            ) => asymmetric::encrypt(key, plaintext, rsa_params),
            other => Err(not_an_encryption_algorithm(other.algorithm())),
        }
    }

    fn decrypt(
        &self,
        key: &[u8],
        ciphertext: &[u8],
        params: &EncryptionParams,
    ) -> Result<SecretBuffer, CryptoError> {
        match params {
            EncryptionParams::Aes(
                aes @ AesEncryptionParams {
                    algorithm: Algorithm::AesGcm | Algorithm::AesCcm,
                    ..
                },
            ) => {
                check_aead_shape(key, aes)?;
                self.aead_backend(aes)?.open(key, ciphertext, aes)
            }
            EncryptionParams::Rsa(
                rsa_params @ RsaEncryptionParams {
                    algorithm: Algorithm::RsaOaep,
                    ..
                },
            ) => asymmetric::decrypt(key, ciphertext, rsa_params),
            other => Err(not_an_encryption_algorithm(other.algorithm())),
        }
    }

    fn sign(
        &self,
        key: &[u8],
        data: &[u8],
        params: &SigningParams,
    ) -> Result<Vec<u8>, CryptoError> {
        match params {
            SigningParams::Hmac(
                hmac @ HmacParams {
                    algorithm: Algorithm::Hmac,
                    ..
                },
            ) => digest::hmac_sign(key, data, hmac),
            SigningParams::Rsa(
                pss @ RsaSigningParams {
                    algorithm: Algorithm::RsaPss,
                    ..
                },
            ) => asymmetric::sign(key, data, pss),
            other => Err(not_a_signing_algorithm(other.algorithm())),
        }
    }

    fn verify(
        &self,
        key: &[u8],
        signature: &[u8],
        data: &[u8],
        params: &SigningParams,
    ) -> Result<bool, CryptoError> {
        match params {
            SigningParams::Hmac(
                hmac @ HmacParams {
                    algorithm: Algorithm::Hmac,
                    ..
                },
            ) => {
                let expected = digest::hmac_sign(key, data, hmac)?;
                self.timing_safe_equal(&expected, signature)
            }
            SigningParams::Rsa(
                pss @ RsaSigningParams {
                    algorithm: Algorithm::RsaPss,
                    ..
                },
            ) => asymmetric::verify(key, signature, data, pss),
            other => Err(not_a_signing_algorithm(other.algorithm())),
        }
    }
}
