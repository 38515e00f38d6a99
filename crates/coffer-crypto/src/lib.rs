//! `coffer-crypto`: the cryptographic provider for the Coffer password manager.
//!
//! Every primitive the client uses goes through one [`CryptoProvider`]
//! trait: CSPRNG bytes, digests, key generation, PBKDF2, authenticated
//! encryption, RSA key wrapping, signatures, fingerprints and constant-time
//! comparison. [`RingCryptoProvider`] is the production implementation. It
//! runs on `ring` and `rsa` and routes AEAD modes the native engine lacks
//! (AES-CCM, unusual GCM shapes) to a portable backend, per
//! [`ProviderConfig`].
//!
//! No network, no persistence, no global state. With the `async` feature,
//! [`AsyncProvider`] moves calls onto tokio's blocking pool.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod secret;

pub mod params;
pub mod config;

pub mod compare;
pub mod provider;
pub mod backend;

pub mod engine;
pub mod portable;

#[cfg(feature = "async")]
pub mod blocking;

#[cfg(feature = "async")]
pub use blocking::AsyncProvider;
pub use backend::AeadBackend;
pub use compare::constant_time_eq;
pub use config::{ProviderConfig, Route};
pub use engine::{NativeAead, RingCryptoProvider};
pub use error::{CryptoError, ErrorKind};
pub use params::{
    bits_to_bytes, AesEncryptionParams, AesKeyParams, Algorithm, EncryptionParams,
    HashAlgorithm, HashParams, HmacKeyParams, HmacParams, KeyParams, Pbkdf2Params,
    RsaEncryptionParams, RsaKeyParams, RsaSigningParams, SigningParams,
};
pub use portable::PortableAead;
pub use provider::{CryptoProvider, GeneratedKey, RsaKeyPair};
pub use secret::SecretBuffer;
