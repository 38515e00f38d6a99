//! Per-call parameter records.
//!
//! Each record names its algorithm with an [`Algorithm`] tag and carries the
//! algorithm-specific fields. Records are plain serde values (camelCase
//! fields, byte fields as unpadded base64url) so the surrounding system can
//! persist, for example, the salt and iteration count a vault key was
//! derived with. Defaults mirror what the client has always used.
//!
//! Sizes are in **bits** everywhere; [`bits_to_bytes`] is the only place
//! that converts them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Algorithm tag carried by every parameter record.
///
/// The set is open: a tag read from storage that this build does not know
/// is kept as [`Algorithm::Unrecognized`] and rejected by the provider with
/// the documented error, instead of failing to parse.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Algorithm {
    /// Raw AES key generation.
    Aes,
    /// AES in Galois/Counter Mode.
    AesGcm,
    /// AES in Counter with CBC-MAC mode.
    AesCcm,
    /// HMAC key generation and MAC computation.
    Hmac,
    /// RSA key pair generation.
    Rsa,
    /// RSA encryption with OAEP padding.
    RsaOaep,
    /// RSA signatures with PSS padding.
    RsaPss,
    /// Password-based key derivation (PBKDF2-HMAC).
    Pbkdf2,
    /// Any tag this build does not implement.
    Unrecognized(String),
}

impl Algorithm {
    /// Canonical tag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Aes => "AES",
            Self::AesGcm => "AES-GCM",
            Self::AesCcm => "AES-CCM",
            Self::Hmac => "HMAC",
            Self::Rsa => "RSA",
            Self::RsaOaep => "RSA-OAEP",
            Self::RsaPss => "RSA-PSS",
            Self::Pbkdf2 => "PBKDF2",
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl From<&str> for Algorithm {
    fn from(tag: &str) -> Self {
        match tag {
            "AES" => Self::Aes,
            "AES-GCM" => Self::AesGcm,
            "AES-CCM" => Self::AesCcm,
            "HMAC" => Self::Hmac,
            "RSA" => Self::Rsa,
            "RSA-OAEP" => Self::RsaOaep,
            "RSA-PSS" => Self::RsaPss,
            "PBKDF2" => Self::Pbkdf2,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl From<String> for Algorithm {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Unrecognized(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest function selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-1. Accepted for digests, HMAC and PBKDF2 over legacy data only.
    #[serde(rename = "SHA-1")]
    Sha1,
    /// SHA-256.
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
    /// SHA-384.
    #[serde(rename = "SHA-384")]
    Sha384,
    /// SHA-512.
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl HashAlgorithm {
    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Digest length in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Size conversion
// ---------------------------------------------------------------------------

/// Convert a size in bits to bytes.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidParameters`] if `bits` is zero or not a
/// multiple of 8.
pub fn bits_to_bytes(bits: u32, what: &str) -> Result<usize, CryptoError> {
    if bits == 0 || bits % 8 != 0 {
        return Err(CryptoError::InvalidParameters(format!(
            "{what} must be a positive multiple of 8 bits, got {bits}"
        )));
    }
    usize::try_from(bits / 8)
        .map_err(|_| CryptoError::InvalidParameters(format!("{what} of {bits} bits is too large")))
}

/// Check that a key's byte length matches the size the parameters declare.
pub(crate) fn check_key_len(key: &[u8], declared_bits: u32) -> Result<(), CryptoError> {
    let expected = bits_to_bytes(declared_bits, "key size")?;
    if key.len() != expected {
        return Err(CryptoError::InvalidKey(format!(
            "key is {} bytes, parameters declare {declared_bits} bits",
            key.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

mod base64url {
    use data_encoding::BASE64URL_NOPAD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64URL_NOPAD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64URL_NOPAD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

const fn default_key_size() -> u32 {
    256
}
const fn default_tag_size() -> u32 {
    128
}
const fn default_modulus_length() -> u32 {
    2048
}
fn default_public_exponent() -> Vec<u8> {
    vec![0x01, 0x00, 0x01]
}
const fn default_iterations() -> u32 {
    100_000
}
const fn default_pss_salt_length() -> u32 {
    32
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Digest parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashParams {
    /// Digest function.
    pub algorithm: HashAlgorithm,
}

impl HashParams {
    /// Parameters for the given digest.
    #[must_use]
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }
}

/// Symmetric (AES) key generation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AesKeyParams {
    /// `AES`.
    pub algorithm: Algorithm,
    /// Key size in bits: 128, 192 or 256.
    #[serde(default = "default_key_size")]
    pub key_size: u32,
}

impl Default for AesKeyParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Aes,
            key_size: default_key_size(),
        }
    }
}

/// HMAC key generation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HmacKeyParams {
    /// `HMAC`.
    pub algorithm: Algorithm,
    /// Key size in bits.
    #[serde(default = "default_key_size")]
    pub key_size: u32,
}

impl Default for HmacKeyParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Hmac,
            key_size: default_key_size(),
        }
    }
}

/// RSA key pair generation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsaKeyParams {
    /// `RSA`.
    pub algorithm: Algorithm,
    /// Modulus size in bits.
    #[serde(default = "default_modulus_length")]
    pub modulus_length: u32,
    /// Public exponent, big-endian.
    #[serde(with = "base64url", default = "default_public_exponent")]
    pub public_exponent: Vec<u8>,
    /// Hash the key pair will be used with.
    #[serde(default)]
    pub hash: HashAlgorithm,
}

impl Default for RsaKeyParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Rsa,
            modulus_length: default_modulus_length(),
            public_exponent: default_public_exponent(),
            hash: HashAlgorithm::Sha256,
        }
    }
}

/// PBKDF2 key derivation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pbkdf2Params {
    /// `PBKDF2`.
    pub algorithm: Algorithm,
    /// PRF hash.
    #[serde(default)]
    pub hash: HashAlgorithm,
    /// Output size in bits.
    #[serde(default = "default_key_size")]
    pub key_size: u32,
    /// Iteration count. Any non-zero value is accepted.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Salt; must not be empty.
    #[serde(with = "base64url")]
    pub salt: Vec<u8>,
}

impl Pbkdf2Params {
    /// Default parameters with the given salt.
    #[must_use]
    pub fn with_salt(salt: Vec<u8>) -> Self {
        Self {
            salt,
            ..Self::default()
        }
    }
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Pbkdf2,
            hash: HashAlgorithm::Sha256,
            key_size: default_key_size(),
            iterations: default_iterations(),
            salt: Vec::new(),
        }
    }
}

/// Authenticated symmetric encryption parameters (`AES-GCM`, `AES-CCM`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AesEncryptionParams {
    /// `AES-GCM` or `AES-CCM`.
    pub algorithm: Algorithm,
    /// Authentication tag size in bits.
    #[serde(default = "default_tag_size")]
    pub tag_size: u32,
    /// Key size in bits; must match the key passed in.
    #[serde(default = "default_key_size")]
    pub key_size: u32,
    /// Initialization vector.
    #[serde(with = "base64url")]
    pub iv: Vec<u8>,
    /// Additional authenticated data; empty means none.
    #[serde(with = "base64url", default, skip_serializing_if = "Vec::is_empty")]
    pub additional_data: Vec<u8>,
}

impl AesEncryptionParams {
    /// AES-GCM with the given IV and default sizes.
    #[must_use]
    pub fn gcm(iv: Vec<u8>) -> Self {
        Self {
            iv,
            ..Self::default()
        }
    }

    /// AES-CCM with the given IV and default sizes.
    #[must_use]
    pub fn ccm(iv: Vec<u8>) -> Self {
        Self {
            algorithm: Algorithm::AesCcm,
            iv,
            ..Self::default()
        }
    }

    /// Attach additional authenticated data.
    #[must_use]
    pub fn with_additional_data(mut self, additional_data: Vec<u8>) -> Self {
        self.additional_data = additional_data;
        self
    }
}

impl Default for AesEncryptionParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AesGcm,
            tag_size: default_tag_size(),
            key_size: default_key_size(),
            iv: Vec::new(),
            additional_data: Vec::new(),
        }
    }
}

/// RSA-OAEP parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsaEncryptionParams {
    /// `RSA-OAEP`.
    pub algorithm: Algorithm,
    /// OAEP hash (SHA-2 family).
    #[serde(default)]
    pub hash: HashAlgorithm,
}

impl Default for RsaEncryptionParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::RsaOaep,
            hash: HashAlgorithm::Sha256,
        }
    }
}

/// HMAC parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HmacParams {
    /// `HMAC`.
    pub algorithm: Algorithm,
    /// MAC hash.
    #[serde(default)]
    pub hash: HashAlgorithm,
    /// Key size in bits; must match the key passed in.
    #[serde(default = "default_key_size")]
    pub key_size: u32,
}

impl Default for HmacParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Hmac,
            hash: HashAlgorithm::Sha256,
            key_size: default_key_size(),
        }
    }
}

/// RSA-PSS parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsaSigningParams {
    /// `RSA-PSS`.
    pub algorithm: Algorithm,
    /// Message hash (SHA-2 family).
    #[serde(default)]
    pub hash: HashAlgorithm,
    /// PSS salt length in bytes.
    #[serde(default = "default_pss_salt_length")]
    pub salt_length: u32,
}

impl Default for RsaSigningParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::RsaPss,
            hash: HashAlgorithm::Sha256,
            salt_length: default_pss_salt_length(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-operation unions
// ---------------------------------------------------------------------------

/// Parameters accepted by `generate_key`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyParams {
    /// Random symmetric key.
    Aes(AesKeyParams),
    /// RSA key pair.
    Rsa(RsaKeyParams),
    /// Random HMAC key.
    Hmac(HmacKeyParams),
}

impl KeyParams {
    /// Tag of the wrapped record.
    #[must_use]
    pub const fn algorithm(&self) -> &Algorithm {
        match self {
            Self::Aes(p) => &p.algorithm,
            Self::Rsa(p) => &p.algorithm,
            Self::Hmac(p) => &p.algorithm,
        }
    }
}

impl From<AesKeyParams> for KeyParams {
    fn from(params: AesKeyParams) -> Self {
        Self::Aes(params)
    }
}

impl From<RsaKeyParams> for KeyParams {
    fn from(params: RsaKeyParams) -> Self {
        Self::Rsa(params)
    }
}

impl From<HmacKeyParams> for KeyParams {
    fn from(params: HmacKeyParams) -> Self {
        Self::Hmac(params)
    }
}

/// Parameters accepted by `encrypt` / `decrypt`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncryptionParams {
    /// Authenticated symmetric encryption.
    Aes(AesEncryptionParams),
    /// RSA-OAEP key wrapping.
    Rsa(RsaEncryptionParams),
}

impl EncryptionParams {
    /// Tag of the wrapped record.
    #[must_use]
    pub const fn algorithm(&self) -> &Algorithm {
        match self {
            Self::Aes(p) => &p.algorithm,
            Self::Rsa(p) => &p.algorithm,
        }
    }
}

impl From<AesEncryptionParams> for EncryptionParams {
    fn from(params: AesEncryptionParams) -> Self {
        Self::Aes(params)
    }
}

impl From<RsaEncryptionParams> for EncryptionParams {
    fn from(params: RsaEncryptionParams) -> Self {
        Self::Rsa(params)
    }
}

/// Parameters accepted by `sign` / `verify`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigningParams {
    /// HMAC tag.
    Hmac(HmacParams),
    /// RSA-PSS signature.
    Rsa(RsaSigningParams),
}

impl SigningParams {
    /// Tag of the wrapped record.
    #[must_use]
    pub const fn algorithm(&self) -> &Algorithm {
        match self {
            Self::Hmac(p) => &p.algorithm,
            Self::Rsa(p) => &p.algorithm,
        }
    }
}

impl From<HmacParams> for SigningParams {
    fn from(params: HmacParams) -> Self {
        Self::Hmac(params)
    }
}

impl From<RsaSigningParams> for SigningParams {
    fn from(params: RsaSigningParams) -> Self {
        Self::Rsa(params)
    }
}
