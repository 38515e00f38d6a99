//! Provider configuration: which backend executes each AEAD mode.
//!
//! Host engines differ in what they expose, so the split between the native
//! engine and the portable fallback is a deployment decision rather than a
//! fixed list. The record is plain JSON supplied by the host application;
//! reading it from disk is the host's job.

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;
use crate::params::Algorithm;

/// Backend that executes an algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// The host-native engine (`ring`).
    Native,
    /// The portable fallback built on the `aes` block cipher.
    Portable,
}

/// Routing table for authenticated encryption modes.
///
/// All fields default so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Backend for `AES-GCM`.
    #[serde(default = "default_gcm_route")]
    pub aes_gcm: Route,

    /// Backend for `AES-CCM`. The native engine has no CCM, so only
    /// [`Route::Portable`] passes validation.
    #[serde(default = "default_ccm_route")]
    pub aes_ccm: Route,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            aes_gcm: default_gcm_route(),
            aes_ccm: default_ccm_route(),
        }
    }
}

const fn default_gcm_route() -> Route {
    Route::Native
}
const fn default_ccm_route() -> Route {
    Route::Portable
}

impl ProviderConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameters`] if the JSON does not
    /// describe a `ProviderConfig`.
    pub fn from_json(json: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(json)
            .map_err(|e| CryptoError::InvalidParameters(format!("provider config: {e}")))
    }

    /// Route for an AEAD algorithm tag, or `None` if the tag is not an AEAD mode.
    #[must_use]
    pub const fn route_for(&self, algorithm: &Algorithm) -> Option<Route> {
        match algorithm {
            Algorithm::AesGcm => Some(self.aes_gcm),
            Algorithm::AesCcm => Some(self.aes_ccm),
            _ => None,
        }
    }

    /// AEAD tags covered by the routing table.
    #[must_use]
    pub fn routed_algorithms(&self) -> [(Algorithm, Route); 2] {
        [
            (Algorithm::AesGcm, self.aes_gcm),
            (Algorithm::AesCcm, self.aes_ccm),
        ]
    }
}
