//! Zeroizing container for secret provider outputs.
//!
//! Symmetric keys, derived keys, private keys and decrypted plaintext leave
//! the provider as a [`SecretBuffer`]: the bytes are erased on drop, the
//! pages are `mlock`ed where the platform allows it, and formatting never
//! shows the content.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretSlice};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Owned secret bytes, erased on drop.
pub struct SecretBuffer {
    inner: SecretSlice<u8>,
    pin: PageLock,
}

impl SecretBuffer {
    /// Copy `data` into a fresh locked allocation.
    ///
    /// The caller remains responsible for erasing its own copy.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        let inner: SecretSlice<u8> = data.to_vec().into();
        let pin = PageLock::acquire(inner.expose_secret());
        Self { inner, pin }
    }

    /// Move an intermediate buffer into a `SecretBuffer`, erasing the source.
    #[must_use]
    pub fn from_vec(mut data: Vec<u8>) -> Self {
        let buffer = Self::new(&data);
        data.zeroize();
        buffer
    }

    /// Fill a new buffer with `len` bytes from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Entropy`] if the CSPRNG cannot produce bytes.
    pub fn random(len: usize) -> Result<Self, CryptoError> {
        let mut bytes = vec![0u8; len];
        if let Err(e) = OsRng.try_fill_bytes(&mut bytes) {
            bytes.zeroize();
            return Err(CryptoError::Entropy(format!("OS CSPRNG failed: {e}")));
        }
        Ok(Self::from_vec(bytes))
    }

    /// Borrow the secret bytes. Keep the borrow as short as possible.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Number of secret bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// `true` if the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if the pages backing the buffer are locked in RAM.
    #[must_use]
    pub const fn is_mlocked(&self) -> bool {
        self.pin.locked
    }
}

impl Clone for SecretBuffer {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

impl fmt::Display for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

/// `mlock` guard for the heap block owned by a [`SecretBuffer`].
///
/// The block never moves: `SecretSlice` boxes it, and the box is only
/// dropped together with this guard.
struct PageLock {
    ptr: *const u8,
    len: usize,
    locked: bool,
}

// SAFETY: the pointer is only handed to mlock/munlock, never dereferenced.
unsafe impl Send for PageLock {}
unsafe impl Sync for PageLock {}

impl PageLock {
    fn acquire(bytes: &[u8]) -> Self {
        let locked = os::lock(bytes.as_ptr(), bytes.len());
        if !locked && !bytes.is_empty() {
            static WARNED: std::sync::Once = std::sync::Once::new();
            WARNED.call_once(|| {
                tracing::warn!("mlock unavailable, secret buffers may be swapped to disk");
            });
        }
        Self {
            ptr: bytes.as_ptr(),
            len: bytes.len(),
            locked,
        }
    }
}

impl Drop for PageLock {
    fn drop(&mut self) {
        if self.locked {
            os::unlock(self.ptr, self.len);
        }
    }
}

#[cfg(unix)]
mod os {
    pub(super) fn lock(ptr: *const u8, len: usize) -> bool {
        if len == 0 {
            return true;
        }
        // SAFETY: mlock only inspects the address range; an invalid range
        // yields ENOMEM rather than undefined behaviour.
        unsafe { libc::mlock(ptr.cast(), len) == 0 }
    }

    pub(super) fn unlock(ptr: *const u8, len: usize) {
        if len == 0 {
            return;
        }
        // SAFETY: see `lock`. Failure leaves the pages locked, which is harmless.
        unsafe {
            libc::munlock(ptr.cast(), len);
        }
    }
}

#[cfg(not(unix))]
mod os {
    pub(super) fn lock(_ptr: *const u8, _len: usize) -> bool {
        false
    }

    pub(super) fn unlock(_ptr: *const u8, _len: usize) {}
}
