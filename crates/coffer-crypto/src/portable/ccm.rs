//! AES-CCM (NIST SP 800-38C, RFC 3610) over the `aes` block cipher.
//!
//! The length field width follows the rule existing vault data was written
//! with: start at two bytes, widen until the message length fits (capped at
//! four), then widen further if the IV is too short to fill the nonce. IVs
//! longer than the nonce are truncated, so a 16-byte IV works and only its
//! first `15 - L` bytes take part.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};
use zeroize::Zeroize;

use crate::compare::constant_time_eq;
use crate::error::CryptoError;
use crate::params::{bits_to_bytes, AesEncryptionParams};
use crate::secret::SecretBuffer;

const BLOCK_LEN: usize = 16;

/// Shortest IV that leaves room for an eight-byte length field.
const MIN_IV_LEN: usize = 7;

/// Plaintext and additional data are capped below 4 GiB.
const MAX_DATA_LEN: u64 = 0xFFFF_FFFF;

/// Additional data shorter than this gets a two-byte length prefix.
const SHORT_AAD_LIMIT: usize = 0xFF00;

enum BlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockCipher {
    fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let cipher = match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128),
            24 => Aes192::new_from_slice(key).map(Self::Aes192),
            32 => Aes256::new_from_slice(key).map(Self::Aes256),
            n => {
                return Err(CryptoError::InvalidKey(format!(
                    "AES keys are 16, 24 or 32 bytes, got {n}"
                )))
            }
        };
        cipher.map_err(|_| CryptoError::InvalidKey("AES key rejected".into()))
    }

    fn encrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        let block = Block::from_mut_slice(&mut block[..]);
        match self {
            Self::Aes128(c) => c.encrypt_block(block),
            Self::Aes192(c) => c.encrypt_block(block),
            Self::Aes256(c) => c.encrypt_block(block),
        }
    }
}

/// Field widths for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Bytes of the IV used as nonce: `15 - length_len`.
    nonce_len: usize,
    /// Width `L` of the message length field.
    length_len: usize,
    tag_len: usize,
}

impl Layout {
    // Bounded: iv_len >= 7 keeps length_len in 2..=8.
    #[allow(clippy::arithmetic_side_effects)]
    fn new(
        iv_len: usize,
        message_len: usize,
        aad_len: usize,
        tag_len: usize,
    ) -> Result<Self, CryptoError> {
        if iv_len < MIN_IV_LEN {
            return Err(CryptoError::InvalidParameters(format!(
                "AES-CCM IV must be at least {MIN_IV_LEN} bytes, got {iv_len}"
            )));
        }
        if !(4..=16).contains(&tag_len) || tag_len % 2 != 0 {
            return Err(CryptoError::InvalidParameters(format!(
                "AES-CCM tag must be 32 to 128 bits in steps of 16, got {}",
                tag_len * 8
            )));
        }
        let message_len = u64::try_from(message_len).unwrap_or(u64::MAX);
        let aad_len = u64::try_from(aad_len).unwrap_or(u64::MAX);
        if message_len > MAX_DATA_LEN || aad_len > MAX_DATA_LEN {
            return Err(CryptoError::InvalidParameters(
                "AES-CCM data must be shorter than 4 GiB".into(),
            ));
        }

        let mut length_len = 2;
        while length_len < 4 && (message_len >> (8 * length_len)) != 0 {
            length_len += 1;
        }
        let length_len = length_len.max(15 - iv_len.min(13));

        Ok(Self {
            nonce_len: 15 - length_len,
            length_len,
            tag_len,
        })
    }

    /// Flags byte of `B_0`.
    // Bounded: tag_len in 4..=16, length_len in 2..=8.
    #[allow(clippy::arithmetic_side_effects)]
    fn flags(&self, has_aad: bool) -> u8 {
        let adata = if has_aad { 0x40 } else { 0 };
        let tag_field = (self.tag_len - 2) / 2;
        let length_field = self.length_len - 1;
        adata | u8::try_from((tag_field << 3) | length_field).unwrap_or(0)
    }

    /// `value` as a big-endian `length_len`-byte field at the end of `block`.
    fn write_length(&self, block: &mut [u8; BLOCK_LEN], value: u64) {
        let be = value.to_be_bytes();
        let start = BLOCK_LEN.saturating_sub(self.length_len);
        block[start..].copy_from_slice(&be[be.len().saturating_sub(self.length_len)..]);
    }

    /// Counter block `A_i`.
    fn counter_block(&self, nonce: &[u8], counter: u64) -> [u8; BLOCK_LEN] {
        let mut block = [0u8; BLOCK_LEN];
        block[0] = u8::try_from(self.length_len.saturating_sub(1)).unwrap_or(0);
        block[1..=self.nonce_len].copy_from_slice(nonce);
        self.write_length(&mut block, counter);
        block
    }
}

fn absorb(cipher: &BlockCipher, mac: &mut [u8; BLOCK_LEN], data: &[u8]) {
    for chunk in data.chunks(BLOCK_LEN) {
        for (m, d) in mac.iter_mut().zip(chunk) {
            *m ^= d;
        }
        cipher.encrypt_block(mac);
    }
}

/// CBC-MAC over `B_0`, the encoded additional data and the plaintext.
fn cbc_mac(
    cipher: &BlockCipher,
    layout: &Layout,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> [u8; BLOCK_LEN] {
    let mut mac = [0u8; BLOCK_LEN];
    mac[0] = layout.flags(!aad.is_empty());
    mac[1..=layout.nonce_len].copy_from_slice(nonce);
    layout.write_length(&mut mac, u64::try_from(plaintext.len()).unwrap_or(u64::MAX));
    cipher.encrypt_block(&mut mac);

    if !aad.is_empty() {
        let mut header = Vec::with_capacity(aad.len().saturating_add(6));
        match u16::try_from(aad.len()) {
            Ok(short) if aad.len() < SHORT_AAD_LIMIT => header.extend_from_slice(&short.to_be_bytes()),
            _ => {
                let long = u32::try_from(aad.len()).unwrap_or(u32::MAX);
                header.extend_from_slice(&[0xFF, 0xFE]);
                header.extend_from_slice(&long.to_be_bytes());
            }
        }
        header.extend_from_slice(aad);
        absorb(cipher, &mut mac, &header);
    }
    absorb(cipher, &mut mac, plaintext);
    mac
}

/// XOR `data` with the keystream starting at counter 1.
fn apply_keystream(cipher: &BlockCipher, layout: &Layout, nonce: &[u8], data: &mut [u8]) {
    let mut counter: u64 = 1;
    for chunk in data.chunks_mut(BLOCK_LEN) {
        let mut keystream = layout.counter_block(nonce, counter);
        cipher.encrypt_block(&mut keystream);
        for (d, k) in chunk.iter_mut().zip(keystream.iter()) {
            *d ^= k;
        }
        keystream.zeroize();
        counter = counter.saturating_add(1);
    }
}

/// Encrypt the MAC with counter block `A_0`, in place.
fn encrypt_tag(cipher: &BlockCipher, layout: &Layout, nonce: &[u8], mac: &mut [u8; BLOCK_LEN]) {
    let mut s0 = layout.counter_block(nonce, 0);
    cipher.encrypt_block(&mut s0);
    for (m, s) in mac.iter_mut().zip(s0.iter()) {
        *m ^= s;
    }
    s0.zeroize();
}

pub(super) fn seal(
    key: &[u8],
    plaintext: &[u8],
    params: &AesEncryptionParams,
) -> Result<Vec<u8>, CryptoError> {
    let tag_len = bits_to_bytes(params.tag_size, "tag size")?;
    let layout = Layout::new(
        params.iv.len(),
        plaintext.len(),
        params.additional_data.len(),
        tag_len,
    )?;
    let cipher = BlockCipher::new(key)?;
    let nonce = &params.iv[..layout.nonce_len];

    let mut mac = cbc_mac(&cipher, &layout, nonce, &params.additional_data, plaintext);
    encrypt_tag(&cipher, &layout, nonce, &mut mac);

    let mut out = Vec::with_capacity(plaintext.len().saturating_add(tag_len));
    out.extend_from_slice(plaintext);
    apply_keystream(&cipher, &layout, nonce, &mut out);
    out.extend_from_slice(&mac[..tag_len]);
    mac.zeroize();
    Ok(out)
}

pub(super) fn open(
    key: &[u8],
    ciphertext: &[u8],
    params: &AesEncryptionParams,
) -> Result<SecretBuffer, CryptoError> {
    let tag_len = bits_to_bytes(params.tag_size, "tag size")?;
    let body_len = ciphertext
        .len()
        .checked_sub(tag_len)
        .ok_or(CryptoError::DecryptionFailed)?;
    let layout = Layout::new(
        params.iv.len(),
        body_len,
        params.additional_data.len(),
        tag_len,
    )?;
    let cipher = BlockCipher::new(key)?;
    let nonce = &params.iv[..layout.nonce_len];
    let (body, tag) = ciphertext.split_at(body_len);

    let mut plaintext = body.to_vec();
    apply_keystream(&cipher, &layout, nonce, &mut plaintext);
    let mut mac = cbc_mac(&cipher, &layout, nonce, &params.additional_data, &plaintext);
    encrypt_tag(&cipher, &layout, nonce, &mut mac);

    let authentic = constant_time_eq(&mac[..tag_len], tag);
    mac.zeroize();
    if !authentic {
        plaintext.zeroize();
        return Err(CryptoError::DecryptionFailed);
    }
    Ok(SecretBuffer::from_vec(plaintext))
}
