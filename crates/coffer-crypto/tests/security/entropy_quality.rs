//! Shannon entropy smoke tests for CSPRNG-backed outputs.
//!
//! Thresholds sit well below the expected value for uniform bytes of each
//! sample size, so only degenerate output (all zeros, short cycles) fails.

use coffer_crypto::{
    AesKeyParams, CryptoProvider, GeneratedKey, HmacKeyParams, KeyParams, RingCryptoProvider,
};

#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[usize::from(b)] += 1;
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn random_bytes_64kb_entropy() {
    let bytes = RingCryptoProvider::new().random_bytes(64 * 1024).unwrap();
    let h = shannon_entropy(&bytes);
    assert!(h > 7.99, "64 KB of random_bytes has entropy {h:.4}");
}

#[test]
fn random_bytes_1kb_entropy() {
    let bytes = RingCryptoProvider::new().random_bytes(1024).unwrap();
    let h = shannon_entropy(&bytes);
    assert!(h > 7.5, "1 KB of random_bytes has entropy {h:.4}");
}

#[test]
fn generated_symmetric_keys_are_not_degenerate() {
    let provider = RingCryptoProvider::new();
    let mut pooled = Vec::new();
    for _ in 0..32 {
        let aes = provider
            .generate_key(&KeyParams::Aes(AesKeyParams::default()))
            .unwrap();
        let hmac = provider
            .generate_key(&KeyParams::Hmac(HmacKeyParams::default()))
            .unwrap();
        for key in [aes, hmac] {
            let GeneratedKey::Symmetric(key) = key else {
                panic!("expected a symmetric key");
            };
            assert_eq!(key.len(), 32);
            pooled.extend_from_slice(key.expose());
        }
    }
    let h = shannon_entropy(&pooled);
    assert!(h > 7.5, "2 KB of generated keys has entropy {h:.4}");
}

#[test]
fn consecutive_ivs_never_repeat() {
    let provider = RingCryptoProvider::new();
    let mut ivs: Vec<Vec<u8>> = (0..1000).map(|_| provider.random_bytes(12).unwrap()).collect();
    ivs.sort();
    ivs.dedup();
    assert_eq!(ivs.len(), 1000);
}
