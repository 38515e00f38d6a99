//! RFC 4231 HMAC-SHA-2 known-answer tests.
//!
//! The provider checks the key against the declared `key_size`, so each
//! vector declares its own key length.

use coffer_crypto::{CryptoProvider, HashAlgorithm, HmacParams, RingCryptoProvider, SigningParams};

use super::hex;

fn params(hash: HashAlgorithm, key: &[u8]) -> SigningParams {
    SigningParams::Hmac(HmacParams {
        hash,
        key_size: u32::try_from(key.len() * 8).unwrap(),
        ..HmacParams::default()
    })
}

/// Test Case 1.
#[test]
fn rfc4231_case_1() {
    let key = [0x0bu8; 20];
    let provider = RingCryptoProvider::new();
    assert_eq!(
        provider
            .sign(&key, b"Hi There", &params(HashAlgorithm::Sha256, &key))
            .unwrap(),
        hex("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")
    );
    assert_eq!(
        provider
            .sign(&key, b"Hi There", &params(HashAlgorithm::Sha512, &key))
            .unwrap(),
        hex(
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
             daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        )
    );
}

/// Test Case 2: key shorter than the block ("Jefe").
#[test]
fn rfc4231_case_2() {
    let provider = RingCryptoProvider::new();
    let p = params(HashAlgorithm::Sha256, b"Jefe");
    let expected = hex("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843");
    assert_eq!(
        provider
            .sign(b"Jefe", b"what do ya want for nothing?", &p)
            .unwrap(),
        expected
    );
    assert!(provider
        .verify(b"Jefe", &expected, b"what do ya want for nothing?", &p)
        .unwrap());
}
