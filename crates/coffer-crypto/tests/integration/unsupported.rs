//! Requests the provider must refuse without producing output.

use coffer_crypto::{
    AesEncryptionParams, AesKeyParams, Algorithm, CryptoError, CryptoProvider, EncryptionParams,
    HashAlgorithm, HmacParams, KeyParams, Pbkdf2Params, RingCryptoProvider, RsaKeyParams,
    RsaSigningParams, SigningParams,
};

#[test]
fn unknown_key_generation_tag_is_not_supported() {
    let provider = RingCryptoProvider::new();
    let params: AesKeyParams =
        serde_json::from_str(r#"{"algorithm":"Serpent","keySize":256}"#).expect("parse");
    let err = provider
        .generate_key(&KeyParams::Aes(params))
        .expect_err("unknown tag");
    assert!(matches!(err, CryptoError::NotSupported(_)));
    assert_eq!(err.kind().code(), "not_supported");
    assert!(err.to_string().contains("Serpent"));
}

#[test]
fn unknown_encryption_tag_is_invalid_parameters() {
    let provider = RingCryptoProvider::new();
    let params = EncryptionParams::Aes(AesEncryptionParams {
        algorithm: Algorithm::from("AES-OCB"),
        ..AesEncryptionParams::gcm(vec![0u8; 12])
    });
    let err = provider
        .encrypt(&[0u8; 32], b"x", &params)
        .expect_err("unknown tag");
    assert_eq!(err.kind().code(), "invalid_encryption_params");
    assert!(matches!(
        provider.decrypt(&[0u8; 32], &[0u8; 32], &params),
        Err(CryptoError::InvalidParameters(_))
    ));
}

#[test]
fn unknown_signing_tag_is_not_supported() {
    let provider = RingCryptoProvider::new();
    let params = SigningParams::Rsa(RsaSigningParams {
        algorithm: Algorithm::from("RSASSA-PKCS1-v1_5"),
        ..RsaSigningParams::default()
    });
    assert!(matches!(
        provider.sign(b"key", b"x", &params),
        Err(CryptoError::NotSupported(_))
    ));
    assert!(matches!(
        provider.verify(b"key", b"sig", b"x", &params),
        Err(CryptoError::NotSupported(_))
    ));
}

#[test]
fn zero_iterations_is_invalid_parameters() {
    let provider = RingCryptoProvider::new();
    let params = Pbkdf2Params {
        iterations: 0,
        ..Pbkdf2Params::with_salt(vec![1u8; 16])
    };
    assert!(matches!(
        provider.derive_key(b"pw", &params),
        Err(CryptoError::InvalidParameters(_))
    ));
}

#[test]
fn rsa_with_sha1_is_not_supported() {
    let provider = RingCryptoProvider::new();
    let params = KeyParams::Rsa(RsaKeyParams {
        hash: HashAlgorithm::Sha1,
        ..RsaKeyParams::default()
    });
    assert!(matches!(
        provider.generate_key(&params),
        Err(CryptoError::NotSupported(_))
    ));
}

#[test]
fn short_ccm_iv_is_invalid_parameters() {
    let provider = RingCryptoProvider::new();
    let params = EncryptionParams::Aes(AesEncryptionParams::ccm(vec![0u8; 6]));
    assert!(matches!(
        provider.encrypt(&[0u8; 32], b"x", &params),
        Err(CryptoError::InvalidParameters(_))
    ));
}

#[test]
fn hmac_key_of_wrong_size_is_invalid_key() {
    let provider = RingCryptoProvider::new();
    let params = SigningParams::Hmac(HmacParams::default());
    assert!(matches!(
        provider.sign(&[0u8; 31], b"x", &params),
        Err(CryptoError::InvalidKey(_))
    ));
    assert!(matches!(
        provider.verify(&[0u8; 31], &[0u8; 32], b"x", &params),
        Err(CryptoError::InvalidKey(_))
    ));
}
