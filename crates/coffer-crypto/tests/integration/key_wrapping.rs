//! Share a vault key with another member through RSA-OAEP, and sign with
//! RSA-PSS. Key generation is the slow part, so one pair serves each test.

use coffer_crypto::{
    AesKeyParams, CryptoError, CryptoProvider, EncryptionParams, HashAlgorithm, KeyParams,
    RingCryptoProvider, RsaEncryptionParams, RsaKeyPair, RsaKeyParams, RsaSigningParams,
    SigningParams,
};

fn key_pair(provider: &RingCryptoProvider) -> RsaKeyPair {
    provider
        .generate_key(&KeyParams::Rsa(RsaKeyParams::default()))
        .expect("generate RSA")
        .into_key_pair()
        .expect("key pair")
}

#[test]
fn wrap_and_unwrap_vault_key() {
    let provider = RingCryptoProvider::new();
    let pair = key_pair(&provider);

    let vault_key = provider
        .generate_key(&KeyParams::Aes(AesKeyParams::default()))
        .expect("generate AES")
        .into_symmetric()
        .expect("symmetric");

    let params = EncryptionParams::Rsa(RsaEncryptionParams::default());
    let wrapped = provider
        .encrypt(&pair.public_key, vault_key.expose(), &params)
        .expect("wrap");
    assert_eq!(wrapped.len(), 256);

    let unwrapped = provider
        .decrypt(pair.private_key.expose(), &wrapped, &params)
        .expect("unwrap");
    assert_eq!(unwrapped.expose(), vault_key.expose());

    let mut corrupted = wrapped;
    corrupted[100] ^= 0x04;
    assert!(matches!(
        provider.decrypt(pair.private_key.expose(), &corrupted, &params),
        Err(CryptoError::DecryptionFailed)
    ));
}

#[test]
fn oaep_hash_must_match() {
    let provider = RingCryptoProvider::new();
    let pair = key_pair(&provider);

    let sealed_with = EncryptionParams::Rsa(RsaEncryptionParams::default());
    let opened_with = EncryptionParams::Rsa(RsaEncryptionParams {
        hash: HashAlgorithm::Sha512,
        ..RsaEncryptionParams::default()
    });
    let wrapped = provider
        .encrypt(&pair.public_key, b"k", &sealed_with)
        .expect("wrap");
    assert!(matches!(
        provider.decrypt(pair.private_key.expose(), &wrapped, &opened_with),
        Err(CryptoError::DecryptionFailed)
    ));
}

#[test]
fn pss_signature_verifies_and_detects_change() {
    let provider = RingCryptoProvider::new();
    let pair = key_pair(&provider);
    let params = SigningParams::Rsa(RsaSigningParams::default());

    let signature = provider
        .sign(pair.private_key.expose(), b"invite:alice", &params)
        .expect("sign");
    assert_eq!(signature.len(), 256);
    assert!(provider
        .verify(&pair.public_key, &signature, b"invite:alice", &params)
        .expect("verify"));
    assert!(!provider
        .verify(&pair.public_key, &signature, b"invite:mallory", &params)
        .expect("verify"));

    let mut forged = signature;
    forged[0] ^= 0x80;
    assert!(!provider
        .verify(&pair.public_key, &forged, b"invite:alice", &params)
        .expect("verify"));
}

#[test]
fn pss_salt_too_long_for_modulus_is_invalid_parameters() {
    let provider = RingCryptoProvider::new();
    let pair = key_pair(&provider);
    let signature = provider
        .sign(
            pair.private_key.expose(),
            b"invite:alice",
            &SigningParams::Rsa(RsaSigningParams::default()),
        )
        .expect("sign");

    let oversized = SigningParams::Rsa(RsaSigningParams {
        salt_length: 1000,
        ..RsaSigningParams::default()
    });
    let err = provider
        .sign(pair.private_key.expose(), b"invite:alice", &oversized)
        .unwrap_err();
    assert!(matches!(err, CryptoError::InvalidParameters(_)), "{err:?}");
    let err = provider
        .verify(&pair.public_key, &signature, b"invite:alice", &oversized)
        .unwrap_err();
    assert!(matches!(err, CryptoError::InvalidParameters(_)), "{err:?}");
}

#[test]
fn fingerprint_identifies_public_key() {
    let provider = RingCryptoProvider::new();
    let pair = key_pair(&provider);
    let fp = provider.fingerprint(&pair.public_key).expect("fingerprint");
    assert_eq!(fp.len(), 32);
    assert_eq!(fp, provider.fingerprint(&pair.public_key).expect("again"));
    assert_ne!(
        fp,
        provider
            .fingerprint(pair.private_key.expose())
            .expect("other input")
    );
}

#[test]
fn fingerprints_differ_between_key_pairs() {
    let provider = RingCryptoProvider::new();
    let first = key_pair(&provider);
    let second = key_pair(&provider);
    assert_ne!(first.public_key, second.public_key);
    assert_ne!(
        provider.fingerprint(&first.public_key).expect("fingerprint"),
        provider.fingerprint(&second.public_key).expect("fingerprint")
    );
}

#[test]
fn swapped_key_roles_are_invalid_key() {
    let provider = RingCryptoProvider::new();
    let pair = key_pair(&provider);
    let params = EncryptionParams::Rsa(RsaEncryptionParams::default());
    assert!(matches!(
        provider.encrypt(pair.private_key.expose(), b"k", &params),
        Err(CryptoError::InvalidKey(_))
    ));
    assert!(matches!(
        provider.decrypt(&pair.public_key, &[0u8; 256], &params),
        Err(CryptoError::InvalidKey(_))
    ));
}

#[test]
fn key_pair_debug_hides_private_key() {
    let provider = RingCryptoProvider::new();
    let pair = key_pair(&provider);
    let shown = format!("{pair:?}");
    assert!(shown.contains("SecretBuffer(***)"));
    assert!(shown.contains("public_key_len"));
}
