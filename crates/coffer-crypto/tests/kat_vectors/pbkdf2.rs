//! PBKDF2 known-answer tests (RFC 6070 for SHA-1, RFC 7914 section 11 for SHA-256).

use coffer_crypto::{CryptoProvider, HashAlgorithm, Pbkdf2Params, RingCryptoProvider};

use super::hex;

fn derive(hash: HashAlgorithm, iterations: u32, key_size: u32) -> Vec<u8> {
    let params = Pbkdf2Params {
        hash,
        iterations,
        key_size,
        ..Pbkdf2Params::with_salt(b"salt".to_vec())
    };
    RingCryptoProvider::new()
        .derive_key(b"password", &params)
        .expect("derive")
        .expose()
        .to_vec()
}

#[test]
fn rfc6070_sha1_c1() {
    assert_eq!(
        derive(HashAlgorithm::Sha1, 1, 160),
        hex("0c60c80f961f0e71f3a9b524af6012062fe037a6")
    );
}

#[test]
fn rfc6070_sha1_c4096() {
    assert_eq!(
        derive(HashAlgorithm::Sha1, 4096, 160),
        hex("4b007901b765489abead49d926f721d065a429c1")
    );
}

#[test]
fn sha256_c1() {
    assert_eq!(
        derive(HashAlgorithm::Sha256, 1, 256),
        hex("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b")
    );
}

#[test]
fn sha256_c4096() {
    assert_eq!(
        derive(HashAlgorithm::Sha256, 4096, 256),
        hex("c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a")
    );
}

#[test]
fn sha512_c1() {
    assert_eq!(
        derive(HashAlgorithm::Sha512, 1, 512),
        hex(
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252\
             c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce"
        )
    );
}

/// RFC 7914 section 11, first PBKDF2-HMAC-SHA256 vector.
#[test]
fn rfc7914_sha256_passwd_c1() {
    let params = Pbkdf2Params {
        iterations: 1,
        key_size: 512,
        ..Pbkdf2Params::with_salt(b"salt".to_vec())
    };
    let derived = RingCryptoProvider::new()
        .derive_key(b"passwd", &params)
        .expect("derive");
    assert_eq!(
        derived.expose(),
        hex(
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc\
             49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783"
        )
        .as_slice()
    );
}

#[test]
fn shorter_output_is_a_prefix() {
    let full = derive(HashAlgorithm::Sha256, 1, 256);
    let short = derive(HashAlgorithm::Sha256, 1, 128);
    assert_eq!(short.as_slice(), &full[..16]);
}
