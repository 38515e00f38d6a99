//! FIPS 180 digests of "abc" and the empty string, plus fingerprints.

use coffer_crypto::{CryptoProvider, HashAlgorithm, HashParams, RingCryptoProvider};

use super::hex;

fn digest(hash: HashAlgorithm, input: &[u8]) -> Vec<u8> {
    RingCryptoProvider::new()
        .hash(input, &HashParams::new(hash))
        .unwrap()
}

#[test]
fn abc_digests() {
    assert_eq!(
        digest(HashAlgorithm::Sha1, b"abc"),
        hex("a9993e364706816aba3e25717850c26c9cd0d89d")
    );
    assert_eq!(
        digest(HashAlgorithm::Sha256, b"abc"),
        hex("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
    assert_eq!(
        digest(HashAlgorithm::Sha384, b"abc"),
        hex(
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7"
        )
    );
    assert_eq!(
        digest(HashAlgorithm::Sha512, b"abc"),
        hex(
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        )
    );
}

#[test]
fn empty_input_sha256() {
    assert_eq!(
        digest(HashAlgorithm::Sha256, b""),
        hex("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
}

#[test]
fn fingerprint_is_sha256() {
    let provider = RingCryptoProvider::new();
    assert_eq!(
        provider.fingerprint(b"abc").unwrap(),
        digest(HashAlgorithm::Sha256, b"abc")
    );
}
