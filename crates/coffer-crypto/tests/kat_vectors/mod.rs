mod hmac;
mod pbkdf2;
mod sha2;

/// Decode a lowercase hex literal.
pub(crate) fn hex(s: &str) -> Vec<u8> {
    data_encoding::HEXLOWER
        .decode(s.as_bytes())
        .expect("test vector is valid hex")
}
