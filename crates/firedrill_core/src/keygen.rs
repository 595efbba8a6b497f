//! Fabricated AWS-style key material.
//!
//! Keys are random noise shaped like real credentials, so the scanning
//! tool's AWS patterns match them while the values themselves can never
//! authenticate against anything.

use rand::Rng as _;

const SECRET_KEY_LEN: usize = 40;
const SECRET_KEY_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789/+=";

const ACCESS_KEY_PREFIX: &str = "AKIA";
const ACCESS_KEY_SUFFIX_LEN: usize = 16;
const ACCESS_KEY_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a 40-character string shaped like an AWS secret access key.
#[must_use]
pub fn secret_access_key() -> String {
    random_string(SECRET_KEY_CHARS, SECRET_KEY_LEN)
}

/// Generates an `AKIA`-prefixed string shaped like an AWS access key ID.
#[must_use]
pub fn access_key_id() -> String {
    format!("{ACCESS_KEY_PREFIX}{}", random_string(ACCESS_KEY_CHARS, ACCESS_KEY_SUFFIX_LEN))
}

fn random_string(charset: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..len)
        .map(|_| char::from(charset[rng.gen_range(0..charset.len())]))
        .collect()
}
