//! Random string helpers (OTP codes, fixture names, temporary secrets)

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Alphanumeric string of `len` characters
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Letters only
pub fn random_alpha(len: usize) -> String {
    random_from(ALPHA, len)
}

/// Digits only, e.g. a 6-digit OTP
pub fn random_digits(len: usize) -> String {
    random_from(DIGITS, len)
}

fn random_from(charset: &[u8], len: usize) -> String {
    let mut rng = thread_rng();
    (0..len)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}
