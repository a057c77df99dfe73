//! Password policy and hashing
//!
//! Policy: at least 10 characters with uppercase, lowercase, digit, and
//! special character. Hashes are salted SHA-256 in the form
//! `v1$<salt_hex>$<digest_hex>`; the scheme is versioned so it can be
//! swapped without invalidating stored hashes.

use sha2::{Digest, Sha256};

/// Minimum password length accepted at registration.
pub const MIN_LENGTH: usize = 10;

/// True when the password satisfies the registration policy.
pub fn is_valid_password(password: &str) -> bool {
    if password.chars().count() < MIN_LENGTH {
        return false;
    }
    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;
    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        }
        if c.is_lowercase() {
            has_lower = true;
        }
        if c.is_ascii_digit() {
            has_digit = true;
        }
        if !c.is_alphanumeric() {
            has_special = true;
        }
    }
    has_upper && has_lower && has_digit && has_special
}

/// Strength score 0-5 for the frontend meter: length milestones at 10/12/16
/// plus one point per character class, capped at 5.
pub fn password_strength(password: &str) -> u8 {
    let mut strength = 0u8;
    let len = password.chars().count();
    if len >= 10 {
        strength += 1;
    }
    if len >= 12 {
        strength += 1;
    }
    if len >= 16 {
        strength += 1;
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;
    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        }
        if c.is_lowercase() {
            has_lower = true;
        }
        if c.is_ascii_digit() {
            has_digit = true;
        }
        if !c.is_alphanumeric() {
            has_special = true;
        }
    }
    strength += [has_upper, has_lower, has_digit, has_special]
        .iter()
        .filter(|&&b| b)
        .count() as u8;

    strength.min(5)
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    // getrandom only fails if the OS entropy source is broken.
    getrandom::getrandom(&mut salt).expect("OS RNG unavailable");
    let salt_hex = hex(&salt);
    format!("v1${}${}", salt_hex, digest_hex(&salt_hex, password))
}

/// Constant-shape verification against a stored `v1$salt$digest` hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some("v1"), Some(salt_hex), Some(digest)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    digest_hex(salt_hex, password) == digest
}

fn digest_hex(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    hex(&hasher.finalize())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
