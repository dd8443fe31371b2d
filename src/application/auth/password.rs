//! Salted, iterated HMAC-SHA256 password hashes.
//!
//! Stored as `v1$<iterations>$<salt hex>$<hash hex>`.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "v1";
const SALT_LEN: usize = 16;

/// Rounds used for new hashes.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// MAC for the final round, keyed by the password.
fn derive(password: &[u8], salt: &[u8], iterations: u32) -> Option<HmacSha256> {
    let mut block = salt.to_vec();
    for _ in 1..iterations.max(1) {
        let mut mac = HmacSha256::new_from_slice(password).ok()?;
        mac.update(&block);
        block = mac.finalize().into_bytes().to_vec();
    }
    let mut mac = HmacSha256::new_from_slice(password).ok()?;
    mac.update(&block);
    Some(mac)
}

/// Hash `password` with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    hash_with(password, DEFAULT_ITERATIONS)
}

pub(crate) fn hash_with(password: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = derive(password.as_bytes(), &salt, iterations)
        .map(|mac| hex::encode(mac.finalize().into_bytes()))
        .unwrap_or_default();
    format!("{SCHEME}${iterations}${}${digest}", hex::encode(salt))
}

/// Check `password` against a stored hash in constant time.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(digest), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    let (Ok(iterations), Ok(salt), Ok(digest)) =
        (iterations.parse::<u32>(), hex::decode(salt), hex::decode(digest))
    else {
        return false;
    };
    derive(password.as_bytes(), &salt, iterations)
        .is_some_and(|mac| mac.verify_slice(&digest).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let stored = hash_with("correct horse", 50);
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("wrong horse", &stored));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_with("pw123456", 5), hash_with("pw123456", 5));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        for stored in ["", "v1$10$zz$00", "v0$1$00$00", "v1$1$00$00$extra", "plain"] {
            assert!(!verify_password("anything", stored), "{stored}");
        }
    }
}
