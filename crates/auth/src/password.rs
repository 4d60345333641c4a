//! Argon2 password hashing with random per-password salts.
//! Stored hashes are PHC strings, so parameters travel with the hash.

use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    let salt = SaltString::encode_b64(bytes)?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify(password: &str, hashword: &str) -> bool {
    match PasswordHash::new(hashword) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_own_password() {
        let hashword = hash("correct horse battery").unwrap();
        assert!(verify("correct horse battery", &hashword));
        assert!(!verify("correct horse", &hashword));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = hash("correct horse battery").unwrap();
        let second = hash("correct horse battery").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify("anything", "not-a-phc-string"));
    }
}
