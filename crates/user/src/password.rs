use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};

use crate::error::{UserError, UserResult};

/// Hash a password using Argon2id with OWASP-recommended parameters
/// - Memory: 65536 KB (64 MB)
/// - Iterations: 3
/// - Parallelism: 4
///
/// The server-side `pepper` is appended to the password before hashing, so a
/// leaked database alone is not enough to mount an offline attack.
pub fn hash_password(password: &str, pepper: &str) -> UserResult<String> {
    let params =
        Params::new(65536, 3, 4, None).map_err(|e| UserError::HashingError(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let salt = SaltString::generate(&mut OsRng);

    let peppered = format!("{password}{pepper}");
    let password_hash = argon2
        .hash_password(peppered.as_bytes(), &salt)
        .map_err(|e| UserError::HashingError(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password (with the same pepper) against an Argon2 hash.
pub fn verify_password(password: &str, pepper: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::HashingError(e.to_string()))?;

    let argon2 = Argon2::default();

    let peppered = format!("{password}{pepper}");
    match argon2.verify_password(peppered.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEPPER: &str = "test-pepper-value";

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("hunter22", PEPPER).unwrap();
        assert!(verify_password("hunter22", PEPPER, &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("hunter22", PEPPER).unwrap();
        assert!(!verify_password("hunter23", PEPPER, &hash).unwrap());
    }

    #[test]
    fn wrong_pepper_fails_verification() {
        let hash = hash_password("hunter22", PEPPER).unwrap();
        assert!(!verify_password("hunter22", "other-pepper", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("hunter22", PEPPER).unwrap();
        let b = hash_password("hunter22", PEPPER).unwrap();
        assert_ne!(a, b);
    }
}
