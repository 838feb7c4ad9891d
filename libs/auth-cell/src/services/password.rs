// libs/auth-cell/src/services/password.rs
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::instrument;

pub struct PasswordService;

impl PasswordService {
    /// PHC-format argon2id hash with a fresh salt.
    #[instrument(skip(password))]
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    #[instrument(skip(password, hash))]
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = PasswordService::hash_password("p1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(PasswordService::verify_password("p1", &hash).unwrap());
        assert!(!PasswordService::verify_password("p2", &hash).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = PasswordService::hash_password("same").unwrap();
        let b = PasswordService::hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(PasswordService::verify_password("p1", "not-a-phc-string").is_err());
    }
}
