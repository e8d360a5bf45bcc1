//! Argon2 password hashing.
//!
//! The only place that knows the hashing parameters; services hand in plain
//! text and get back the PHC string stored in `users.password`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// A salted password hash in PHC format.
#[derive(Clone)]
pub struct Password(String);

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl Password {
    /// Hash `plain_text` with a fresh salt.
    ///
    /// Fails on the `password` field when shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if (plain_text.chars().count() as u64) < MIN_PASSWORD_LENGTH {
            return Err(AppError::field(
                "password",
                format!("A senha deve ter pelo menos {} caracteres", MIN_PASSWORD_LENGTH),
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self(phc))
    }

    /// Stored hash, as read back from `users.password`.
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// `false` for a wrong password and for a stored value that is not a
    /// parseable PHC string.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_the_original_password() {
        let password = Password::new("SenhaSegura123!").unwrap();

        assert!(password.verify("SenhaSegura123!"));
        assert!(!password.verify("SenhaErrada123"));
    }

    #[test]
    fn stored_hash_still_verifies() {
        let stored = Password::new("123456").unwrap().into_string();
        assert!(Password::from_hash(stored).verify("123456"));
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let first = Password::new("mesma-senha").unwrap();
        let second = Password::new("mesma-senha").unwrap();

        assert!(first.verify("mesma-senha"));
        assert!(second.verify("mesma-senha"));
        assert_ne!(first.into_string(), second.into_string());
    }

    #[test]
    fn length_is_counted_in_characters() {
        assert!(Password::new("çãéíõú").is_ok());
        match Password::new("12345") {
            Err(AppError::Validation(fields)) => assert!(fields.contains_key("password")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!Password::from_hash("not-a-phc-string".to_string()).verify("anything"));
    }

    #[test]
    fn debug_hides_the_hash() {
        let password = Password::new("segredo123").unwrap();
        assert_eq!(format!("{:?}", password), "Password([REDACTED])");
    }
}
