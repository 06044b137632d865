//! Password hashing (argon2)

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher};

use crate::utils::AppError;

/// Hash a registration password with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    #[test]
    fn hash_verifies_and_salts_differ() {
        let h1 = hash_password("geheim123").unwrap();
        let h2 = hash_password("geheim123").unwrap();
        assert_ne!(h1, h2);

        let parsed = PasswordHash::new(&h1).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"geheim123", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"falsch", &parsed)
                .is_err()
        );
    }
}
