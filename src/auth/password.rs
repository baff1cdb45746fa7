use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
#[cfg(test)]
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};

/// Produces a PHC-format argon2 hash.
#[cfg(test)]
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_password(password: &str, hashed: &str) -> Result<(), argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let parsed = PasswordHash::new(hashed)?;

    argon2.verify_password(password.as_bytes(), &parsed)
}
