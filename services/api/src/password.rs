//! Credential hashing with Argon2id

use std::sync::{Arc, OnceLock};

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use thiserror::Error;

/// Errors raised while hashing a password
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The configured Argon2 parameters are out of range
    #[error("Invalid hasher parameters: {0}")]
    Params(String),

    /// Hashing itself failed
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy)]
pub struct Argon2Params {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Plaintext behind the stand-in hash checked for unknown accounts
const DUMMY_PASSWORD: &str = "mygram-dummy-password";

/// One-way password hasher
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Argon2Params,
    dummy_hash: Arc<OnceLock<Option<String>>>,
}

impl CredentialHasher {
    /// Create a hasher with the given cost parameters
    pub fn new(params: Argon2Params) -> Self {
        Self {
            params,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            None,
        )
        .map_err(|e| PasswordError::Params(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a plaintext password into a salted PHC string
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed hash verifies as `false`. The cost parameters embedded in
    /// the hash are used, not the hasher's own.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Check a plaintext password against a stored hash that may not exist.
    ///
    /// With no stored hash the password is checked against a stand-in hash
    /// built with this hasher's parameters, so a missing account costs the
    /// same as a wrong password. The result is then always `false`.
    pub fn verify_stored(&self, plaintext: &str, hash: Option<&str>) -> bool {
        match hash {
            Some(hash) => self.verify(plaintext, hash),
            None => {
                if let Some(dummy) = self.dummy_hash() {
                    self.verify(plaintext, dummy);
                }
                false
            }
        }
    }

    fn dummy_hash(&self) -> Option<&str> {
        self.dummy_hash
            .get_or_init(|| self.hash(DUMMY_PASSWORD).ok())
            .as_deref()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(Argon2Params::default())
    }
}

#[cfg(test)]
impl CredentialHasher {
    /// Whether a stand-in hash has been built for a missing account
    pub(crate) fn ran_dummy_check(&self) -> bool {
        self.dummy_hash.get().is_some()
    }
}

#[cfg(test)]
pub(crate) fn fast_hasher() -> CredentialHasher {
    CredentialHasher::new(Argon2Params {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
}
