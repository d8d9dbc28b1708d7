use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use password_hash::{PasswordHash, PasswordHasher as _, SaltString};
use rand::rngs::OsRng;

use crate::SiteError;

/// Password hashing for admin accounts.
///
/// `verify` returns a plain `bool`: a stored hash that cannot be parsed is a
/// non-match, never an error the login flow has to branch on.
///
/// # Example
///
/// ```rust
/// use himma::crypto::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash("changeme123").unwrap();
/// assert!(hasher.verify("changeme123", &hash));
/// assert!(!hasher.verify("changeme124", &hash));
/// ```
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::PasswordHashError` if the parameters are rejected.
    fn hash(&self, password: &str) -> Result<String, SiteError>;

    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id hasher.
///
/// The PHC output embeds its own parameters, so hashes created with one
/// preset verify under any other.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    /// Memory cost in KiB
    memory_cost: u32,
    /// Number of passes
    time_cost: u32,
    parallelism: u32,
}

/// OWASP floor for Argon2id: 19 MiB, 2 passes.
const MIN_MEMORY_COST: u32 = 19_456;
const MIN_TIME_COST: u32 = 2;

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_cost: MIN_MEMORY_COST,
            time_cost: MIN_TIME_COST,
            parallelism: 1,
        }
    }
}

impl Argon2Hasher {
    /// Custom parameters, raised to the OWASP floor when set below it.
    #[must_use]
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost: memory_cost.max(MIN_MEMORY_COST),
            time_cost: time_cost.max(MIN_TIME_COST),
            parallelism: parallelism.max(1),
        }
    }

    /// 64 MiB, 3 passes, 4 lanes.
    #[must_use]
    pub fn production() -> Self {
        Self {
            memory_cost: 65_536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, SiteError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| SiteError::PasswordHashError)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| SiteError::PasswordHashError)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            log::debug!(target: "himma::crypto", "msg=\"stored password hash is malformed\"");
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hashes with the default [`Argon2Hasher`].
///
/// # Errors
///
/// Returns `SiteError::PasswordHashError` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, SiteError> {
    Argon2Hasher::default().hash(password)
}

/// Verifies with the default [`Argon2Hasher`]. Malformed hashes are a non-match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    Argon2Hasher::default().verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("changeme123").unwrap();
        assert!(verify_password("changeme123", &hash));
        assert!(!verify_password("changeme12", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let h1 = hash_password("same").unwrap();
        let h2 = hash_password("same").unwrap();
        assert_ne!(h1, h2);
        assert!(h1.starts_with("$argon2id$"));
    }

    #[test]
    fn test_malformed_hash_is_non_match() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "$2a$10$legacybcrypthashvalue"));
    }

    #[test]
    fn test_new_clamps_to_floor() {
        let hasher = Argon2Hasher::new(8, 1, 0);
        assert_eq!(hasher.memory_cost, MIN_MEMORY_COST);
        assert_eq!(hasher.time_cost, MIN_TIME_COST);
        assert_eq!(hasher.parallelism, 1);
    }

    #[test]
    fn test_presets_cross_verify() {
        let hash = Argon2Hasher::production().hash("pw-for-admin").unwrap();
        assert!(Argon2Hasher::default().verify("pw-for-admin", &hash));
    }
}
