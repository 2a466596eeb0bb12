//! Salted password digests for driver accounts.

use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;

/// Stored password digest: a random salt and `SHA-256(salt || password)`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl PasswordHash {
    /// Digest `password` under a fresh random salt.
    pub fn derive(password: &str) -> Self {
        let salt: [u8; SALT_LEN] = rand::random();
        Self::with_salt(password, salt.to_vec())
    }

    fn with_salt(password: &str, salt: Vec<u8>) -> Self {
        let digest = Sha256::new()
            .chain_update(&salt)
            .chain_update(password.as_bytes())
            .finalize()
            .to_vec();
        Self { salt, digest }
    }

    /// Whether `candidate` produces the stored digest.
    ///
    /// The digests are compared in constant time.
    pub fn verify(&self, candidate: &str) -> bool {
        let other = Self::with_salt(candidate, self.salt.clone());
        self.digest.as_slice().ct_eq(other.digest.as_slice()).into()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
