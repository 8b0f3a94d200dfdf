//! The static shared secret guarding privileged operations.

use sha2::{Digest, Sha256};
use std::fmt;

/// A configured password, held only as its SHA-256 digest.
///
/// Comparison hashes the candidate and folds the byte differences of the two digests, so the
/// time taken does not depend on where the candidate first differs.
#[derive(Clone)]
pub struct SharedSecret {
    digest: Vec<u8>,
}

impl SharedSecret {
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self { digest: Sha256::digest(secret.as_ref()).as_slice().to_vec() }
    }

    #[must_use]
    pub fn matches(&self, candidate: impl AsRef<[u8]>) -> bool {
        let candidate = Sha256::digest(candidate.as_ref());
        let candidate = candidate.as_slice();
        self.digest.len() == candidate.len()
            && self.digest.iter().zip(candidate).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_matching() {
        let secret = SharedSecret::new("zxczxc");
        assert!(secret.matches("zxczxc"));
        assert!(!secret.matches("zxczx"));
        assert!(!secret.matches(""));
        assert_eq!(format!("{secret:?}"), "SharedSecret { .. }");
    }
}
