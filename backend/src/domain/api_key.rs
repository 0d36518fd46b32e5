//! Shared-secret API key verification.
//!
//! Only the SHA-256 digest of the key is configured; incoming keys are hashed
//! and compared in constant time.

use sha2::{Digest, Sha256};

const DIGEST_LEN: usize = 32;

/// Errors raised when parsing a configured digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiKeyHashError {
    /// The digest is not 64 hex characters long.
    #[error("API key hash must be {expected} hex characters, got {actual}")]
    InvalidLength {
        /// Required number of hex characters.
        expected: usize,
        /// Number of characters supplied.
        actual: usize,
    },
    /// The digest contains non-hex characters.
    #[error("API key hash must be hexadecimal")]
    InvalidHex,
}

/// SHA-256 digest of the accepted API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyHash([u8; DIGEST_LEN]);

impl ApiKeyHash {
    /// Parse a hex-encoded digest.
    ///
    /// # Examples
    /// ```
    /// use riverwq::domain::ApiKeyHash;
    ///
    /// // sha256("secret")
    /// let hash = ApiKeyHash::from_hex(
    ///     "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b",
    /// )
    /// .expect("valid digest");
    /// assert!(hash.verify("secret"));
    /// assert!(!hash.verify("Secret"));
    /// ```
    pub fn from_hex(hex_digest: &str) -> Result<Self, ApiKeyHashError> {
        let trimmed = hex_digest.trim();
        if trimmed.len() != DIGEST_LEN * 2 {
            return Err(ApiKeyHashError::InvalidLength {
                expected: DIGEST_LEN * 2,
                actual: trimmed.len(),
            });
        }
        let mut digest = [0_u8; DIGEST_LEN];
        hex::decode_to_slice(trimmed, &mut digest).map_err(|_| ApiKeyHashError::InvalidHex)?;
        Ok(Self(digest))
    }

    /// Digest of a plaintext key.
    #[must_use]
    pub fn of_key(key: &str) -> Self {
        Self(Sha256::digest(key.as_bytes()).into())
    }

    /// Whether `candidate` hashes to the configured digest.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let digest = Sha256::digest(candidate.as_bytes());
        constant_time_eq(digest.as_slice(), &self.0)
    }
}

impl std::fmt::Debug for ApiKeyHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKeyHash(<redacted>)")
    }
}

/// Compare byte slices without short-circuiting on the first mismatch.
pub(crate) fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0_u8, |acc, (l, r)| acc | (l ^ r))
        == 0
}
