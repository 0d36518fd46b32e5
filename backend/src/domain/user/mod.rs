//! Registered users.

use std::fmt;
use std::sync::OnceLock;

use rand::RngCore;
use regex::Regex;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::validation::{FieldError, FieldErrorCode, require_text};

/// A registered user as exposed to callers. The password hash never leaves
/// persistence through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Storage id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Unique address.
    pub email: Email,
}

/// Email address accepted for registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate a candidate address.
    ///
    /// # Examples
    /// ```
    /// use riverwq::domain::Email;
    ///
    /// assert!(Email::new("ana@example.org").is_ok());
    /// assert!(Email::new("ana.example.org").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, FieldError> {
        let candidate: String = email.into();
        if email_regex().is_match(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(FieldError::new("email", FieldErrorCode::InvalidEmail))
        }
    }

    /// The address as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Validated registration request. The plaintext password is wiped on drop.
#[derive(Clone)]
pub struct UserDraft {
    name: String,
    email: Email,
    password: Zeroizing<String>,
}

impl UserDraft {
    /// Validate a registration request: non-blank name, well-formed email and
    /// a non-empty password.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: Zeroizing<String>,
    ) -> Result<Self, FieldError> {
        let checked_name = require_text("nome", name.into())?;
        let checked_email = Email::new(email)?;
        if password.is_empty() {
            return Err(FieldError::new("senha", FieldErrorCode::Empty));
        }
        Ok(Self {
            name: checked_name,
            email: checked_email,
            password,
        })
    }

    /// Validated display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password; only the service reads it, to hash it.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Stored password digest in the form `sha256$<salt-hex>$<digest-hex>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

const SALT_LEN: usize = 16;
const SCHEME: &str = "sha256";

impl PasswordHash {
    /// Hash `password` under a fresh random salt.
    #[must_use]
    pub fn generate(password: &str) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(password, &salt)
    }

    fn with_salt(password: &str, salt: &[u8]) -> Self {
        let digest = salted_digest(password, salt);
        Self(format!("{SCHEME}${}${}", hex::encode(salt), hex::encode(digest)))
    }

    /// Check `password` against the stored digest.
    ///
    /// No login flow exists, so only tests compare passwords.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let mut parts = self.0.split('$');
        let (Some(SCHEME), Some(salt_hex), Some(digest_hex), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
            return false;
        };
        super::api_key::constant_time_eq(&salted_digest(password, &salt), &expected)
    }

    /// The encoded digest as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

fn salted_digest(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

/// Row handed to the repository when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Address; must not already be registered.
    pub email: Email,
    /// Salted digest of the password.
    pub password_hash: PasswordHash,
}
