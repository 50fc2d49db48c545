use std::fmt;
use std::sync::LazyLock;

use chrono::DateTime;
use chrono::Utc;
use regex::Regex;

use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9_-]+(\.[a-zA-Z]+)+$").expect("email pattern compiles")
});

/// User aggregate entity.
///
/// Represents a registered user
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// A user that has passed validation and hashing but has no identifier yet.
///
/// The repository assigns the id when the record is stored.
#[derive(Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Attach the store-assigned identifier.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl UserId {
    /// Parse a user ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<u64>() {
            Ok(0) => Err(UserIdError::InvalidFormat(s.to_string())),
            Ok(id) => Ok(Self(id)),
            Err(_) => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Create a new valid name.
    ///
    /// # Errors
    /// * `InvalidName` - Name is empty
    pub fn new(name: String) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::InvalidName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Accepts `local@domain.tld` shapes: ASCII letters, digits and `._-` in the
/// local part, and a domain with at least one alphabetic dot-segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidEmail` - Email does not match the accepted shape
    pub fn new(email: String) -> Result<Self, ValidationError> {
        if !EMAIL_PATTERN.is_match(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that satisfies the strength rules.
///
/// Only lives long enough to be hashed; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const SPECIAL_CHARACTERS: &'static str = "-._!\"`´'#%&,:;<>=@{}~$()*+/\\?[]^|";

    /// Validate a plaintext password.
    ///
    /// Rules are checked in order and the first one that fails is returned:
    /// length, lowercase, uppercase, digit, special character.
    ///
    /// # Errors
    /// * `TooShort` - Shorter than 6 bytes
    /// * `MissingLowercase` - No ASCII lowercase letter
    /// * `MissingUppercase` - No ASCII uppercase letter
    /// * `MissingDigit` - No ASCII digit
    /// * `MissingSpecialChar` - None of the accepted special characters
    pub fn new(password: String) -> Result<Self, ValidationError> {
        if password.len() < Self::MIN_LENGTH {
            return Err(ValidationError::TooShort);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::MissingDigit);
        }
        if !password
            .chars()
            .any(|c| Self::SPECIAL_CHARACTERS.contains(c))
        {
            return Err(ValidationError::MissingSpecialChar);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Password,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `name` - Validated name
    /// * `email` - Validated email address
    /// * `password` - Validated plaintext password (will be hashed by service)
    pub fn new(name: UserName, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to replace a user's password.
#[derive(Debug)]
pub struct UpdatePasswordCommand {
    pub password: Password,
}
