use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordError;
use crate::user::errors::RoleError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// `password_hash` always holds a salted hash, never the submitted plaintext.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Name,
    pub email: EmailAddress,
    pub password_hash: String,
    pub birth_at: Option<NaiveDate>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User fields ready to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: Name,
    pub email: EmailAddress,
    pub password_hash: String,
    pub birth_at: Option<NaiveDate>,
    pub role: Role,
}

/// User unique identifier type.
///
/// Always a positive number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a numeric id.
    ///
    /// # Errors
    /// * `NotPositive` - Id is zero or negative
    pub fn new(id: i64) -> Result<Self, UserIdError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(UserIdError::NotPositive(id))
        }
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a number
    /// * `NotPositive` - Number is zero or negative
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| UserIdError::InvalidFormat(s.to_string()))?;
        Self::new(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    const MAX_LENGTH: usize = 100;

    /// Create a validated name; surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - Longer than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the password policy.
///
/// Only lives long enough to be hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Numeric code used in storage and in the HTTP API.
    pub fn code(&self) -> i32 {
        match self {
            Role::User => 1,
            Role::Admin => 2,
        }
    }

    /// # Errors
    /// * `Unknown` - No role has this code
    pub fn from_code(code: i32) -> Result<Self, RoleError> {
        match code {
            1 => Ok(Role::User),
            2 => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other)),
        }
    }
}

/// Parse a birth date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, UserError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| UserError::InvalidBirthDate(raw.to_string()))
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: Name,
    pub email: EmailAddress,
    pub password: Password,
    pub birth_at: Option<NaiveDate>,
    pub role: Option<Role>,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// The password is hashed by the service; role defaults to `User`.
    pub fn new(name: Name, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
            birth_at: None,
            role: None,
        }
    }

    pub fn with_birth_date(mut self, birth_at: Option<NaiveDate>) -> Self {
        self.birth_at = birth_at;
        self
    }

    pub fn with_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }
}

/// Command to replace every writable field of a user.
///
/// Absent birth date is cleared, absent role resets to `User`.
#[derive(Debug)]
pub struct ReplaceUserCommand {
    pub name: Name,
    pub email: EmailAddress,
    pub password: Password,
    pub birth_at: Option<NaiveDate>,
    pub role: Option<Role>,
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub name: Option<Name>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub birth_at: Option<NaiveDate>,
    pub role: Option<Role>,
}
