//! Registration submissions and the rules they must satisfy.
//!
//! Inbound adapters hand raw strings to [`Registration::try_from_parts`]; only
//! a validated [`Registration`] reaches the registration use-case. Values are
//! taken verbatim: nothing is trimmed, so a whitespace-only name counts as
//! present.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Form fields accepted by the registration form, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    /// Registrant's name.
    Name,
    /// Email address, also the record identifier.
    Email,
    /// Plaintext password.
    Password,
}

impl RegistrationField {
    /// Form field name as submitted by the browser.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Domain error returned when a submission fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// A field was absent or empty. Carries the first offending field.
    MissingField(RegistrationField),
    /// The email does not look like `local@domain.tld`.
    InvalidEmail,
    /// The password is too short or lacks an uppercase letter or a digit.
    InvalidPassword,
}

impl RegistrationValidationError {
    /// Field the error refers to.
    pub fn field(self) -> RegistrationField {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidEmail => RegistrationField::Email,
            Self::InvalidPassword => RegistrationField::Password,
        }
    }

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPassword => "invalid_password",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(_) => write!(f, "All fields are required!"),
            Self::InvalidEmail => write!(f, "Invalid email format!"),
            Self::InvalidPassword => write!(
                f,
                "Incorrect password type! Password must be at least {PASSWORD_MIN_CHARS} \
                 characters long, contain at least one uppercase letter, and one number."
            ),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Registrant's name as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`].
    pub fn new(name: impl Into<String>) -> Result<Self, RegistrationValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistrationValidationError::MissingField(
                RegistrationField::Name,
            ));
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address; doubles as the record's document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use registration::domain::{EmailAddress, RegistrationValidationError};
    ///
    /// assert!(EmailAddress::new("bob@example.com").is_ok());
    /// assert_eq!(
    ///     EmailAddress::new("bob@example"),
    ///     Err(RegistrationValidationError::InvalidEmail)
    /// );
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, RegistrationValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(RegistrationValidationError::MissingField(
                RegistrationField::Email,
            ));
        }
        if !email_regex().is_match(&email) {
            return Err(RegistrationValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext password held only until it is hashed.
///
/// The buffer is zeroised on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    ///
    /// Requires at least [`PASSWORD_MIN_CHARS`] characters, one ASCII
    /// uppercase letter and one ASCII digit. Other characters are allowed.
    pub fn new(password: impl Into<String>) -> Result<Self, RegistrationValidationError> {
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(RegistrationValidationError::MissingField(
                RegistrationField::Password,
            ));
        }
        let long_enough = password.chars().count() >= PASSWORD_MIN_CHARS;
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !(long_enough && has_upper && has_digit) {
            return Err(RegistrationValidationError::InvalidPassword);
        }
        Ok(Self(password))
    }

    /// Plaintext for hashing. Do not log or persist the result.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated registration submission.
///
/// ## Invariants
/// - every field is non-empty;
/// - `email` matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`;
/// - `password` satisfies [`Password::new`].
///
/// # Examples
/// ```
/// use registration::domain::Registration;
///
/// let registration = Registration::try_from_parts("Ann", "ann@x.com", "Abc123").unwrap();
/// assert_eq!(registration.name().as_ref(), "Ann");
/// assert_eq!(registration.email().as_ref(), "ann@x.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: FullName,
    email: EmailAddress,
    password: Password,
}

impl Registration {
    /// Validate raw field values.
    ///
    /// Presence of all three fields is checked before any format check, so a
    /// submission with a missing name and a malformed email reports the
    /// missing field.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let missing = [
            (RegistrationField::Name, name),
            (RegistrationField::Email, email),
            (RegistrationField::Password, password),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty());
        if let Some((field, _)) = missing {
            return Err(RegistrationValidationError::MissingField(field));
        }

        Ok(Self {
            name: FullName::new(name)?,
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
        })
    }

    /// Registrant's name.
    pub fn name(&self) -> &FullName {
        &self.name
    }

    /// Registrant's email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Split into owned parts.
    pub fn into_parts(self) -> (FullName, EmailAddress, Password) {
        (self.name, self.email, self.password)
    }
}

/// One-way salted hash in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a password hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Record persisted in the `users` collection, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    name: FullName,
    email: EmailAddress,
    password_hash: PasswordHash,
}

impl UserRecord {
    /// Assemble a record ready for persistence.
    pub fn new(name: FullName, email: EmailAddress, password_hash: PasswordHash) -> Self {
        Self {
            name,
            email,
            password_hash,
        }
    }

    /// Registrant's name.
    pub fn name(&self) -> &FullName {
        &self.name
    }

    /// Document identifier.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    name: FullName,
    email: EmailAddress,
}

impl RegisteredUser {
    /// Registrant's name, used in the greeting.
    pub fn name(&self) -> &FullName {
        &self.name
    }

    /// Email the record was stored under.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

impl From<UserRecord> for RegisteredUser {
    fn from(record: UserRecord) -> Self {
        Self {
            name: record.name,
            email: record.email,
        }
    }
}
