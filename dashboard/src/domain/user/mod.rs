//! Directory user data model.
//!
//! Users are validated on the way in: every constructor either yields a
//! record satisfying the invariants below or a [`UserValidationError`] naming
//! the offending field. Raw form input arrives as a [`UserDraft`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised while building users from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier carried surrounding whitespace.
    #[error("user id must not contain surrounding whitespace")]
    InvalidId,
    /// The name was empty once trimmed.
    #[error("Name is required")]
    EmptyName,
    /// The email was empty once trimmed.
    #[error("Email is required")]
    EmptyEmail,
    /// The email did not look like `local@domain.tld`.
    #[error("Invalid email address")]
    InvalidEmail,
    /// No role was selected.
    #[error("Role is required")]
    MissingRole,
    /// The role is not one of the permitted values.
    #[error("unknown role: {value}")]
    UnknownRole {
        /// The rejected input.
        value: String,
    },
    /// No status was selected.
    #[error("Status is required")]
    MissingStatus,
    /// The status is not one of the permitted values.
    #[error("unknown status: {value}")]
    UnknownStatus {
        /// The rejected input.
        value: String,
    },
}

impl UserValidationError {
    /// Stable form field name the error should be reported next to.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::UserValidationError;
    ///
    /// assert_eq!(UserValidationError::InvalidEmail.field(), "email");
    /// ```
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::MissingRole | Self::UnknownRole { .. } => "role",
            Self::MissingStatus | Self::UnknownStatus { .. } => "status",
        }
    }
}

/// Stable user identifier.
///
/// Freshly created users receive a random UUID; seeded users may carry any
/// non-empty identifier (the bundled example data uses `"1"` to `"5"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyId`] or
    /// [`UserValidationError::InvalidId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.into())
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Person name shown in the directory table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyName`] when the input is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = name.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Contact email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyEmail`] for blank input and
    /// [`UserValidationError::InvalidEmail`] when the shape is wrong.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = email.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&raw) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Access level granted to a user.
///
/// # Examples
///
/// ```
/// use dashboard::domain::Role;
///
/// let role: Role = "editor".parse().expect("known role");
/// assert_eq!(role, Role::Editor);
/// assert_eq!(role.as_str(), "editor");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// May edit content.
    Editor,
    /// Regular account.
    User,
}

impl Role {
    /// Every permitted role, in form display order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::User, Self::Editor];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(UserValidationError::MissingRole),
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "user" => Ok(Self::User),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Whether the account is currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Account is enabled.
    Active,
    /// Account is disabled.
    Inactive,
}

impl Status {
    /// Every permitted status.
    pub const ALL: [Self; 2] = [Self::Active, Self::Inactive];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(UserValidationError::MissingStatus),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UserValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validated, editable user fields. Everything but the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    /// Person name.
    pub name: UserName,
    /// Contact email.
    pub email: EmailAddress,
    /// Access level.
    pub role: Role,
    /// Account status.
    pub status: Status,
}

/// Unvalidated form submission for adding or editing a user.
///
/// Fields stay as raw strings so missing selections can be reported back to
/// the form rather than rejected by the type system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Submitted name.
    pub name: String,
    /// Submitted email.
    pub email: String,
    /// Submitted role name.
    pub role: String,
    /// Submitted status name.
    pub status: String,
}

impl UserDraft {
    /// Build a draft from borrowed form values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
            status: status.into(),
        }
    }

    /// Validate every field, reporting the first failure in form order.
    ///
    /// # Errors
    ///
    /// Returns the [`UserValidationError`] for the first invalid field.
    pub fn validate(&self) -> Result<UserFields, UserValidationError> {
        Ok(UserFields {
            name: UserName::new(self.name.as_str())?,
            email: EmailAddress::new(self.email.as_str())?,
            role: self.role.parse()?,
            status: self.status.parse()?,
        })
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self::new(
            user.name.as_ref(),
            user.email.as_ref(),
            user.role.as_str(),
            user.status.as_str(),
        )
    }
}

/// Directory user.
///
/// ## Invariants
/// - `id` is non-empty and never changes after creation.
/// - `name` is non-empty once trimmed; `email` is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    role: Role,
    status: Status,
}

impl User {
    /// Build a user from an identifier and validated fields.
    #[must_use]
    pub fn new(id: UserId, fields: UserFields) -> Self {
        let UserFields {
            name,
            email,
            role,
            status,
        } = fields;
        Self {
            id,
            name,
            email,
            role,
            status,
        }
    }

    /// Fallible constructor from raw strings.
    ///
    /// # Errors
    ///
    /// Returns the first [`UserValidationError`] encountered.
    pub fn try_from_strings(
        id: impl Into<String>,
        draft: &UserDraft,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, draft.validate()?))
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Person name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Contact email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Access level.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Account status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Replace every editable field, keeping the identifier.
    pub(crate) fn replace_fields(&mut self, fields: UserFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.role = fields.role;
        self.status = fields.status;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    email: String,
    role: String,
    status: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
            status,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.as_str().to_owned(),
            status: status.as_str().to_owned(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let draft = UserDraft::new(value.name, value.email, value.role, value.status);
        Self::try_from_strings(value.id, &draft)
    }
}
