//! Search, filter, and sort selections for directory projections.

use std::cmp::Reverse;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::user::{Role, Status, User};

/// Column a projection is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Person name.
    #[default]
    Name,
    /// Contact email.
    Email,
    /// Role wire name.
    Role,
}

impl SortField {
    fn key(self, user: &User) -> String {
        match self {
            Self::Name => user.name().as_ref().to_lowercase(),
            Self::Email => user.email().as_ref().to_lowercase(),
            Self::Role => user.role().as_str().to_owned(),
        }
    }
}

impl FromStr for SortField {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "role" => Ok(Self::Role),
            _ => Err(UnknownSelection {
                kind: "sort field",
                input: s.to_owned(),
            }),
        }
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// A to Z.
    #[default]
    Ascending,
    /// Z to A.
    Descending,
}

impl FromStr for SortDirection {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(UnknownSelection {
                kind: "sort direction",
                input: s.to_owned(),
            }),
        }
    }
}

/// Error returned when a sort selection string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {input}")]
pub struct UnknownSelection {
    /// Which selection was being parsed.
    pub kind: &'static str,
    /// The unrecognised input value.
    pub input: String,
}

/// Projection parameters for [`super::DirectoryStore::query`].
///
/// The default selects every user ordered by name, ascending.
///
/// # Examples
///
/// ```
/// use dashboard::domain::{Role, SortDirection, SortField, UserQuery};
///
/// let query = UserQuery::default()
///     .search("smith")
///     .role(Role::User)
///     .sort(SortField::Email, SortDirection::Descending);
/// assert_eq!(query.search, "smith");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Case-insensitive substring matched against name or email.
    pub search: String,
    /// Exact role filter.
    pub role: Option<Role>,
    /// Exact status filter.
    pub status: Option<Status>,
    /// Ordering column.
    pub sort_field: SortField,
    /// Ordering direction.
    pub sort_direction: SortDirection,
}

impl UserQuery {
    /// Match `term` against names and emails.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Keep only users with `role`.
    #[must_use]
    pub const fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Keep only users with `status`.
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Order by `field` in `direction`.
    #[must_use]
    pub const fn sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    pub(super) fn matches(&self, user: &User, needle: &str) -> bool {
        let text_hit = needle.is_empty()
            || user.name().as_ref().to_lowercase().contains(needle)
            || user.email().as_ref().to_lowercase().contains(needle);
        text_hit
            && self.role.is_none_or(|role| user.role() == role)
            && self.status.is_none_or(|status| user.status() == status)
    }

    /// Stable ordering: ties keep collection order in both directions.
    pub(super) fn order(&self, users: &mut [User]) {
        let field = self.sort_field;
        match self.sort_direction {
            SortDirection::Ascending => users.sort_by_cached_key(|user| field.key(user)),
            SortDirection::Descending => users.sort_by_cached_key(|user| Reverse(field.key(user))),
        }
    }
}
