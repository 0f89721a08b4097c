//! CSV export of a directory projection.

use crate::domain::user::User;

const HEADER: &str = "Name,Email,Role,Status";

/// Render `users` as CSV, one row per record in the given order.
///
/// Rows are joined by `\n` with no trailing newline. Fields containing a
/// comma, quote, or line break are quoted with inner quotes doubled.
///
/// # Examples
///
/// ```
/// use dashboard::domain::{User, UserDraft, export_csv};
///
/// let draft = UserDraft::new("Ann", "ann@x.com", "user", "active");
/// let ann = User::try_from_strings("1", &draft).expect("valid user");
///
/// assert_eq!(export_csv(&[ann]), "Name,Email,Role,Status\nAnn,ann@x.com,user,active");
/// ```
#[must_use]
pub fn export_csv(users: &[User]) -> String {
    let rows = users.iter().map(|user| {
        [
            user.name().as_ref(),
            user.email().as_ref(),
            user.role().as_str(),
            user.status().as_str(),
        ]
        .map(escape_field)
        .join(",")
    });
    std::iter::once(HEADER.to_owned())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
