//! Command-line surface over the dashboard core.
//!
//! Argument definitions and command execution live in the library so the
//! behaviour can be tested without spawning a process. The binary only
//! loads settings, installs logging, and hands stdout to [`execute`].

mod error;

use std::io::Write;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

pub use self::error::{CliError, ToggleError};
use crate::domain::ports::PreferencesRepository;
use crate::domain::{
    ActivityEntry, ActivityLog, ActivityQuery, DashboardService, NotificationKind,
    PasswordStrength, PreferencesService, Role, SortDirection, SortField, Status, UserId,
    UserQuery, UserValidationError,
};
use crate::example_data::SeedDocument;
use crate::outbound::JsonFilePreferencesRepository;

/// Top-level command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dashboard",
    version,
    about = "Inspect the admin dashboard's users, activity, and settings"
)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Dashboard subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List users matching a query as JSON.
    Users(QueryArgs),
    /// Export users matching a query as CSV.
    Export(QueryArgs),
    /// Print the activity feed, newest first.
    Activity(ActivityArgs),
    /// Print headline counts and recent activity as JSON.
    Summary,
    /// Score a candidate password.
    Strength {
        /// Password to score.
        password: String,
    },
    /// Show stored preferences, applying any toggles first.
    Prefs(PrefsArgs),
}

/// Search, filter, and sort flags shared by `users` and `export`.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Case-insensitive substring of the name or email.
    #[arg(long, default_value = "")]
    pub search: String,
    /// Only users with this role.
    #[arg(long)]
    pub role: Option<Role>,
    /// Only users with this status.
    #[arg(long)]
    pub status: Option<Status>,
    /// Sort key: name, email, or role.
    #[arg(long, default_value = "name")]
    pub sort: SortField,
    /// Sort direction: asc or desc.
    #[arg(long, default_value = "asc")]
    pub direction: SortDirection,
}

impl QueryArgs {
    /// Directory query described by these flags.
    #[must_use]
    pub fn to_query(&self) -> UserQuery {
        UserQuery {
            search: self.search.clone(),
            role: self.role,
            status: self.status,
            sort_field: self.sort,
            sort_direction: self.direction,
        }
    }
}

/// Flags for the `activity` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ActivityArgs {
    /// Only entries about this user id.
    #[arg(long, value_parser = parse_user_id)]
    pub user: Option<UserId>,
    /// At most this many entries.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Flags for the `prefs` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PrefsArgs {
    /// Turn dark mode on or off.
    #[arg(long)]
    pub dark_mode: Option<bool>,
    /// Switch a notification kind, as `KIND=BOOL`. Repeatable.
    #[arg(long = "notification", value_name = "KIND=BOOL", value_parser = parse_toggle)]
    pub notifications: Vec<(NotificationKind, bool)>,
}

fn parse_user_id(raw: &str) -> Result<UserId, UserValidationError> {
    UserId::new(raw)
}

/// Parse a `KIND=BOOL` notification toggle.
///
/// # Errors
///
/// Returns [`ToggleError`] when the separator is missing, the kind is
/// unknown, or the value is not `true` or `false`.
///
/// # Examples
///
/// ```
/// use dashboard::cli::parse_toggle;
/// use dashboard::domain::NotificationKind;
///
/// let toggle = parse_toggle("push=false").expect("valid toggle");
/// assert_eq!(toggle, (NotificationKind::Push, false));
/// ```
pub fn parse_toggle(raw: &str) -> Result<(NotificationKind, bool), ToggleError> {
    let (kind, value) = raw
        .split_once('=')
        .ok_or_else(|| ToggleError::MissingSeparator {
            input: raw.to_owned(),
        })?;
    let parsed_kind = kind.trim().parse::<NotificationKind>()?;
    let enabled = value
        .trim()
        .parse::<bool>()
        .map_err(|_| ToggleError::Value {
            input: value.to_owned(),
        })?;
    Ok((parsed_kind, enabled))
}

/// Load the seed at `path`, or the bundled seed when no path is configured.
///
/// # Errors
///
/// Returns [`CliError`] when the path is unusable or the document is invalid.
pub fn load_seed(path: Option<&Path>) -> Result<SeedDocument, CliError> {
    let Some(raw) = path else {
        debug!("using bundled seed");
        return Ok(SeedDocument::builtin()?);
    };
    let (dir, file_name) = open_parent(raw)?;
    Ok(SeedDocument::from_file(&dir, &file_name)?)
}

/// Open the preferences file adapter for `path`.
///
/// The parent directory must exist; the file itself is created on first save.
///
/// # Errors
///
/// Returns [`CliError`] when the path is unusable or its directory cannot be
/// opened.
pub fn open_preferences(path: &Path) -> Result<JsonFilePreferencesRepository, CliError> {
    let (dir, file_name) = open_parent(path)?;
    Ok(JsonFilePreferencesRepository::new(dir, file_name))
}

fn open_parent(path: &Path) -> Result<(Dir, Utf8PathBuf), CliError> {
    let utf8 = Utf8Path::from_path(path).ok_or_else(|| CliError::NonUtf8Path {
        path: path.to_path_buf(),
    })?;
    let file_name = utf8.file_name().ok_or_else(|| CliError::MissingFileName {
        path: utf8.to_path_buf(),
    })?;
    let parent = utf8
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        CliError::OpenDirectory {
            path: parent.to_path_buf(),
            source,
        }
    })?;
    Ok((dir, Utf8PathBuf::from(file_name)))
}

/// Run `command` against `service`, writing results to `out`.
///
/// `open_repository` is only called by the `prefs` command, so other
/// commands never touch the preferences file. `now` anchors relative times
/// in the activity feed.
///
/// # Errors
///
/// Returns [`CliError`] when preferences cannot be loaded or saved, or when
/// output cannot be written.
pub fn execute<R, F>(
    command: &Command,
    service: &DashboardService<ActivityLog>,
    open_repository: F,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: PreferencesRepository,
    F: FnOnce() -> Result<R, CliError>,
{
    match command {
        Command::Users(args) => write_json(out, &service.query_users(&args.to_query())),
        Command::Export(args) => {
            writeln!(out, "{}", service.export_users(&args.to_query()))?;
            Ok(())
        }
        Command::Activity(args) => {
            let entries = select_activity(service, args);
            for entry in &entries {
                writeln!(out, "{}", activity_line(entry, now))?;
            }
            Ok(())
        }
        Command::Summary => write_json(out, &service.summary()),
        Command::Strength { password } => {
            let strength = PasswordStrength::evaluate(password);
            writeln!(out, "{}/4 {}", strength.score(), strength.label())?;
            Ok(())
        }
        Command::Prefs(args) => {
            let mut preferences = PreferencesService::load(open_repository()?)?;
            if let Some(enabled) = args.dark_mode {
                preferences.set_dark_mode(enabled)?;
            }
            for &(kind, enabled) in &args.notifications {
                preferences.set_notification(kind, enabled)?;
            }
            write_json(out, preferences.current())
        }
    }
}

fn select_activity(
    service: &DashboardService<ActivityLog>,
    args: &ActivityArgs,
) -> Vec<ActivityEntry> {
    match (&args.user, args.limit) {
        (Some(user), None) => service.user_activity(user),
        (user, limit) => service.activity(&ActivityQuery {
            user_id: user.clone(),
            limit,
        }),
    }
}

/// One feed line: relative time, severity, action, and description.
///
/// # Examples
///
/// ```
/// use dashboard::cli::activity_line;
/// use dashboard::domain::{ActionType, ActivityLog, NewActivity, Severity};
/// use mockable::DefaultClock;
/// use std::sync::Arc;
///
/// let mut log = ActivityLog::new(Arc::new(DefaultClock));
/// let entry = log.append(NewActivity::new(
///     ActionType::Login,
///     Severity::Info,
///     "User Login",
///     "hello",
/// ));
/// assert_eq!(
///     activity_line(&entry, entry.timestamp()),
///     "Just now [info] User Login: hello"
/// );
/// ```
#[must_use]
pub fn activity_line(entry: &ActivityEntry, now: DateTime<Utc>) -> String {
    format!(
        "{} [{}] {}: {}",
        entry.time_ago(now),
        entry.severity(),
        entry.action(),
        entry.description()
    )
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
