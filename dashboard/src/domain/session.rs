//! Signed-in session, password change, and profile editing.
//!
//! Authentication is a stub: any non-empty credentials open a session for a
//! fixed administrator identity. Each successful operation yields the
//! activity entry the caller should record.

use serde::Serialize;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::activity::{ActionType, NewActivity, Severity};
use crate::domain::error::{PasswordRejection, SessionError};
use crate::domain::password_strength::{PASSWORD_MIN_LENGTH, PasswordStrength};
use crate::domain::user::{EmailAddress, Role, UserId, UserName};

/// Identifier of the stub administrator account.
pub const ADMIN_USER_ID: &str = "1";
/// Display name of the stub administrator account.
pub const ADMIN_USER_NAME: &str = "Admin User";

/// Validated login form values.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and wiped from memory on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingCredentials`] when either value is
    /// blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::try_from_parts(" admin@x.com ", "pw").expect("filled in");
    /// assert_eq!(creds.email(), "admin@x.com");
    /// assert!(LoginCredentials::try_from_parts("", "pw").is_err());
    /// ```
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, SessionError> {
        let normalized = email.trim();
        if normalized.is_empty() || password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Submitted email.
    #[must_use]
    pub const fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Submitted password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Password change form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    new: Zeroizing<String>,
    confirm: Zeroizing<String>,
}

impl PasswordChange {
    /// Capture the three form fields.
    #[must_use]
    pub fn new(current: &str, new: &str, confirm: &str) -> Self {
        Self {
            current: Zeroizing::new(current.to_owned()),
            new: Zeroizing::new(new.to_owned()),
            confirm: Zeroizing::new(confirm.to_owned()),
        }
    }

    /// Advisory strength of the new password.
    #[must_use]
    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::evaluate(self.new.as_str())
    }

    /// Check the form in field order.
    ///
    /// # Errors
    ///
    /// Returns the [`PasswordRejection`] for the first failing field.
    pub fn validate(&self) -> Result<(), PasswordRejection> {
        if self.current.is_empty() {
            return Err(PasswordRejection::MissingCurrent);
        }
        if self.new.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PasswordRejection::TooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        if self.confirm.as_str() != self.new.as_str() {
            return Err(PasswordRejection::Mismatch);
        }
        Ok(())
    }
}

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    id: UserId,
    name: UserName,
    email: String,
    role: Role,
}

impl SessionUser {
    /// Account identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Email entered at login or saved through the profile form.
    #[must_use]
    pub const fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Access level.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    fn activity(
        &self,
        action_type: ActionType,
        action: &str,
        description: &str,
    ) -> NewActivity {
        NewActivity::new(action_type, Severity::Info, action, description)
            .for_user(self.id.clone(), self.name.as_ref())
    }
}

/// Current sign-in state. Starts signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    /// Signed-in user, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Open a session for the administrator identity, replacing any
    /// existing one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Profile`] if the fixed identity cannot be
    /// built.
    pub fn login(&mut self, credentials: &LoginCredentials) -> Result<NewActivity, SessionError> {
        let user = SessionUser {
            id: UserId::new(ADMIN_USER_ID)?,
            name: UserName::new(ADMIN_USER_NAME)?,
            email: credentials.email().to_owned(),
            role: Role::Admin,
        };
        info!(user_id = %user.id, "session opened");
        let activity = user.activity(
            ActionType::Login,
            "User Login",
            "Admin user logged into the system",
        );
        self.user = Some(user);
        Ok(activity)
    }

    /// Close the session. Returns `None` when nobody was signed in.
    pub fn logout(&mut self) -> Option<NewActivity> {
        let user = self.user.take()?;
        info!(user_id = %user.id, "session closed");
        Some(user.activity(
            ActionType::Logout,
            "User Logout",
            "Admin user logged out of the system",
        ))
    }

    /// Validate a password change for the signed-in user.
    ///
    /// Strength is advisory and never blocks the change.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unauthenticated`] without a session and
    /// [`SessionError::Password`] when the form fails validation.
    pub fn change_password(&self, change: &PasswordChange) -> Result<NewActivity, SessionError> {
        let user = self.user.as_ref().ok_or(SessionError::Unauthenticated)?;
        change.validate().inspect_err(|rejection| {
            warn!(field = rejection.field(), "password change rejected");
        })?;
        info!(
            user_id = %user.id,
            strength = %change.strength().label(),
            "password changed"
        );
        Ok(user.activity(
            ActionType::PasswordChanged,
            "Password Changed",
            "Admin user changed their password",
        ))
    }

    /// Replace the signed-in user's name and email.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unauthenticated`] without a session and
    /// [`SessionError::Profile`] when a field fails validation. Nothing
    /// changes on error.
    pub fn update_profile(&mut self, name: &str, email: &str) -> Result<NewActivity, SessionError> {
        let user = self.user.as_mut().ok_or(SessionError::Unauthenticated)?;
        let validated_name = UserName::new(name)?;
        let validated_email = EmailAddress::new(email)?;
        user.name = validated_name;
        user.email = validated_email.into();
        info!(user_id = %user.id, "profile updated");
        Ok(user.activity(
            ActionType::ProfileUpdated,
            "Profile Updated",
            "Admin user updated their profile information",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserValidationError;
    use rstest::{fixture, rstest};

    #[fixture]
    fn signed_in() -> Session {
        let mut session = Session::default();
        let creds = LoginCredentials::try_from_parts("admin@example.com", "secret")
            .expect("credentials filled in");
        session.login(&creds).expect("fixed identity is valid");
        session
    }

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("admin@example.com", "")]
    fn blank_credentials_are_rejected(#[case] email: &str, #[case] password: &str) {
        let error = LoginCredentials::try_from_parts(email, password).expect_err("blank field");
        assert_eq!(error, SessionError::MissingCredentials);
    }

    #[rstest]
    fn login_opens_admin_session(signed_in: Session) {
        let user = signed_in.current().expect("signed in");
        assert_eq!(user.id().as_str(), ADMIN_USER_ID);
        assert_eq!(user.name().as_ref(), ADMIN_USER_NAME);
        assert_eq!(user.email(), "admin@example.com");
        assert_eq!(user.role(), Role::Admin);
    }

    #[rstest]
    fn login_activity_names_admin() {
        let mut session = Session::default();
        let creds = LoginCredentials::try_from_parts("a@b.co", "pw").expect("filled in");

        let activity = session.login(&creds).expect("login");

        assert_eq!(activity.action_type, ActionType::Login);
        assert_eq!(activity.user_name.as_deref(), Some(ADMIN_USER_NAME));
        assert_eq!(activity.description, "Admin user logged into the system");
    }

    #[rstest]
    fn logout_without_session_records_nothing() {
        let mut session = Session::default();
        assert!(session.logout().is_none());
    }

    #[rstest]
    fn logout_closes_session(mut signed_in: Session) {
        let activity = signed_in.logout().expect("was signed in");
        assert_eq!(activity.action_type, ActionType::Logout);
        assert!(!signed_in.is_authenticated());
    }

    #[rstest]
    #[case::missing_current(
        PasswordChange::new("", "Abcdefg1", "Abcdefg1"),
        PasswordRejection::MissingCurrent
    )]
    #[case::short(
        PasswordChange::new("old", "short", "short"),
        PasswordRejection::TooShort { min: 8 }
    )]
    #[case::mismatch(
        PasswordChange::new("old", "Abcdefg1", "Abcdefg2"),
        PasswordRejection::Mismatch
    )]
    fn password_change_rejections(
        signed_in: Session,
        #[case] change: PasswordChange,
        #[case] expected: PasswordRejection,
    ) {
        let error = signed_in.change_password(&change).expect_err("rejected");
        assert_eq!(error, SessionError::Password(expected));
    }

    #[rstest]
    fn weak_but_long_password_is_accepted(signed_in: Session) {
        let change = PasswordChange::new("old", "abcdefgh", "abcdefgh");
        assert_eq!(change.strength().score(), 1);

        let activity = signed_in.change_password(&change).expect("accepted");

        assert_eq!(activity.action_type, ActionType::PasswordChanged);
    }

    #[rstest]
    fn password_change_needs_session() {
        let change = PasswordChange::new("old", "Abcdefg1", "Abcdefg1");
        let error = Session::default().change_password(&change).expect_err("no session");
        assert_eq!(error, SessionError::Unauthenticated);
    }

    #[rstest]
    fn profile_update_changes_identity(mut signed_in: Session) {
        let activity = signed_in
            .update_profile("Ada Admin", "ada@example.com")
            .expect("valid profile");

        let user = signed_in.current().expect("still signed in");
        assert_eq!(user.name().as_ref(), "Ada Admin");
        assert_eq!(user.email(), "ada@example.com");
        assert_eq!(activity.action_type, ActionType::ProfileUpdated);
        assert_eq!(activity.user_name.as_deref(), Some("Ada Admin"));
    }

    #[rstest]
    fn invalid_profile_leaves_identity_unchanged(mut signed_in: Session) {
        let before = signed_in.clone();

        let error = signed_in
            .update_profile("Ada", "nope")
            .expect_err("invalid email");

        assert_eq!(error, SessionError::Profile(UserValidationError::InvalidEmail));
        assert_eq!(signed_in, before);
    }
}
