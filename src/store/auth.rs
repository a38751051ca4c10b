//! Session slice: the logged-in user, their role, and account operations.

use super::action::{apply_phase, impl_async_slice, AsyncAction, AsyncSlice, Phase};
use super::request::RequestId;
use crate::models::{derive_role, Role, UserProfile};

/// Login response: the user when the backend returns it inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginPayload {
    pub user: Option<UserProfile>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    CheckSession(AsyncAction<UserProfile>),
    Login(AsyncAction<LoginPayload>),
    /// Payload: confirmation message.
    Register(AsyncAction<String>),
    Logout(AsyncAction<()>),
    /// Payload: the updated user, when the backend echoes it.
    UpdateProfile(AsyncAction<Option<UserProfile>>),
    /// Payload: confirmation message.
    SendInvite(AsyncAction<String>),
    ClearMessages,
}

impl AuthAction {
    pub fn settles(&self) -> Option<RequestId> {
        match self {
            Self::CheckSession(a) => a.settles(),
            Self::Login(a) => a.settles(),
            Self::Register(a) => a.settles(),
            Self::Logout(a) => a.settles(),
            Self::UpdateProfile(a) => a.settles(),
            Self::SendInvite(a) => a.settles(),
            Self::ClearMessages => None,
        }
    }
}

/// Session state. `role` is only ever written through [`AuthState::set_user`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub role: Option<Role>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Default for AuthState {
    /// Starts loading: the session check has not resolved yet.
    fn default() -> Self {
        Self {
            user: None,
            role: None,
            loading: true,
            error: None,
            success: None,
        }
    }
}

impl_async_slice!(AuthState);

impl AuthState {
    fn set_user(&mut self, user: Option<UserProfile>) {
        self.role = user.as_ref().and_then(derive_role);
        self.user = user;
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::CheckSession(a) => match a.phase {
                Phase::Pending => {
                    self.set_user(None);
                    self.loading = true;
                    self.error = None;
                }
                Phase::Rejected(_) => {
                    self.set_user(None);
                    apply_phase(self, a.phase, |_, _| {});
                }
                phase => apply_phase(self, phase, |s, user| s.set_user(Some(user))),
            },
            AuthAction::Login(a) => apply_phase(self, a.phase, |s, payload| {
                s.error = None;
                if payload.user.is_some() {
                    s.set_user(payload.user);
                }
            }),
            AuthAction::Register(a) => {
                apply_phase(self, a.phase, |s, message| s.success = Some(message))
            }
            AuthAction::Logout(a) => apply_phase(self, a.phase, |s, ()| {
                s.set_user(None);
                s.success = None;
            }),
            AuthAction::UpdateProfile(a) => apply_phase(self, a.phase, |s, user| {
                if user.is_some() {
                    s.set_user(user);
                }
                s.success = Some("Profile updated successfully".into());
            }),
            AuthAction::SendInvite(a) => {
                apply_phase(self, a.phase, |s, message| s.success = Some(message))
            }
            AuthAction::ClearMessages => self.clear_messages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::request::{OperationKind, RequestTracker};
    use serde_json::json;

    fn id(kind: OperationKind) -> RequestId {
        RequestTracker::new().issue(kind)
    }

    fn patient() -> UserProfile {
        serde_json::from_value(json!({
            "_id": "P1", "name": "Tola", "userId": { "_id": "U1", "role": "patient" }
        }))
        .unwrap()
    }

    #[test]
    fn check_session_pending_resets_user() {
        let mut state = AuthState::default();
        let req = id(OperationKind::CheckSession);
        state.reduce(AuthAction::CheckSession(AsyncAction::fulfilled(req, patient())));
        assert_eq!(state.role, Some(Role::Patient));

        state.reduce(AuthAction::CheckSession(AsyncAction::pending(req)));
        assert!(state.loading);
        assert!(state.user.is_none());
        assert!(state.role.is_none());
    }

    #[test]
    fn failed_check_resolves_logged_out() {
        let mut state = AuthState::default();
        let req = id(OperationKind::CheckSession);
        state.reduce(AuthAction::CheckSession(AsyncAction::pending(req)));
        state.reduce(AuthAction::CheckSession(AsyncAction::rejected(
            req,
            "Not authenticated".into(),
        )));
        assert!(!state.loading);
        assert!(state.user.is_none());
        assert_eq!(state.error.as_deref(), Some("Not authenticated"));
    }

    #[test]
    fn login_without_inline_user_keeps_session_untouched() {
        let mut state = AuthState::default();
        let req = id(OperationKind::Login);
        state.reduce(AuthAction::Login(AsyncAction::pending(req)));
        assert!(state.loading);
        state.reduce(AuthAction::Login(AsyncAction::fulfilled(req, LoginPayload::default())));
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.user.is_none());
    }

    #[test]
    fn logout_clears_user_and_role() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::Login(AsyncAction::fulfilled(
            id(OperationKind::Login),
            LoginPayload { user: Some(patient()), message: None },
        )));
        assert!(state.is_authenticated());

        state.reduce(AuthAction::Logout(AsyncAction::fulfilled(id(OperationKind::Logout), ())));
        assert!(state.user.is_none());
        assert!(state.role.is_none());
    }

    #[test]
    fn profile_update_rederives_role_and_sets_success() {
        let mut state = AuthState::default();
        let mut updated = patient();
        updated.user_id = None;
        updated.role = Some("doctor".into());
        state.reduce(AuthAction::UpdateProfile(AsyncAction::fulfilled(
            id(OperationKind::UpdateProfile),
            Some(updated),
        )));
        assert_eq!(state.role, Some(Role::Doctor));
        assert_eq!(state.success.as_deref(), Some("Profile updated successfully"));

        state.reduce(AuthAction::ClearMessages);
        assert!(state.success.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn profile_update_without_user_keeps_session() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::CheckSession(AsyncAction::fulfilled(
            id(OperationKind::CheckSession),
            patient(),
        )));
        state.reduce(AuthAction::UpdateProfile(AsyncAction::fulfilled(
            id(OperationKind::UpdateProfile),
            None,
        )));
        assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("P1"));
        assert_eq!(state.role, Some(Role::Patient));
        assert!(state.success.is_some());
    }

    #[test]
    fn pending_clears_stale_error() {
        let mut state = AuthState::default();
        let req = id(OperationKind::SendInvite);
        state.reduce(AuthAction::SendInvite(AsyncAction::rejected(req, "Email taken".into())));
        assert_eq!(state.error.as_deref(), Some("Email taken"));
        state.reduce(AuthAction::SendInvite(AsyncAction::pending(req)));
        assert!(state.error.is_none());
    }
}
