//! Protected-route decision table.
//!
//! Checked in order:
//! 1. Session check still running → Loading (no redirect yet)
//! 2. No user → redirect to login, remembering the location
//! 3. Role not in the allowlist → redirect home
//! 4. Otherwise → render
//!
//! Stateless: the same input always gives the same decision.

use super::route::Route;
use crate::models::Role;
use crate::store::AuthState;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Session facts the guard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardInput {
    pub loading: bool,
    pub authenticated: bool,
    pub role: Option<Role>,
}

impl GuardInput {
    pub fn from_session(session: &AuthState) -> Self {
        Self {
            loading: session.loading,
            authenticated: session.is_authenticated(),
            role: session.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render a placeholder.
    Loading,
    RedirectToLogin { from: String },
    RedirectHome,
    Render,
}

impl GuardDecision {
    /// Redirect target, if any.
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::RedirectToLogin { .. } => Some(Route::Login),
            Self::RedirectHome => Some(Route::Home),
            Self::Loading | Self::Render => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Decision
// ═══════════════════════════════════════════════════════════

/// Decide for a location protected by `allowed`. An empty allowlist admits
/// any signed-in user, including one whose role is unknown.
pub fn guard(input: &GuardInput, allowed: &[Role], location: &str) -> GuardDecision {
    // Rule 1: session check pending
    if input.loading {
        return GuardDecision::Loading;
    }

    // Rule 2: not signed in
    if !input.authenticated {
        return GuardDecision::RedirectToLogin {
            from: location.to_string(),
        };
    }

    // Rule 3: wrong role
    if !allowed.is_empty() && !input.role.is_some_and(|role| allowed.contains(&role)) {
        return GuardDecision::RedirectHome;
    }

    GuardDecision::Render
}

/// Guard a known route; public routes always render.
pub fn guard_route(input: &GuardInput, route: Route) -> GuardDecision {
    match route.allowed_roles() {
        Some(allowed) => guard(input, allowed, route.path()),
        None => GuardDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(role: Option<Role>) -> GuardInput {
        GuardInput {
            loading: false,
            authenticated: true,
            role,
        }
    }

    #[test]
    fn loading_never_redirects() {
        let input = GuardInput {
            loading: true,
            authenticated: false,
            role: None,
        };
        assert_eq!(guard(&input, &[Role::Staff], "/staff/dashboard"), GuardDecision::Loading);
    }

    #[test]
    fn anonymous_goes_to_login_with_location() {
        let input = GuardInput {
            loading: false,
            authenticated: false,
            role: None,
        };
        let decision = guard(&input, &[Role::Patient], "/patient/dashboard?tab=history");
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                from: "/patient/dashboard?tab=history".into()
            }
        );
        assert_eq!(decision.redirect(), Some(Route::Login));
    }

    #[test]
    fn wrong_or_unknown_role_goes_home() {
        assert_eq!(
            guard(&signed_in(Some(Role::Patient)), &[Role::Doctor], "/doctor/dashboard"),
            GuardDecision::RedirectHome
        );
        assert_eq!(
            guard(&signed_in(None), &[Role::Doctor], "/doctor/dashboard"),
            GuardDecision::RedirectHome
        );
    }

    #[test]
    fn allowed_role_renders() {
        let input = signed_in(Some(Role::Staff));
        assert_eq!(guard(&input, &[Role::Doctor, Role::Staff], "/x"), GuardDecision::Render);
        assert_eq!(guard(&signed_in(None), &[], "/x"), GuardDecision::Render);
    }

    #[test]
    fn decision_is_idempotent() {
        let input = signed_in(Some(Role::Doctor));
        let first = guard_route(&input, Route::StaffDashboard);
        for _ in 0..3 {
            assert_eq!(guard_route(&input, Route::StaffDashboard), first);
        }
    }

    #[test]
    fn public_routes_render_for_anyone() {
        let input = GuardInput {
            loading: true,
            authenticated: false,
            role: None,
        };
        assert_eq!(guard_route(&input, Route::Doctors), GuardDecision::Render);
    }

    #[test]
    fn reads_session_state() {
        let session = AuthState::default();
        assert_eq!(
            guard_route(&GuardInput::from_session(&session), Route::PatientDashboard),
            GuardDecision::Loading
        );

        let session = AuthState {
            loading: false,
            ..Default::default()
        };
        assert!(matches!(
            guard_route(&GuardInput::from_session(&session), Route::PatientDashboard),
            GuardDecision::RedirectToLogin { from } if from == "/patient/dashboard"
        ));
    }
}
