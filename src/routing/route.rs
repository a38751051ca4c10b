use crate::models::Role;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Doctors,
    Login,
    Signup,
    PatientDashboard,
    DoctorDashboard,
    StaffDashboard,
}

impl Route {
    pub const ALL: &'static [Route] = &[
        Route::Home,
        Route::Doctors,
        Route::Login,
        Route::Signup,
        Route::PatientDashboard,
        Route::DoctorDashboard,
        Route::StaffDashboard,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Doctors => "/doctors",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::PatientDashboard => "/patient/dashboard",
            Self::DoctorDashboard => "/doctor/dashboard",
            Self::StaffDashboard => "/staff/dashboard",
        }
    }

    /// Parse a location. Query, fragment and a trailing slash are ignored.
    pub fn from_path(location: &str) -> Option<Self> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.iter().copied().find(|r| r.path() == path)
    }

    /// Roles allowed on a protected route; `None` for public routes.
    pub fn allowed_roles(self) -> Option<&'static [Role]> {
        match self {
            Self::PatientDashboard => Some(&[Role::Patient]),
            Self::DoctorDashboard => Some(&[Role::Doctor]),
            Self::StaffDashboard => Some(&[Role::Staff]),
            Self::Home | Self::Doctors | Self::Login | Self::Signup => None,
        }
    }

    pub fn is_dashboard(self) -> bool {
        matches!(
            self,
            Self::PatientDashboard | Self::DoctorDashboard | Self::StaffDashboard
        )
    }
}

/// Landing page after login.
pub fn dashboard_for(role: Role) -> Route {
    match role {
        Role::Patient => Route::PatientDashboard,
        Role::Doctor => Route::DoctorDashboard,
        Role::Staff => Route::StaffDashboard,
    }
}
