use super::route::Route;
use crate::models::Role;

/// Whether the top navigation bar is shown.
///
/// Hidden on the auth pages and on every dashboard, which carry their own
/// navigation. Unknown locations keep it.
pub fn show_navbar(route: Option<Route>, _role: Option<Role>) -> bool {
    match route {
        Some(Route::Login | Route::Signup) => false,
        Some(route) if route.is_dashboard() => false,
        _ => true,
    }
}

/// Navigation entries for the current session.
pub fn nav_links(role: Option<Role>) -> Vec<Route> {
    let mut links = vec![Route::Home, Route::Doctors];
    match role {
        Some(role) => links.push(super::dashboard_for(role)),
        None => links.extend([Route::Login, Route::Signup]),
    }
    links
}
