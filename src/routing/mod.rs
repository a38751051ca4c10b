//! Routes, the role guard for protected pages, and shell layout rules.

pub mod guard;
pub mod layout;
pub mod route;

pub use guard::{guard, guard_route, GuardDecision, GuardInput};
pub use layout::{nav_links, show_navbar};
pub use route::{dashboard_for, Route};
