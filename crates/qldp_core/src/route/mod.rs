//! Role-based routing.
//!
//! # Responsibility
//! - Map navigated locations to destination pages.
//! - Gate destinations behind authentication and role guards.
//!
//! # Invariants
//! - Guards read the session; they never modify it.
//! - Every navigation ends in a rendered page, a blocked landing page, or a
//!   reported redirect loop.

pub mod guard;
pub mod navigator;
pub mod path;
pub mod table;

pub use guard::{AccessDenied, Guard, PrivateRoute, RoleRoute, RouteGuard};
pub use navigator::{Landing, Navigation, Navigator};
pub use path::{Location, PathMatch, PathPattern, PathPatternError};
pub use table::{
    Page, RedirectCause, Resolution, RouteEntry, RouteProps, RouteTable, RouteTableError,
};
