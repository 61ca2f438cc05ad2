//! Route guards.
//!
//! # Responsibility
//! - Decide from the current session whether a destination may render.
//!
//! # Invariants
//! - Guards deny by default: no session, no render.
//! - Authentication is checked before role, so a signed-out user is always
//!   sent to login, never to the unauthorized page.

use crate::model::session::{AuthSession, Role};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a guard refused to render its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    Unauthenticated,
    MissingRole { required: Role },
}

impl Display for AccessDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "authentication required"),
            Self::MissingRole { required } => write!(f, "role required: {required}"),
        }
    }
}

impl Error for AccessDenied {}

/// Render-or-redirect decision shared by every guard variant.
pub trait RouteGuard {
    /// Returns `Ok(())` when the destination may render for `session`.
    fn check(&self, session: &AuthSession) -> Result<(), AccessDenied>;

    /// Role passed to the destination as route configuration, if any.
    fn required_role(&self) -> Option<Role> {
        None
    }
}

/// Renders for any authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrivateRoute;

impl RouteGuard for PrivateRoute {
    fn check(&self, session: &AuthSession) -> Result<(), AccessDenied> {
        if session.authenticated {
            Ok(())
        } else {
            Err(AccessDenied::Unauthenticated)
        }
    }
}

/// Renders for authenticated sessions holding one specific role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRoute {
    pub role: Role,
}

impl RoleRoute {
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

impl RouteGuard for RoleRoute {
    fn check(&self, session: &AuthSession) -> Result<(), AccessDenied> {
        PrivateRoute.check(session)?;
        if session.has_role(self.role) {
            Ok(())
        } else {
            Err(AccessDenied::MissingRole {
                required: self.role,
            })
        }
    }

    fn required_role(&self) -> Option<Role> {
        Some(self.role)
    }
}

/// Guard attached to one route table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Private(PrivateRoute),
    Role(RoleRoute),
}

impl Guard {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Private(_) => "private",
            Self::Role(_) => "role",
        }
    }
}

impl RouteGuard for Guard {
    fn check(&self, session: &AuthSession) -> Result<(), AccessDenied> {
        match self {
            Self::Private(guard) => guard.check(session),
            Self::Role(guard) => guard.check(session),
        }
    }

    fn required_role(&self) -> Option<Role> {
        match self {
            Self::Private(guard) => guard.required_role(),
            Self::Role(guard) => guard.required_role(),
        }
    }
}
