//! Authentication session and role model.
//!
//! # Responsibility
//! - Describe who is signed in and which roles the backend granted.
//! - Parse role strings into a closed set so route guards never compare
//!   free-form text.
//!
//! # Invariants
//! - `AuthSession::default()` is the signed-out session of the initial state.
//! - An unauthenticated session carries no roles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Role granted to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages admin users.
    Admin,
    /// Manages people and household records.
    Manager,
    /// Regular staff account.
    Employee,
}

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";

impl Role {
    pub const ALL: [Role; 3] = [Self::Admin, Self::Manager, Self::Employee];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Manager => ROLE_MANAGER,
            Self::Employee => ROLE_EMPLOYEE,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one role from its lowercase string form.
pub fn parse_role(value: &str) -> Result<Role, RoleParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(RoleParseError::EmptyRole);
    }

    match normalized {
        ROLE_ADMIN => Ok(Role::Admin),
        ROLE_MANAGER => Ok(Role::Manager),
        ROLE_EMPLOYEE => Ok(Role::Employee),
        other => Err(RoleParseError::UnsupportedRole(other.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    EmptyRole,
    UnsupportedRole(String),
}

impl Display for RoleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRole => write!(f, "role value must not be empty"),
            Self::UnsupportedRole(value) => write!(f, "role is unsupported: {value}"),
        }
    }
}

impl Error for RoleParseError {}

/// The `user` slice: current authentication session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub authenticated: bool,
    pub username: Option<String>,
    pub email: Option<String>,
    pub token: Option<String>,
    /// Token lifetime as reported by the auth backend.
    pub expires_in: Option<i64>,
    /// Set after a verification email was sent; cleared by the UI.
    pub sent: bool,
    pub roles: BTreeSet<Role>,
}

impl AuthSession {
    /// Builds an authenticated session from a resolved login.
    pub fn signed_in(login: &LoginSuccess) -> Self {
        Self {
            authenticated: true,
            username: login.username.clone(),
            email: login.email.clone(),
            token: login.token.clone(),
            expires_in: login.expires_in,
            sent: false,
            roles: login.roles.clone(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Payload of a successful login, already resolved by the auth backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginSuccess {
    pub username: Option<String>,
    pub email: Option<String>,
    pub token: Option<String>,
    pub expires_in: Option<i64>,
    pub roles: BTreeSet<Role>,
}

impl LoginSuccess {
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: Some(username.into()),
            roles: roles.into_iter().collect(),
            ..Self::default()
        }
    }
}
