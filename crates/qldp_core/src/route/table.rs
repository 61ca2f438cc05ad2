//! Declarative route table.
//!
//! # Responsibility
//! - Hold the ordered (path, exactness, guard, page) entries.
//! - Resolve a location to a rendered page or a redirect.
//!
//! # Invariants
//! - Entries are evaluated top-to-bottom and the first match wins.
//! - Resolution is total: an unmatched path redirects to the fallback route.

use super::guard::{AccessDenied, Guard, PrivateRoute, RoleRoute, RouteGuard};
use super::path::{Location, PathMatch, PathPattern, PathPatternError};
use crate::config::RouterConfig;
use crate::model::session::{AuthSession, Role};
use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Destination page rendered by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Account,
    Admin,
    People,
    AddPerson,
    PersonDetail,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::Admin => "Admin",
            Self::People => "People",
            Self::AddPerson => "AddPerson",
            Self::PersonDetail => "PersonDetail",
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: PathPattern,
    pub exact: bool,
    pub guard: Guard,
    pub page: Page,
}

/// Props handed to a rendered destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteProps {
    pub matched: PathMatch,
    pub query: BTreeMap<String, String>,
    /// Role configured on the route entry, for `RoleRoute` destinations.
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectCause {
    Denied(AccessDenied),
    Unmatched,
}

impl Display for RedirectCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied(denied) => write!(f, "{denied}"),
            Self::Unmatched => write!(f, "no route matched"),
        }
    }
}

/// Outcome of resolving one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render { page: Page, props: RouteProps },
    Redirect { to: String, cause: RedirectCause },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    Pattern(PathPatternError),
    DuplicatePath(String),
}

impl Display for RouteTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern(err) => write!(f, "{err}"),
            Self::DuplicatePath(path) => write!(f, "route path already registered: {path}"),
        }
    }
}

impl Error for RouteTableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pattern(err) => Some(err),
            Self::DuplicatePath(_) => None,
        }
    }
}

impl From<PathPatternError> for RouteTableError {
    fn from(value: PathPatternError) -> Self {
        Self::Pattern(value)
    }
}

/// Ordered route table with redirect targets.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    config: RouterConfig,
}

impl RouteTable {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    /// Side navigation routes of the management console.
    pub fn side_nav(config: RouterConfig) -> Result<Self, RouteTableError> {
        let mut table = Self::new(config);
        table.add("/account", true, Guard::Private(PrivateRoute), Page::Account)?;
        table.add(
            "/users/list",
            true,
            Guard::Role(RoleRoute::new(Role::Admin)),
            Page::Admin,
        )?;
        table.add(
            "/people/list",
            true,
            Guard::Role(RoleRoute::new(Role::Manager)),
            Page::People,
        )?;
        table.add(
            "/people/add",
            true,
            Guard::Role(RoleRoute::new(Role::Manager)),
            Page::AddPerson,
        )?;
        table.add(
            "/people/:id",
            true,
            Guard::Role(RoleRoute::new(Role::Manager)),
            Page::PersonDetail,
        )?;
        Ok(table)
    }

    /// Appends one entry after all existing entries.
    pub fn add(
        &mut self,
        path: &str,
        exact: bool,
        guard: Guard,
        page: Page,
    ) -> Result<(), RouteTableError> {
        let pattern = PathPattern::parse(path)?;
        if self
            .entries
            .iter()
            .any(|entry| entry.pattern.as_str().eq_ignore_ascii_case(pattern.as_str()))
        {
            return Err(RouteTableError::DuplicatePath(pattern.as_str().to_string()));
        }
        self.entries.push(RouteEntry {
            pattern,
            exact,
            guard,
            page,
        });
        Ok(())
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Resolves `location` for `session`.
    pub fn resolve(&self, location: &Location, session: &AuthSession) -> Resolution {
        for entry in &self.entries {
            let Some(matched) = entry.pattern.matches(&location.pathname, entry.exact) else {
                continue;
            };

            return match entry.guard.check(session) {
                Ok(()) => {
                    debug!(
                        "event=route_resolve module=route status=render pattern={} guard={} page={}",
                        entry.pattern.as_str(),
                        entry.guard.label(),
                        entry.page
                    );
                    Resolution::Render {
                        page: entry.page,
                        props: RouteProps {
                            matched,
                            query: location.query.clone(),
                            role: entry.guard.required_role(),
                        },
                    }
                }
                Err(denied) => {
                    let to = self.redirect_target(denied).to_string();
                    debug!(
                        "event=route_resolve module=route status=redirect pattern={} guard={} to={} cause={}",
                        entry.pattern.as_str(),
                        entry.guard.label(),
                        to,
                        denied
                    );
                    Resolution::Redirect {
                        to,
                        cause: RedirectCause::Denied(denied),
                    }
                }
            };
        }

        debug!(
            "event=route_resolve module=route status=redirect pattern=none to={} cause=unmatched",
            self.config.fallback_path
        );
        Resolution::Redirect {
            to: self.config.fallback_path.clone(),
            cause: RedirectCause::Unmatched,
        }
    }

    fn redirect_target(&self, denied: AccessDenied) -> &str {
        match denied {
            AccessDenied::Unauthenticated => &self.config.login_path,
            AccessDenied::MissingRole { .. } => &self.config.unauthorized_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, RedirectCause, Resolution, RouteTable, RouteTableError};
    use crate::config::RouterConfig;
    use crate::model::session::{AuthSession, LoginSuccess, Role};
    use crate::route::guard::{AccessDenied, Guard, PrivateRoute};
    use crate::route::path::Location;

    fn table() -> RouteTable {
        RouteTable::side_nav(RouterConfig::default()).expect("side nav routes")
    }

    fn manager() -> AuthSession {
        AuthSession::signed_in(&LoginSuccess::new("canbo", [Role::Manager]))
    }

    #[test]
    fn static_route_wins_over_param_route_by_order() {
        let resolution = table().resolve(&Location::parse("/people/add"), &manager());
        let Resolution::Render { page, .. } = resolution else {
            panic!("expected render");
        };
        assert_eq!(page, Page::AddPerson);
    }

    #[test]
    fn person_detail_receives_params_query_and_role() {
        let resolution = table().resolve(&Location::parse("/people/12?tab=family"), &manager());
        let Resolution::Render { page, props } = resolution else {
            panic!("expected render");
        };
        assert_eq!(page, Page::PersonDetail);
        assert_eq!(props.matched.params["id"], "12");
        assert_eq!(props.query["tab"], "family");
        assert_eq!(props.role, Some(Role::Manager));
    }

    #[test]
    fn unmatched_path_redirects_to_fallback() {
        let resolution = table().resolve(&Location::parse("/nowhere"), &manager());
        assert_eq!(
            resolution,
            Resolution::Redirect {
                to: "/account".to_string(),
                cause: RedirectCause::Unmatched,
            }
        );
    }

    #[test]
    fn wrong_role_redirects_to_unauthorized_path() {
        let config = RouterConfig {
            unauthorized_path: "/forbidden".to_string(),
            ..RouterConfig::default()
        };
        let table = RouteTable::side_nav(config).expect("side nav routes");
        let resolution = table.resolve(&Location::parse("/users/list"), &manager());
        assert_eq!(
            resolution,
            Resolution::Redirect {
                to: "/forbidden".to_string(),
                cause: RedirectCause::Denied(AccessDenied::MissingRole {
                    required: Role::Admin
                }),
            }
        );
    }

    #[test]
    fn rejects_duplicate_paths() {
        let mut table = table();
        let err = table
            .add("/Account", true, Guard::Private(PrivateRoute), Page::Account)
            .expect_err("duplicate path must fail");
        assert!(matches!(err, RouteTableError::DuplicatePath(_)));
    }
}
