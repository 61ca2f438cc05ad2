//! Redirect-following navigation over a route table.

use super::path::Location;
use super::table::{Page, RedirectCause, Resolution, RouteProps, RouteTable};
use crate::model::session::AuthSession;
use log::{info, warn};

/// Where a navigation settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    /// A destination rendered.
    Page { page: Page, props: RouteProps },
    /// The redirect target is the current path and its guard still denies;
    /// the shell shows the landing page in its signed-out state.
    Blocked { cause: RedirectCause },
    /// Redirects did not settle within the configured hop limit.
    RedirectLoop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub location: Location,
    pub landing: Landing,
    /// Pathnames visited, starting with the requested one.
    pub visited: Vec<String>,
}

impl Navigation {
    pub fn rendered_page(&self) -> Option<Page> {
        match &self.landing {
            Landing::Page { page, .. } => Some(*page),
            Landing::Blocked { .. } | Landing::RedirectLoop => None,
        }
    }
}

pub struct Navigator<'table> {
    table: &'table RouteTable,
}

impl<'table> Navigator<'table> {
    pub fn new(table: &'table RouteTable) -> Self {
        Self { table }
    }

    /// Resolves `url`, following redirects until the navigation settles.
    pub fn navigate(&self, url: &str, session: &AuthSession) -> Navigation {
        let max_redirects = self.table.config().max_redirects;
        let mut location = Location::parse(url);
        let mut visited = vec![location.pathname.clone()];
        let mut hops = 0;

        loop {
            match self.table.resolve(&location, session) {
                Resolution::Render { page, props } => {
                    info!(
                        "event=navigate module=route status=render page={} hops={}",
                        page, hops
                    );
                    return Navigation {
                        location,
                        landing: Landing::Page { page, props },
                        visited,
                    };
                }
                Resolution::Redirect { to, cause } => {
                    let next = Location::parse(&to);
                    if next.pathname.eq_ignore_ascii_case(&location.pathname) {
                        info!(
                            "event=navigate module=route status=blocked landing={} hops={} cause={}",
                            location.pathname, hops, cause
                        );
                        return Navigation {
                            location,
                            landing: Landing::Blocked { cause },
                            visited,
                        };
                    }
                    if hops >= max_redirects {
                        warn!(
                            "event=navigate module=route status=error error_code=redirect_loop hops={}",
                            hops
                        );
                        return Navigation {
                            location,
                            landing: Landing::RedirectLoop,
                            visited,
                        };
                    }
                    hops += 1;
                    visited.push(next.pathname.clone());
                    location = next;
                }
            }
        }
    }
}
