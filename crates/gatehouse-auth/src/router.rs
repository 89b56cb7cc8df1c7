//! Path-to-guard table and navigation resolution.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use gatehouse_core::config::RoutesConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::Navigator;

use crate::guard::{Guarded, Rendered, Requirement, RouteGuard};
use crate::session::SessionSnapshot;

/// Upper bound on redirects followed while opening one path.
pub const MAX_REDIRECTS: usize = 8;

/// How a path is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    /// Wrapped by the authenticated-only guard.
    Protected,
    /// Wrapped by the anonymous-only guard.
    Anonymous,
    /// Not guarded.
    Public,
}

impl fmt::Display for RouteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protected => write!(f, "protected"),
            Self::Anonymous => write!(f, "anonymous"),
            Self::Public => write!(f, "public"),
        }
    }
}

/// How opening a path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOutcome {
    /// The view at the final path was rendered.
    Rendered,
    /// A placeholder is showing while the session is loading.
    Placeholder,
}

/// Result of opening a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    /// Path the visitor ended up on.
    pub path: String,
    /// What is on screen there.
    pub outcome: VisitOutcome,
    /// Redirect targets followed, in order.
    pub redirects: Vec<String>,
}

/// Which guard wraps each configured path.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: BTreeMap<String, RouteAccess>,
    config: RoutesConfig,
}

impl RouteTable {
    /// Builds the table from configuration. A path listed as both protected
    /// and anonymous is treated as protected.
    pub fn from_config(config: &RoutesConfig) -> Self {
        let mut routes = BTreeMap::new();
        for path in &config.anonymous {
            routes.insert(path.clone(), RouteAccess::Anonymous);
        }
        for path in &config.protected {
            routes.insert(path.clone(), RouteAccess::Protected);
        }

        Self {
            routes,
            config: config.clone(),
        }
    }

    /// Access level of `path`. Unlisted paths are public.
    pub fn access(&self, path: &str) -> RouteAccess {
        self.routes.get(path).copied().unwrap_or(RouteAccess::Public)
    }

    /// The guard wrapping `path`, if any.
    pub fn guard_for(&self, path: &str) -> Option<RouteGuard> {
        match self.access(path) {
            RouteAccess::Protected => Some(RouteGuard::require_authenticated(&self.config)),
            RouteAccess::Anonymous => Some(RouteGuard::require_anonymous(&self.config)),
            RouteAccess::Public => None,
        }
    }

    /// Configured routes, sorted by path.
    pub fn entries(&self) -> impl Iterator<Item = (&str, RouteAccess)> {
        self.routes.iter().map(|(path, access)| (path.as_str(), *access))
    }

    /// Opens the navigator's current path under `snapshot`, following guard
    /// redirects until a view renders or a placeholder is shown.
    ///
    /// Each redirect is a replace navigation on `navigator`. Fails with a
    /// validation error after [`MAX_REDIRECTS`] hops, which means two guards
    /// point at each other's views.
    pub fn open(
        &self,
        snapshot: &SessionSnapshot,
        navigator: &Arc<dyn Navigator>,
    ) -> AppResult<Visit> {
        let mut redirects = Vec::new();

        loop {
            let path = navigator.current();

            let Some(guard) = self.guard_for(&path) else {
                debug!(path = %path, "Public route rendered");
                return Ok(Visit {
                    path,
                    outcome: VisitOutcome::Rendered,
                    redirects,
                });
            };

            let mut guarded = Guarded::new(guard, |_: &SessionSnapshot| (), navigator.clone());
            match guarded.render(snapshot) {
                Rendered::Content(()) => {
                    return Ok(Visit {
                        path,
                        outcome: VisitOutcome::Rendered,
                        redirects,
                    });
                }
                Rendered::Placeholder if snapshot.loading => {
                    return Ok(Visit {
                        path,
                        outcome: VisitOutcome::Placeholder,
                        redirects,
                    });
                }
                Rendered::Placeholder => {
                    let target = navigator.current();
                    if redirects.len() >= MAX_REDIRECTS {
                        warn!(path = %path, hops = redirects.len(), "Redirect loop between guards");
                        return Err(AppError::validation(format!(
                            "Redirect loop: gave up after {MAX_REDIRECTS} redirects at '{target}'"
                        )));
                    }
                    redirects.push(target);
                }
            }
        }
    }

    /// Whether the configured fallbacks converge: the public entry must be
    /// anonymous-only and the landing path protected.
    pub fn converges(&self) -> bool {
        self.access(&self.config.public_entry) == RouteAccess::Anonymous
            && self.access(&self.config.authenticated_landing) == RouteAccess::Protected
    }

    /// Requirement enforced on `path`, if any.
    pub fn requirement(&self, path: &str) -> Option<Requirement> {
        self.guard_for(path).map(|g| g.requirement())
    }
}
