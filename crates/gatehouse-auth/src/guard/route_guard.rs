//! Guard requirement and decision logic.

use std::fmt;

use gatehouse_core::config::RoutesConfig;

use crate::session::SessionSnapshot;

/// Which authentication state a guarded view needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// A session must exist.
    Authenticated,
    /// No session may exist.
    Anonymous,
}

impl Requirement {
    /// Whether `snapshot` satisfies this requirement.
    pub fn is_met(self, snapshot: &SessionSnapshot) -> bool {
        match self {
            Self::Authenticated => snapshot.is_authenticated(),
            Self::Anonymous => !snapshot.is_authenticated(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => write!(f, "authenticated"),
            Self::Anonymous => write!(f, "anonymous"),
        }
    }
}

/// What a guard decided for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup reconciliation is still running; show a placeholder.
    Pending,
    /// The requirement is met; show the view.
    Granted,
    /// The requirement is not met; navigate away.
    Denied {
        /// Path to replace the current one with.
        redirect_to: String,
    },
}

/// A requirement paired with where to send visitors who fail it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    requirement: Requirement,
    fallback: String,
}

impl RouteGuard {
    /// Creates a guard.
    pub fn new(requirement: Requirement, fallback: impl Into<String>) -> Self {
        Self {
            requirement,
            fallback: fallback.into(),
        }
    }

    /// Guard for protected views: sends anonymous visitors to the public entry.
    pub fn require_authenticated(routes: &RoutesConfig) -> Self {
        Self::new(Requirement::Authenticated, routes.public_entry.clone())
    }

    /// Guard for anonymous-only views: sends logged-in visitors to the landing path.
    pub fn require_anonymous(routes: &RoutesConfig) -> Self {
        Self::new(Requirement::Anonymous, routes.authenticated_landing.clone())
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Decides from `snapshot` alone; the guard holds no session state.
    pub fn evaluate(&self, snapshot: &SessionSnapshot) -> GuardDecision {
        if snapshot.loading {
            GuardDecision::Pending
        } else if self.requirement.is_met(snapshot) {
            GuardDecision::Granted
        } else {
            GuardDecision::Denied {
                redirect_to: self.fallback.clone(),
            }
        }
    }
}
