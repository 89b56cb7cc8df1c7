//! Wrapping a view in a guard.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use gatehouse_core::traits::Navigator;

use crate::session::SessionSnapshot;

use super::route_guard::{GuardDecision, RouteGuard};

/// Something that renders from the current session state.
pub trait View {
    /// What a render produces.
    type Output;

    /// Renders the view.
    fn render(&self, session: &SessionSnapshot) -> Self::Output;
}

impl<F, T> View for F
where
    F: Fn(&SessionSnapshot) -> T,
{
    type Output = T;

    fn render(&self, session: &SessionSnapshot) -> T {
        self(session)
    }
}

/// Result of rendering a guarded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    /// Neutral placeholder; nothing from the wrapped view is shown.
    Placeholder,
    /// The wrapped view's output.
    Content(T),
}

impl<T> Rendered<T> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn content(self) -> Option<T> {
        match self {
            Self::Content(value) => Some(value),
            Self::Placeholder => None,
        }
    }
}

/// A view behind a [`RouteGuard`].
///
/// The view is rendered only when access is granted. On entering the denied
/// state a replace navigation to the guard's fallback is issued, once; the
/// placeholder is shown until the navigation takes the visitor away.
pub struct Guarded<V> {
    guard: RouteGuard,
    view: V,
    navigator: Arc<dyn Navigator>,
    /// Whether the redirect for the current denial has been issued.
    redirected: bool,
}

impl<V> std::fmt::Debug for Guarded<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guarded")
            .field("guard", &self.guard)
            .field("redirected", &self.redirected)
            .finish()
    }
}

impl<V: View> Guarded<V> {
    pub fn new(guard: RouteGuard, view: V, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            guard,
            view,
            navigator,
            redirected: false,
        }
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Renders for `snapshot`, redirecting on the transition into denial.
    pub fn render(&mut self, snapshot: &SessionSnapshot) -> Rendered<V::Output> {
        match self.guard.evaluate(snapshot) {
            GuardDecision::Pending => {
                self.redirected = false;
                Rendered::Placeholder
            }
            GuardDecision::Granted => {
                self.redirected = false;
                Rendered::Content(self.view.render(snapshot))
            }
            GuardDecision::Denied { redirect_to } => {
                if !self.redirected {
                    self.redirected = true;
                    info!(
                        requirement = %self.guard.requirement(),
                        redirect_to = %redirect_to,
                        "Guard denied access, redirecting"
                    );
                    self.navigator.replace(&redirect_to);
                }
                Rendered::Placeholder
            }
        }
    }

    /// Re-renders on every state change until the session manager goes away,
    /// handing each result to `sink`.
    pub async fn follow<S>(mut self, mut states: watch::Receiver<SessionSnapshot>, mut sink: S)
    where
        S: FnMut(Rendered<V::Output>),
    {
        loop {
            let snapshot = states.borrow_and_update().clone();
            sink(self.render(&snapshot));

            if states.changed().await.is_err() {
                break;
            }
        }
    }
}
