//! Client-side navigation capability.

/// Issues navigations on behalf of the session manager and route guards.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// Replace-style navigation: the current history entry is overwritten,
    /// so the back button cannot return to the page being left.
    fn replace(&self, path: &str);

    /// Returns the path currently displayed.
    fn current(&self) -> String;
}
