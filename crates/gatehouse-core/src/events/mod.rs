//! Domain events emitted by the session layer.

pub mod session;

pub use session::SessionEvent;
