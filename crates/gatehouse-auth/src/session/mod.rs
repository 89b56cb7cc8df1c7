//! Session lifecycle: startup reconciliation, login, logout, and the
//! observable state the rest of the application reads.

pub mod identity;
pub mod manager;
pub mod state;

pub use identity::Identity;
pub use manager::{InitOutcome, SessionManager};
pub use state::{ActiveSession, SessionSnapshot};
