//! Capability traits the session layer is written against.
//!
//! Concrete implementations live in `gatehouse-auth` (in-memory and
//! file-backed storage, history navigator) or in the binary.

pub mod clock;
pub mod navigator;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use navigator::Navigator;
pub use storage::SessionStorage;
