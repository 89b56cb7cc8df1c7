//! # gatehouse-core
//!
//! Core crate for Gatehouse. Contains the capability traits the session
//! layer is written against (clock, session storage, navigation),
//! configuration schemas, session events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Gatehouse crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
