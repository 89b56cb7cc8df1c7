//! Route guards that render a wrapped view or redirect, depending on the
//! session state.
//!
//! Both guards are the same [`RouteGuard`] parameterized by a
//! [`Requirement`] and a fallback path. A guard never checks that its
//! fallback is itself guarded the opposite way; pairing the public entry
//! with [`Requirement::Anonymous`] and the landing path with
//! [`Requirement::Authenticated`] is the deployment's job.

pub mod guarded;
pub mod route_guard;

pub use guarded::{Guarded, Rendered, View};
pub use route_guard::{GuardDecision, Requirement, RouteGuard};
