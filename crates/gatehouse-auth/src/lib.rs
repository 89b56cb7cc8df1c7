//! # gatehouse-auth
//!
//! Client-side session lifecycle for Gatehouse: reading identity claims out
//! of a bearer token, persisting the token with an absolute expiry, and
//! gating views on the resulting authentication state.
//!
//! ## Modules
//!
//! - `jwt`: unverified claims decoding and unsigned fixture tokens
//! - `storage`: in-memory and file-backed session stores
//! - `session`: the session manager and its observable state
//! - `guard`: route guards that render a view or redirect
//! - `router`: path-to-guard table used to resolve a navigation
//! - `navigation`: in-memory browser history

pub mod guard;
pub mod jwt;
pub mod navigation;
pub mod router;
pub mod session;
pub mod storage;

pub use guard::{GuardDecision, Guarded, Rendered, Requirement, RouteGuard, View};
pub use jwt::{Claims, ClaimsDecoder, DecodeError, TokenEncoder};
pub use navigation::HistoryNavigator;
pub use router::{RouteAccess, RouteTable, Visit, VisitOutcome};
pub use session::{ActiveSession, Identity, InitOutcome, SessionManager, SessionSnapshot};
pub use storage::{FileStorage, MemoryStorage};
