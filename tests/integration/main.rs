//! Integration tests for the session lifecycle and route guards.

mod guard_test;
mod helpers;
mod session_test;
