//! Library-level tests for resolution and the help session.

mod resolver_test;
mod session_test;
