//! Tests running the pshelp binary.

mod common;
mod dry_run_test;
