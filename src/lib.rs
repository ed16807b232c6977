//! pshelp - Contextual help for PowerShell command lines.
//!
//! This library exposes the tokenizer, the help resolver and the collaborators
//! that fetch and display help, for use by the binary and integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod help;
pub mod logging;
pub mod output;
pub mod tokenizer;
