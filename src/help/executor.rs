//! Running help requests against a help backend.
//!
//! The executor owns the temporary output file: it creates it, hands its path
//! to the backend through the reserved argument slot, and returns it wrapped in
//! a [`HelpOutput`] that deletes the file when dropped.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempPath;
use tracing::{debug, info};

use super::request::HelpRequest;
use crate::config::BackendConfig;
use crate::error::{PsHelpError, Result};

/// Executes a templated help request.
pub trait HelpBackend {
    /// Runs `template` with `arguments` bound to `$args`.
    ///
    /// The template writes its output to the path in `arguments[0]`.
    fn invoke(&self, template: &str, arguments: &[Option<String>]) -> Result<()>;
}

impl<B: HelpBackend + ?Sized> HelpBackend for &B {
    fn invoke(&self, template: &str, arguments: &[Option<String>]) -> Result<()> {
        (**self).invoke(template, arguments)
    }
}

/// Runs help requests in a PowerShell process.
#[derive(Debug, Clone)]
pub struct PowerShellBackend {
    shell: String,
    args: Vec<String>,
}

impl PowerShellBackend {
    /// Creates a backend running `shell` with `args` before `-Command`.
    pub fn new(shell: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            shell: shell.into(),
            args,
        }
    }

    /// Creates a backend from the `[backend]` config section.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.shell.clone(), config.args.clone())
    }

    /// Builds the `-Command` text: the template as a script block invoked
    /// with each argument as a literal.
    pub fn command_text(template: &str, arguments: &[Option<String>]) -> String {
        let mut text = format!("& {{ {template} }}");
        for argument in arguments {
            text.push(' ');
            match argument {
                Some(value) => text.push_str(&quote_literal(value)),
                None => text.push_str("$null"),
            }
        }
        text
    }
}

impl HelpBackend for PowerShellBackend {
    fn invoke(&self, template: &str, arguments: &[Option<String>]) -> Result<()> {
        let text = Self::command_text(template, arguments);
        debug!(shell = %self.shell, command = %text, "invoking help backend");

        let output = Command::new(&self.shell)
            .args(&self.args)
            .arg("-Command")
            .arg(&text)
            .output()
            .map_err(|e| PsHelpError::backend(format!("failed to start '{}': {e}", self.shell)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PsHelpError::backend(format!(
                "'{}' exited with {}: {}",
                self.shell,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Quotes a value as a single-quoted PowerShell literal.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Help text written by the backend to a temporary file.
///
/// The file is removed when this value is dropped unless [`HelpOutput::keep`]
/// is called.
#[derive(Debug)]
pub struct HelpOutput {
    path: TempPath,
}

impl HelpOutput {
    /// Creates an empty temporary output file.
    pub fn create() -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("pshelp-")
            .suffix(".txt")
            .tempfile()?;
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the help text.
    ///
    /// Windows PowerShell redirects output as UTF-16 with a byte order mark,
    /// so a leading BOM selects the decoding.
    pub fn read_to_string(&self) -> Result<String> {
        decode_text(&std::fs::read(&self.path)?)
    }

    /// Keeps the file on disk and returns its path.
    pub fn keep(self) -> Result<PathBuf> {
        self.path.keep().map_err(|e| PsHelpError::Io(e.error))
    }
}

fn decode_text(bytes: &[u8]) -> Result<String> {
    let invalid = |e: &dyn std::fmt::Display| {
        PsHelpError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    };
    let utf16 = |rest: &[u8], from: fn([u8; 2]) -> u16| {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| from([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|e| invalid(&e))
    };

    match bytes {
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).map_err(|e| invalid(&e)),
        _ => String::from_utf8(bytes.to_vec()).map_err(|e| invalid(&e)),
    }
}

/// Fills in the output destination of requests and runs them.
#[derive(Debug, Clone)]
pub struct HelpExecutor<B> {
    backend: B,
}

impl<B: HelpBackend> HelpExecutor<B> {
    /// Creates an executor over `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Runs `request`, returning the file its output was written to.
    pub fn execute(&self, mut request: HelpRequest) -> Result<HelpOutput> {
        let output = HelpOutput::create()?;
        let destination = output
            .path()
            .to_str()
            .ok_or_else(|| PsHelpError::internal("temporary path is not valid UTF-8"))?
            .to_string();
        request.set_output(destination);

        info!(request = %request.describe(), "fetching help");
        self.backend.invoke(&request.template, &request.arguments)?;
        Ok(output)
    }
}
