//! Displaying fetched help.

use std::io::Write;
use std::process::Command;

use tracing::{debug, info};

use super::executor::HelpOutput;
use crate::error::{PsHelpError, Result};

/// How to present a help output file.
#[derive(Debug)]
pub struct ViewerRequest {
    pub output: HelpOutput,
    pub title: String,
    /// Delete the output file once the viewer closes.
    pub delete_source: bool,
    /// Keep the viewed file out of the viewer's navigation history.
    pub disable_history: bool,
}

impl ViewerRequest {
    /// Read-only view titled "Help" that deletes its source and records no history.
    pub fn new(output: HelpOutput) -> Self {
        Self {
            output,
            title: "Help".to_string(),
            delete_source: true,
            disable_history: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn keep_source(mut self) -> Self {
        self.delete_source = false;
        self
    }

    /// Disposes of the output file per `delete_source`.
    fn close(self) -> Result<()> {
        if self.delete_source {
            drop(self.output);
        } else {
            let path = self.output.keep()?;
            info!(path = %path.display(), "help output kept");
        }
        Ok(())
    }
}

/// Opens help output for the user.
pub trait HelpViewer {
    fn open(&self, request: ViewerRequest) -> Result<()>;
}

impl<V: HelpViewer + ?Sized> HelpViewer for &V {
    fn open(&self, request: ViewerRequest) -> Result<()> {
        (**self).open(request)
    }
}

/// Shows help in an external pager, or on stdout when no pager is set.
#[derive(Debug, Clone, Default)]
pub struct PagerViewer {
    pager: Option<String>,
}

impl PagerViewer {
    /// Creates a viewer; `pager` is a command line such as `less -R`.
    pub fn new(pager: Option<String>) -> Self {
        Self {
            pager: pager.filter(|p| !p.trim().is_empty()),
        }
    }

    /// Writes the titled help text to `out`, then closes the request.
    pub fn present<W: Write>(&self, request: ViewerRequest, out: &mut W) -> Result<()> {
        let shown = write_titled(&request, out);
        let closed = request.close();
        shown.and(closed)
    }

    fn run_pager(&self, pager: &str, request: ViewerRequest) -> Result<()> {
        let shown = self.spawn_pager(pager, &request);
        let closed = request.close();
        shown.and(closed)
    }

    fn spawn_pager(&self, pager: &str, request: &ViewerRequest) -> Result<()> {
        let mut parts = pager.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| PsHelpError::viewer("empty pager command"))?;

        let mut command = Command::new(program);
        command.args(parts).arg(request.output.path());
        if request.disable_history {
            command.env("LESSHISTFILE", "-");
        }

        debug!(pager = %pager, title = %request.title, "opening pager");
        let status = command
            .status()
            .map_err(|e| PsHelpError::viewer(format!("failed to start pager '{program}': {e}")))?;
        if !status.success() {
            return Err(PsHelpError::viewer(format!(
                "pager '{program}' exited with {status}"
            )));
        }
        Ok(())
    }
}

fn write_titled<W: Write>(request: &ViewerRequest, out: &mut W) -> Result<()> {
    let text = request.output.read_to_string()?;
    writeln!(out, "== {} ==", request.title)?;
    writeln!(out)?;
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

impl HelpViewer for PagerViewer {
    fn open(&self, request: ViewerRequest) -> Result<()> {
        match &self.pager {
            Some(pager) => self.run_pager(pager, request),
            None => self.present(request, &mut std::io::stdout().lock()),
        }
    }
}
