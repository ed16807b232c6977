//! End-to-end help sessions with in-process backend and viewer.

use std::cell::RefCell;
use std::path::PathBuf;

use pshelp::config::ViewerConfig;
use pshelp::error::{PsHelpError, Result};
use pshelp::help::{HelpBackend, HelpSession, HelpViewer, PagerViewer, ViewerRequest};
use pshelp::tokenizer::LineTokenizer;

/// Backend that answers every request with its own arguments.
#[derive(Default)]
struct EchoBackend {
    destinations: RefCell<Vec<PathBuf>>,
}

impl HelpBackend for EchoBackend {
    fn invoke(&self, template: &str, arguments: &[Option<String>]) -> Result<()> {
        let destination = arguments[0]
            .as_deref()
            .ok_or_else(|| PsHelpError::internal("output slot not filled"))?;
        let shown: Vec<&str> = arguments[1..]
            .iter()
            .map(|a| a.as_deref().unwrap_or("$null"))
            .collect();
        std::fs::write(destination, format!("{template}\n{}\n", shown.join(" ")))?;
        self.destinations
            .borrow_mut()
            .push(PathBuf::from(destination));
        Ok(())
    }
}

/// Viewer that writes into a buffer through `PagerViewer::present`.
#[derive(Default)]
struct BufferViewer {
    buffer: RefCell<Vec<u8>>,
}

impl HelpViewer for BufferViewer {
    fn open(&self, request: ViewerRequest) -> Result<()> {
        PagerViewer::new(None).present(request, &mut *self.buffer.borrow_mut())
    }
}

#[test]
fn test_parameter_help_end_to_end() {
    let backend = EchoBackend::default();
    let viewer = BufferViewer::default();
    let session = HelpSession::new(
        LineTokenizer::new(),
        &backend,
        &viewer,
        &ViewerConfig::default(),
    );

    assert!(session.show("Get-Item -Force", 11).unwrap());

    let text = String::from_utf8(viewer.buffer.borrow().clone()).unwrap();
    assert_eq!(
        text,
        "== Help ==\n\nGet-Help $args[1] -Parameter $args[2] > $args[0]\nGet-Item FORCE\n"
    );

    // The temporary output is deleted once the viewer closes.
    let destinations = backend.destinations.borrow();
    assert_eq!(destinations.len(), 1);
    assert!(!destinations[0].exists());
}

#[test]
fn test_keep_output_leaves_file() {
    let backend = EchoBackend::default();
    let viewer = BufferViewer::default();
    let config = ViewerConfig {
        keep_output: true,
        ..Default::default()
    };
    let session = HelpSession::new(LineTokenizer::new(), &backend, &viewer, &config);

    assert!(session.show("1 -band 3", 3).unwrap());

    let destinations = backend.destinations.borrow();
    assert!(destinations[0].exists());
    std::fs::remove_file(&destinations[0]).unwrap();
}

#[test]
fn test_unhelpful_cursor_takes_no_action() {
    let backend = EchoBackend::default();
    let viewer = BufferViewer::default();
    let session = HelpSession::new(
        LineTokenizer::new(),
        &backend,
        &viewer,
        &ViewerConfig::default(),
    );

    assert!(!session.show("Get-Item C:\\Windows", 12).unwrap());
    assert!(!session.show("Get-Item", -5).unwrap());
    assert!(backend.destinations.borrow().is_empty());
    assert!(viewer.buffer.borrow().is_empty());
}
