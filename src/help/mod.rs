//! Contextual help: resolve the token under the cursor, fetch its help and
//! show it.
//!
//! Resolution ([`resolver`]) is pure. Fetching ([`executor`]) and display
//! ([`viewer`]) go through the [`HelpBackend`] and [`HelpViewer`] traits.

pub mod executor;
pub mod request;
pub mod resolver;
pub mod viewer;

pub use executor::{HelpBackend, HelpExecutor, HelpOutput, PowerShellBackend};
pub use request::{HelpKind, HelpRequest};
pub use resolver::{resolve_tokens, HelpResolver, COMMON_PARAMETERS};
pub use viewer::{HelpViewer, PagerViewer, ViewerRequest};

use tracing::info;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::tokenizer::Tokenizer;

/// Ties resolution, execution and display together.
pub struct HelpSession<T, B, V> {
    resolver: HelpResolver<T>,
    executor: HelpExecutor<B>,
    viewer: V,
    title: String,
    keep_output: bool,
}

impl<T, B, V> HelpSession<T, B, V>
where
    T: Tokenizer,
    B: HelpBackend,
    V: HelpViewer,
{
    pub fn new(tokenizer: T, backend: B, viewer: V, config: &ViewerConfig) -> Self {
        Self {
            resolver: HelpResolver::new(tokenizer),
            executor: HelpExecutor::new(backend),
            viewer,
            title: config.title.clone(),
            keep_output: config.keep_output,
        }
    }

    /// Resolves the request for `line` at `cursor` without running it.
    pub fn resolve(&self, line: &str, cursor: i64) -> Option<HelpRequest> {
        self.resolver.resolve(line, cursor)
    }

    /// Shows help for the token under the cursor.
    ///
    /// Returns `Ok(false)` without doing anything when no help applies.
    pub fn show(&self, line: &str, cursor: i64) -> Result<bool> {
        let Some(request) = self.resolve(line, cursor) else {
            info!(cursor, "no help available");
            return Ok(false);
        };

        let output = self.executor.execute(request)?;
        let mut view = ViewerRequest::new(output).with_title(self.title.clone());
        if self.keep_output {
            view = view.keep_source();
        }
        self.viewer.open(view)?;
        Ok(true)
    }
}
