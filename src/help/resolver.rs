//! Contextual help resolution.
//!
//! Finds the token under the cursor and turns it into a [`HelpRequest`].
//! Resolution is pure: it never does I/O and never fails, it either yields a
//! request or nothing.

use tracing::debug;

use super::request::HelpRequest;
use crate::tokenizer::{LineTokenizer, Token, TokenKind, Tokenizer};

/// Parameters shared by all cmdlets, documented in one common topic.
pub const COMMON_PARAMETERS: &[&str] = &[
    "VERBOSE",
    "DEBUG",
    "ERRORACTION",
    "ERRORVARIABLE",
    "WARNINGACTION",
    "WARNINGVARIABLE",
    "OUTVARIABLE",
    "OUTBUFFER",
    "WHATIF",
    "CONFIRM",
];

/// Strips leading dashes and uppercases a parameter token.
pub fn normalize_parameter(content: &str) -> String {
    content.trim_start_matches('-').to_uppercase()
}

/// Returns true if `name` is a common parameter, ignoring case and dashes.
pub fn is_common_parameter(name: &str) -> bool {
    let normalized = normalize_parameter(name);
    COMMON_PARAMETERS.contains(&normalized.as_str())
}

/// Resolves help for the token covering `cursor` in an already tokenized line.
pub fn resolve_tokens(tokens: &[Token], cursor: i64) -> Option<HelpRequest> {
    let mut current_command: Option<&str> = None;

    for token in tokens {
        if token.kind == TokenKind::Command {
            current_command = Some(token.content.as_str());
        }

        if !token.covers(cursor) {
            continue;
        }

        debug!(kind = %token.kind, content = %token.content, cursor, "token under cursor");
        return match token.kind {
            TokenKind::Command => current_command.map(HelpRequest::command),
            TokenKind::CommandParameter => {
                let parameter = normalize_parameter(&token.content);
                if COMMON_PARAMETERS.contains(&parameter.as_str()) {
                    Some(HelpRequest::common_parameters())
                } else {
                    Some(HelpRequest::parameter(
                        current_command.map(str::to_string),
                        parameter,
                    ))
                }
            }
            TokenKind::Keyword => Some(HelpRequest::topic(&token.content)),
            TokenKind::Operator => Some(HelpRequest::operators()),
            _ => None,
        };
    }

    None
}

/// Resolves contextual help for a line through a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct HelpResolver<T = LineTokenizer> {
    tokenizer: T,
}

impl<T: Tokenizer> HelpResolver<T> {
    /// Creates a resolver backed by `tokenizer`.
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Returns the help request for the token under `cursor`, if any.
    ///
    /// `cursor` is a 0-based character offset into `line`. Offsets outside
    /// the line, including negative ones, simply match nothing.
    pub fn resolve(&self, line: &str, cursor: i64) -> Option<HelpRequest> {
        let tokenized = self.tokenizer.tokenize(line);
        for error in &tokenized.errors {
            debug!(%error, "ignoring tokenizer error");
        }

        let request = resolve_tokens(&tokenized.tokens, cursor);
        if request.is_none() {
            debug!(cursor, "no help available at cursor");
        }
        request
    }
}
