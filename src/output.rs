//! Formatting of tokens and help requests for the terminal.

use crate::help::HelpRequest;
use crate::tokenizer::Tokenized;

/// Output format for `--tokens` and `--dry-run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Message printed when nothing under the cursor has help.
pub const NO_HELP: &str = "No help available";

/// Formats a token table, followed by any tokenizer errors.
pub fn format_tokens(tokenized: &Tokenized, format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(tokenized);
    }

    let mut out = String::from("START  END  KIND                CONTENT\n");
    for token in &tokenized.tokens {
        out.push_str(&format!(
            "{:>5} {:>4}  {:<18}  {}\n",
            token.start,
            token.end,
            token.kind.name(),
            token.content
        ));
    }
    for error in &tokenized.errors {
        out.push_str(&format!("error: {error}\n"));
    }
    Ok(out)
}

/// Formats the outcome of a resolution.
pub fn format_request(
    request: Option<&HelpRequest>,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match (request, format) {
        (Some(request), OutputFormat::Json) => serde_json::to_string_pretty(request),
        (None, OutputFormat::Json) => Ok("null".to_string()),
        (None, OutputFormat::Text) => Ok(NO_HELP.to_string()),
        (Some(request), OutputFormat::Text) => {
            let arguments = request
                .arguments
                .iter()
                .map(|a| a.as_deref().unwrap_or("$null"))
                .collect::<Vec<_>>()
                .join(", ");
            Ok(format!(
                "{}\n  template:  {}\n  arguments: [{}]",
                request.describe(),
                request.template,
                arguments
            ))
        }
    }
}
