//! Help requests produced by the resolver.
//!
//! A request is a script template with `$args[N]` placeholders plus the
//! positional arguments to bind. Slot 0 is always the output destination and
//! stays empty until the executor fills it.

use serde::Serialize;

/// Index of the reserved output-destination argument.
pub const OUTPUT_SLOT: usize = 0;

const COMMAND_TEMPLATE: &str = "Get-Help $args[1] -Full > $args[0]";
const PARAMETER_TEMPLATE: &str = "Get-Help $args[1] -Parameter $args[2] > $args[0]";
const COMMON_PARAMETERS_TEMPLATE: &str = "Get-Help about_CommonParameters > $args[0]";
const TOPIC_TEMPLATE: &str = "Get-Help $args[1] > $args[0]";
const OPERATORS_TEMPLATE: &str = "Get-Help about_Operators > $args[0]";

/// Prefix of conceptual help topic names.
pub const TOPIC_PREFIX: &str = "about_";

/// Which kind of help a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpKind {
    /// Full help for a command.
    Command,
    /// Help for one parameter of a command.
    Parameter,
    /// The shared common-parameters topic.
    CommonParameters,
    /// A conceptual `about_` topic for a keyword.
    Topic,
    /// The operators topic.
    Operators,
}

/// A resolved, backend-agnostic description of the help to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpRequest {
    pub kind: HelpKind,
    pub template: String,
    pub arguments: Vec<Option<String>>,
}

impl HelpRequest {
    fn new(kind: HelpKind, template: &str, arguments: Vec<Option<String>>) -> Self {
        Self {
            kind,
            template: template.to_string(),
            arguments,
        }
    }

    /// Full help for `command`.
    pub fn command(command: impl Into<String>) -> Self {
        Self::new(
            HelpKind::Command,
            COMMAND_TEMPLATE,
            vec![None, Some(command.into())],
        )
    }

    /// Help for `parameter` of `command`, which may be unknown.
    pub fn parameter(command: Option<String>, parameter: impl Into<String>) -> Self {
        Self::new(
            HelpKind::Parameter,
            PARAMETER_TEMPLATE,
            vec![None, command, Some(parameter.into())],
        )
    }

    /// The common-parameters topic; carries no command argument.
    pub fn common_parameters() -> Self {
        Self::new(HelpKind::CommonParameters, COMMON_PARAMETERS_TEMPLATE, vec![None])
    }

    /// The conceptual topic for a keyword, e.g. `Foreach` gives `about_Foreach`.
    pub fn topic(keyword: &str) -> Self {
        Self::new(
            HelpKind::Topic,
            TOPIC_TEMPLATE,
            vec![None, Some(format!("{TOPIC_PREFIX}{keyword}"))],
        )
    }

    /// The operators topic.
    pub fn operators() -> Self {
        Self::new(HelpKind::Operators, OPERATORS_TEMPLATE, vec![None])
    }

    /// Returns the argument at `index` if it is present and set.
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).and_then(|a| a.as_deref())
    }

    /// Returns the output destination, if one has been assigned.
    pub fn output(&self) -> Option<&str> {
        self.argument(OUTPUT_SLOT)
    }

    /// Fills the reserved output-destination slot.
    pub fn set_output(&mut self, destination: impl Into<String>) {
        let destination = Some(destination.into());
        match self.arguments.get_mut(OUTPUT_SLOT) {
            Some(slot) => *slot = destination,
            None => self.arguments.push(destination),
        }
    }

    /// Short human-readable description of what will be looked up.
    pub fn describe(&self) -> String {
        match self.kind {
            HelpKind::Command => format!("full help for {}", self.argument(1).unwrap_or("?")),
            HelpKind::Parameter => format!(
                "help for parameter {} of {}",
                self.argument(2).unwrap_or("?"),
                self.argument(1).unwrap_or("<no command>")
            ),
            HelpKind::CommonParameters => "about_CommonParameters".to_string(),
            HelpKind::Topic => self.argument(1).unwrap_or("?").to_string(),
            HelpKind::Operators => "about_Operators".to_string(),
        }
    }
}
