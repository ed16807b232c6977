//! Command-line argument parsing for pshelp.

use crate::config::Config;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Show PowerShell help for the token under the cursor.
#[derive(Parser, Debug)]
#[command(name = "pshelp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The command line to inspect (e.g., "Get-Item -Force")
    #[arg(value_name = "LINE")]
    pub line: String,

    /// 0-based cursor offset into LINE (defaults to the end of the line)
    #[arg(short = 'c', long, value_name = "OFFSET", allow_negative_numbers = true)]
    pub cursor: Option<i64>,

    /// Print the resolved help request instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the tokens of LINE and exit
    #[arg(long)]
    pub tokens: bool,

    /// Print --dry-run and --tokens output as JSON
    #[arg(long)]
    pub json: bool,

    /// Shell used to run Get-Help (overrides config)
    #[arg(long, value_name = "PATH")]
    pub shell: Option<String>,

    /// Pager used to display help (overrides config and $PAGER)
    #[arg(long, value_name = "COMMAND")]
    pub pager: Option<String>,

    /// Keep the temporary help file after viewing
    #[arg(long)]
    pub keep_output: bool,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to the log file instead of stderr
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns the cursor offset, defaulting to just past the last character.
    pub fn cursor_offset(&self) -> i64 {
        self.cursor
            .unwrap_or_else(|| self.line.chars().count() as i64)
    }

    /// Returns the output format for printed results.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Applies command-line overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(shell) = &self.shell {
            config.backend.shell = shell.clone();
        }
        if let Some(pager) = &self.pager {
            config.viewer.pager = Some(pager.clone());
        }
        if self.keep_output {
            config.viewer.keep_output = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn test_parse_line_and_cursor() {
        let cli = parse_args(&["pshelp", "Get-Item -Force", "--cursor", "11"]);
        assert_eq!(cli.line, "Get-Item -Force");
        assert_eq!(cli.cursor, Some(11));
        assert_eq!(cli.cursor_offset(), 11);
    }

    #[test]
    fn test_short_cursor() {
        let cli = parse_args(&["pshelp", "-c", "3", "Get-Item"]);
        assert_eq!(cli.cursor, Some(3));
    }

    #[test]
    fn test_negative_cursor_is_accepted() {
        let cli = parse_args(&["pshelp", "Get-Item", "--cursor=-1"]);
        assert_eq!(cli.cursor_offset(), -1);
    }

    #[test]
    fn test_cursor_defaults_to_end_of_line() {
        let cli = parse_args(&["pshelp", "Get-Hélp"]);
        assert_eq!(cli.cursor, None);
        assert_eq!(cli.cursor_offset(), 8);
    }

    #[test]
    fn test_output_format() {
        let cli = parse_args(&["pshelp", "ls", "--dry-run", "--json"]);
        assert!(cli.dry_run);
        assert_eq!(cli.output_format(), OutputFormat::Json);

        let cli = parse_args(&["pshelp", "ls", "--tokens"]);
        assert!(cli.tokens);
        assert_eq!(cli.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_parse_config_path() {
        let cli = parse_args(&["pshelp", "ls", "--config", "/path/to/config.toml"]);
        assert_eq!(cli.config_path(), PathBuf::from("/path/to/config.toml"));
    }

    #[test]
    fn test_default_config_path() {
        let cli = parse_args(&["pshelp", "ls"]);
        assert_eq!(cli.config_path(), Config::default_path());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let cli = parse_args(&[
            "pshelp",
            "ls",
            "--shell",
            "powershell.exe",
            "--pager",
            "more",
            "--keep-output",
        ]);
        let mut config = Config::default();
        config.viewer.pager = Some("less".to_string());
        cli.apply_overrides(&mut config);

        assert_eq!(config.backend.shell, "powershell.exe");
        assert_eq!(config.viewer.pager, Some("more".to_string()));
        assert!(config.viewer.keep_output);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = parse_args(&["pshelp", "ls"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.backend.shell, "pwsh");
        assert!(!config.viewer.keep_output);
    }
}
