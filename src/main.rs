//! pshelp - Contextual help for PowerShell command lines.

use anyhow::Context;
use pshelp::cli::Cli;
use pshelp::config::Config;
use pshelp::error::PsHelpError;
use pshelp::help::{HelpSession, PagerViewer, PowerShellBackend};
use pshelp::logging;
use pshelp::output::{format_request, format_tokens, NO_HELP};
use pshelp::tokenizer::{LineTokenizer, Tokenizer};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args();

    if cli.log_file {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    if let Err(e) = run(&cli) {
        let category = e
            .downcast_ref::<PsHelpError>()
            .map_or("Error", PsHelpError::category);
        error!("{category}: {e:#}");
        eprintln!("{category}: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let format = cli.output_format();
    let cursor = cli.cursor_offset();

    if cli.tokens {
        let tokenized = LineTokenizer::new().tokenize(&cli.line);
        println!("{}", format_tokens(&tokenized, format)?.trim_end());
        return Ok(());
    }

    // Precedence: CLI arguments, then config file, then environment
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.apply_env_defaults();
    cli.apply_overrides(&mut config);

    let session = HelpSession::new(
        LineTokenizer::new(),
        PowerShellBackend::from_config(&config.backend),
        PagerViewer::new(config.viewer.pager.clone()),
        &config.viewer,
    );

    if cli.dry_run {
        let request = session.resolve(&cli.line, cursor);
        println!("{}", format_request(request.as_ref(), format)?);
        return Ok(());
    }

    if !session.show(&cli.line, cursor)? {
        println!("{NO_HELP}");
    }
    Ok(())
}
