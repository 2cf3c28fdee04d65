//! LineSight ingestion CLI.

use clap::{ColorChoice, Parser};
use linesight_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use linesight_api::IngestClient;
use linesight_app::{AppState, ColorMode, ThemeState};
use linesight_map::DraftRepository;

use crate::cli::{Cli, LogFormatArg, LogLevelArg, ThemeArg};
use crate::commands::Context;
use crate::summary::print_toasts;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let client = match IngestClient::new(&cli.api_url) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    let drafts = match DraftRepository::new(&cli.drafts_dir) {
        Ok(drafts) => drafts,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    let theme = ThemeState::new(match cli.theme {
        ThemeArg::Dark => ColorMode::Dark,
        ThemeArg::Light => ColorMode::Light,
    });
    let mut ctx = Context {
        client,
        drafts,
        state: AppState::new(theme),
    };

    let exit_code = match commands::run(cli.command, &mut ctx).await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    };
    print_toasts(&ctx.state.toasts);
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
