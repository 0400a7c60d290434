//! CLI entry point for vstrap.

mod cli;
mod cmd;

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use cmd::{
    CompletionCommand, InfoCommand, InitCommand, ManCommand, RequirementsCommand, VersionCommand,
};
use virtstrap::command::{BaseOptions, Command, ProjectCommand};

/// Environment variable holding a tracing filter directive, e.g. `VSTRAP_LOG=debug`.
const LOG_ENV_VAR: &str = "VSTRAP_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = BaseOptions::from(cli.global);
    init_tracing(&options);

    let status = match cli.command {
        Commands::Init { name, force } => InitCommand { name, force }.execute(&options),
        Commands::Requirements { output, save } => {
            RequirementsCommand { output, save }.execute(&options)
        }
        Commands::Info { format } => InfoCommand { format }.execute(&options),
        Commands::Version => VersionCommand.execute(&options),
        Commands::Completion { shell } => CompletionCommand { shell }.execute(&options),
        Commands::Man { out_dir } => ManCommand { out_dir }.execute(&options),
    };

    ExitCode::from(u8::try_from(status).unwrap_or(u8::MAX))
}

fn init_tracing(options: &BaseOptions) {
    let level = if options.quiet {
        LevelFilter::ERROR
    } else {
        match options.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
