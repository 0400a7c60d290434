//! CLI argument definitions for vstrap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use virtstrap::command::BaseOptions;

#[derive(Parser)]
#[command(name = "vstrap")]
#[command(version)]
#[command(about = "Bootstrap a project environment from its VEfile", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    vstrap init                 Create a starter VEfile in the current directory\n    vstrap requirements         Print the requirements file for the current project"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Project root to use instead of searching upwards from the current directory
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Project file name to look for
    #[arg(long, global = true, value_name = "NAME")]
    pub config_file: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl From<GlobalArgs> for BaseOptions {
    fn from(args: GlobalArgs) -> Self {
        BaseOptions {
            project_dir: args.project_dir,
            config_file: args.config_file,
            verbose: args.verbose,
            quiet: args.quiet,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a starter VEfile in the current directory (or --project-dir)
    Init {
        /// Project name to record in the VEfile
        #[arg(long)]
        name: Option<String>,
        /// Overwrite an existing VEfile
        #[arg(long)]
        force: bool,
    },
    /// Render the project's requirements in installer format
    Requirements {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH", conflicts_with = "save")]
        output: Option<PathBuf>,
        /// Write to requirements.txt inside the project's environment directory
        #[arg(long)]
        save: bool,
    },
    /// Show where the current project lives
    Info {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show version information (add -v for commit and build date)
    Version,
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate the man page
    Man {
        /// Directory to write vstrap.1 into
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
