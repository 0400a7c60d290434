//! Sub-command plumbing shared by every `vstrap` command.
//!
//! Commands return `anyhow::Result`; [`Command::execute`] and
//! [`ProjectCommand::execute`] turn that into a process exit status and make
//! sure the failure is logged.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info};

use crate::paths::PROJECT_FILE;
use crate::project::Project;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 2;

/// Options accepted by every sub-command.
#[derive(Debug, Clone, Default)]
pub struct BaseOptions {
    /// Use this directory as the project root instead of searching upwards.
    pub project_dir: Option<PathBuf>,
    /// Project file name to look for instead of `VEfile`.
    pub config_file: Option<String>,
    pub verbose: u8,
    pub quiet: bool,
}

impl BaseOptions {
    pub fn project_file(&self) -> &str {
        self.config_file.as_deref().unwrap_or(PROJECT_FILE)
    }
}

/// A command that does not need a project.
pub trait Command {
    fn name(&self) -> &'static str;

    fn run(&self, options: &BaseOptions) -> Result<()>;

    fn execute(&self, options: &BaseOptions) -> i32 {
        info!("Running \"{}\" command", self.name());
        exit_status(self.name(), self.run(options))
    }
}

/// A command that runs against the project found from the options.
pub trait ProjectCommand {
    fn name(&self) -> &'static str;

    fn run(&self, project: &Project, options: &BaseOptions) -> Result<()>;

    fn execute(&self, options: &BaseOptions) -> i32 {
        info!("Running \"{}\" command", self.name());
        let result = Project::load(options)
            .context("Failed to load project")
            .and_then(|project| self.run(&project, options));
        exit_status(self.name(), result)
    }

    /// Run against an already loaded project.
    fn execute_with_project(&self, project: &Project, options: &BaseOptions) -> i32 {
        info!("Running \"{}\" command", self.name());
        exit_status(self.name(), self.run(project, options))
    }
}

fn exit_status(name: &str, result: Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            error!("An error occurred executing command \"{}\": {:#}", name, err);
            EXIT_FAILURE
        }
    }
}
