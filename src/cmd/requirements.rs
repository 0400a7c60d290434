//! `vstrap requirements`: render the project's requirements file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use virtstrap::command::{BaseOptions, ProjectCommand};
use virtstrap::paths::REQUIREMENTS_FILE;
use virtstrap::project::Project;

pub struct RequirementsCommand {
    pub output: Option<PathBuf>,
    /// Write into the project's environment directory.
    pub save: bool,
}

impl RequirementsCommand {
    fn target(&self, project: &Project) -> Option<PathBuf> {
        if self.save {
            return Some(project.env_path().join(REQUIREMENTS_FILE));
        }
        self.output.clone()
    }
}

impl ProjectCommand for RequirementsCommand {
    fn name(&self) -> &'static str {
        "requirements"
    }

    fn run(&self, project: &Project, options: &BaseOptions) -> Result<()> {
        let requirements = project.requirements();
        let body = requirements.to_pip_str();
        debug!(count = requirements.len(), "rendered requirements");

        match self.target(project) {
            Some(path) => {
                write_requirements(&path, &body)?;
                info!("Wrote {} requirements to {}", requirements.len(), path.display());
                if !options.quiet {
                    println!(
                        "{} Wrote {} requirement(s) to {}",
                        "✓".green(),
                        requirements.len(),
                        path.display()
                    );
                }
            }
            None if body.is_empty() => {}
            None => println!("{}", body),
        }

        Ok(())
    }
}

/// Files end with a newline; an empty set produces an empty file.
fn write_requirements(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut content = body.to_string();
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
