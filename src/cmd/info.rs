//! `vstrap info`: show the resolved project.

use anyhow::Result;
use colored::Colorize;

use virtstrap::command::{BaseOptions, ProjectCommand};
use virtstrap::project::Project;

use crate::cli::OutputFormat;

pub struct InfoCommand {
    pub format: OutputFormat,
}

impl ProjectCommand for InfoCommand {
    fn name(&self) -> &'static str {
        "info"
    }

    fn run(&self, project: &Project, _options: &BaseOptions) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let info = serde_json::json!({
                    "name": project.name(),
                    "root": project.root().display().to_string(),
                    "project_file": project.config_path().display().to_string(),
                    "env_path": project.env_path().display().to_string(),
                    "requirements": project.requirements().names().collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            }
            OutputFormat::Text => {
                println!("{} {}", "Project:".bold(), project.name());
                println!("{} {}", "Root:".bold(), project.root().display());
                println!("{} {}", "Project file:".bold(), project.config_path().display());
                println!("{} {}", "Environment:".bold(), project.env_path().display());
                println!(
                    "{} {}",
                    "Requirements:".bold(),
                    project.requirements().len()
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use virtstrap::paths::PROJECT_FILE;

    #[cfg(unix)]
    #[test]
    fn test_json_info_with_non_utf8_root() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(OsStr::from_bytes(b"proj\xff"));
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(PROJECT_FILE), "requirements: [nose]\n").unwrap();

        let project = Project::open(&root, PROJECT_FILE).unwrap();
        let command = InfoCommand {
            format: OutputFormat::Json,
        };
        assert!(command.run(&project, &BaseOptions::default()).is_ok());
    }
}
