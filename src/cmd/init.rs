//! Initialize a project directory with a starter VEfile.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use virtstrap::command::{BaseOptions, Command};

pub struct InitCommand {
    /// Recorded as `project_name`; the directory name is used when absent.
    pub name: Option<String>,
    pub force: bool,
}

impl InitCommand {
    fn render(&self) -> Result<String> {
        let name_line = match &self.name {
            Some(name) => {
                let mut header = Mapping::new();
                header.insert(Value::from("project_name"), Value::from(name.as_str()));
                serde_yaml::to_string(&header).context("Failed to render project name")?
            }
            None => "# project_name: my-project\n".to_string(),
        };

        Ok(format!(
            "{}\
             requirements:\n\
             \x20 # - ipython\n\
             \x20 # - werkzeug: '==0.8'\n\
             \x20 # - jinja2:\n\
             \x20 #   - git+https://github.com/mitsuhiko/jinja2.git\n\
             \x20 #   - editable: true\n\
             \x20 #     at: 2.10.x\n",
            name_line
        ))
    }
}

impl Command for InitCommand {
    fn name(&self) -> &'static str {
        "init"
    }

    fn run(&self, options: &BaseOptions) -> Result<()> {
        let dir = match &options.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        let target_path: PathBuf = dir.join(options.project_file());

        if target_path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists. Use --force to overwrite.",
                target_path.display()
            );
        }

        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        fs::write(&target_path, self.render()?)
            .with_context(|| format!("Failed to write {}", target_path.display()))?;
        info!("Created {}", target_path.display());

        if !options.quiet {
            println!("{} Created {}", "✓".green(), target_path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtstrap::config::ProjectConfig;

    #[test]
    fn test_starter_file_parses_without_requirements() {
        let command = InitCommand {
            name: None,
            force: false,
        };
        let config = ProjectConfig::parse(&command.render().unwrap()).unwrap();
        assert!(config.project_name.is_none());
        assert!(config.requirement_set().unwrap().is_empty());
    }

    #[test]
    fn test_starter_file_records_name() {
        let command = InitCommand {
            name: Some("it's mine".to_string()),
            force: false,
        };
        let config = ProjectConfig::parse(&command.render().unwrap()).unwrap();
        assert_eq!(config.project_name.as_deref(), Some("it's mine"));
    }

    #[test]
    fn test_starter_file_keeps_multiline_name() {
        let command = InitCommand {
            name: Some("first line\nsecond: line".to_string()),
            force: false,
        };
        let config = ProjectConfig::parse(&command.render().unwrap()).unwrap();
        assert_eq!(
            config.project_name.as_deref(),
            Some("first line\nsecond: line")
        );
    }
}
