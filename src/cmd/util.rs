//! Utility commands: version report, shell completions and the man page.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use virtstrap::command::{BaseOptions, Command};
use virtstrap::paths::ENV_DIR;
use virtstrap::project::Project;

use crate::cli::Cli;

const BIN_NAME: &str = "vstrap";

/// `vstrap version`. With `-v` it also reports the build and which project,
/// if any, the current options resolve to.
pub struct VersionCommand;

impl VersionCommand {
    fn report(&self, options: &BaseOptions) -> Vec<String> {
        let mut lines = vec![format!("{} {}", BIN_NAME, env!("CARGO_PKG_VERSION"))];
        if options.verbose == 0 {
            return lines;
        }

        lines.push(format!("commit: {}", env!("GIT_SHA")));
        lines.push(format!("built: {}", env!("BUILD_DATE")));
        lines.push(format!("project file: {}", options.project_file()));
        lines.push(format!("env directory: {}", ENV_DIR));

        match Project::load(options) {
            Ok(project) => lines.push(format!(
                "project: {} ({})",
                project.name(),
                project.root().display()
            )),
            Err(err) => {
                debug!("no project for version report: {}", err);
                lines.push("project: none".to_string());
            }
        }
        lines
    }
}

impl Command for VersionCommand {
    fn name(&self) -> &'static str {
        "version"
    }

    fn run(&self, options: &BaseOptions) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        for line in self.report(options) {
            writeln!(stdout, "{}", line).context("Failed to write version")?;
        }
        Ok(())
    }
}

/// `vstrap completion <shell>`
pub struct CompletionCommand {
    pub shell: Shell,
}

impl CompletionCommand {
    fn render(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        clap_complete::generate(self.shell, &mut Cli::command(), BIN_NAME, &mut buffer);
        buffer
    }
}

impl Command for CompletionCommand {
    fn name(&self) -> &'static str {
        "completion"
    }

    fn run(&self, _options: &BaseOptions) -> Result<()> {
        std::io::stdout()
            .lock()
            .write_all(&self.render())
            .with_context(|| format!("Failed to write {} completions", self.shell))
    }
}

/// `vstrap man [--out-dir DIR]`, written to `<DIR>/vstrap.1`.
pub struct ManCommand {
    pub out_dir: Option<PathBuf>,
}

impl ManCommand {
    fn target(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format!("{}.1", BIN_NAME))
    }
}

impl Command for ManCommand {
    fn name(&self) -> &'static str {
        "man"
    }

    fn run(&self, options: &BaseOptions) -> Result<()> {
        let mut buffer = Vec::new();
        clap_mangen::Man::new(Cli::command())
            .render(&mut buffer)
            .context("Failed to render man page")?;

        let man_path = self.target();
        if let Some(parent) = man_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&man_path, buffer)
            .with_context(|| format!("Failed to write {}", man_path.display()))?;

        if !options.quiet {
            println!("Man page written to: {}", man_path.display());
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

    #[test]
    fn test_version_report_plain() {
        let lines = VersionCommand.report(&BaseOptions::default());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("vstrap "));
    }

    #[test]
    fn test_version_report_verbose_names_project() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("sample_project");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(PROJECT_FILE), "").unwrap();

        let options = BaseOptions {
            project_dir: Some(root),
            verbose: 1,
            ..BaseOptions::default()
        };
        let lines = VersionCommand.report(&options);
        assert!(lines.contains(&"project file: VEfile".to_string()));
        assert!(lines.contains(&"env directory: .vs.env".to_string()));
        assert!(lines.iter().any(|line| line.starts_with("project: sample_project (")));
    }

    #[test]
    fn test_version_report_verbose_without_project() {
        let tmp = TempDir::new().unwrap();
        let options = BaseOptions {
            project_dir: Some(tmp.path().to_path_buf()),
            config_file: Some("VEfile.dev".to_string()),
            verbose: 1,
            ..BaseOptions::default()
        };
        let lines = VersionCommand.report(&options);
        assert!(lines.contains(&"project file: VEfile.dev".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("project: none"));
    }

    #[test]
    fn test_completion_mentions_subcommands() {
        let script = CompletionCommand { shell: Shell::Bash }.render();
        let script = String::from_utf8(script).unwrap();
        assert!(script.contains("vstrap"));
        assert!(script.contains("requirements"));
    }

    #[test]
    fn test_man_writes_page() {
        let tmp = TempDir::new().unwrap();
        let command = ManCommand {
            out_dir: Some(tmp.path().join("man")),
        };
        let options = BaseOptions {
            quiet: true,
            ..BaseOptions::default()
        };

        assert!(command.run(&options).is_ok());
        let page = fs::read_to_string(tmp.path().join("man/vstrap.1")).unwrap();
        assert!(page.contains("vstrap"));
    }
}
