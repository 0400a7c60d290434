//! Project discovery.
//!
//! A project is the nearest directory, walking up from where `vstrap` runs,
//! that contains a project file (`VEfile` unless overridden).

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::command::BaseOptions;
use crate::config::ProjectConfig;
use crate::paths::{ENV_DIR, PROJECT_FILE};
use crate::requirements::{RequirementSet, RequirementsConfigError};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("No {file} found in {} or any parent directory", .start.display())]
    NotFound { start: PathBuf, file: String },

    #[error("No {file} found in project directory {}", .root.display())]
    MissingConfig { root: PathBuf, file: String },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid requirements: {0}")]
    Requirements(#[from] RequirementsConfigError),
}

#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    root: PathBuf,
    config_path: PathBuf,
    config: ProjectConfig,
    requirements: RequirementSet,
}

impl Project {
    /// Load the project selected by the command-line options: `--project-dir`
    /// when given, otherwise the nearest project above the current directory.
    pub fn load(options: &BaseOptions) -> Result<Self, ProjectError> {
        let file = options.project_file();
        match &options.project_dir {
            Some(dir) => Self::open(dir, file),
            None => {
                let cwd = std::env::current_dir().map_err(|source| ProjectError::Io {
                    path: PathBuf::from("."),
                    source,
                })?;
                Self::discover_with(&cwd, file)
            }
        }
    }

    pub fn discover(start: &Path) -> Result<Self, ProjectError> {
        Self::discover_with(start, PROJECT_FILE)
    }

    /// `start` may be relative; it is resolved before walking up.
    pub fn discover_with(start: &Path, file: &str) -> Result<Self, ProjectError> {
        let absolute = fs::canonicalize(start).map_err(|source| ProjectError::Io {
            path: start.to_path_buf(),
            source,
        })?;
        let root = find_project_root(&absolute, file).ok_or_else(|| ProjectError::NotFound {
            start: start.to_path_buf(),
            file: file.to_string(),
        })?;
        Self::open(&root, file)
    }

    /// Open the project rooted exactly at `root`.
    pub fn open(root: &Path, file: &str) -> Result<Self, ProjectError> {
        let root = fs::canonicalize(root).map_err(|source| ProjectError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let config_path = root.join(file);
        if !config_path.is_file() {
            return Err(ProjectError::MissingConfig {
                root,
                file: file.to_string(),
            });
        }

        let config = ProjectConfig::load_from(&config_path)?;
        let requirements = config.requirement_set()?;

        let name = config
            .project_name
            .clone()
            .or_else(|| {
                root.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "project".to_string());

        debug!(
            name = %name,
            root = %root.display(),
            requirements = requirements.len(),
            "loaded project"
        );

        Ok(Self {
            name,
            root,
            config_path,
            config,
            requirements,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    /// Path relative to the project root.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// The project's environment directory (`<root>/.vs.env`).
    pub fn env_path(&self) -> PathBuf {
        self.path(ENV_DIR)
    }
}

/// Nearest ancestor of `start` (inclusive) that holds `file`.
pub fn find_project_root(start: &Path, file: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(file).is_file())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn sample_project(tmp: &TempDir) -> PathBuf {
        let root = tmp.path().join("sample_project");
        fs::create_dir_all(root.join("lev1/lev2")).unwrap();
        fs::write(
            root.join(PROJECT_FILE),
            "requirements:\n  - ipython\n  - werkzeug: '==0.8'\n",
        )
        .unwrap();
        root
    }

    #[test]
    fn test_discover_from_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let root = sample_project(&tmp);

        let project = Project::discover(&root.join("lev1/lev2")).unwrap();
        assert_eq!(project.name(), "sample_project");
        assert_eq!(project.root(), fs::canonicalize(&root).unwrap());
        assert!(project.env_path().ends_with("sample_project/.vs.env"));
        assert_eq!(project.requirements().to_pip_str(), "ipython\nwerkzeug==0.8");
    }

    #[test]
    fn test_discover_without_project_file() {
        let tmp = TempDir::new().unwrap();
        let err = Project::discover_with(tmp.path(), "VEfile.missing-in-tests").unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_project_name_from_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(PROJECT_FILE), "project_name: renamed\n").unwrap();

        let project = Project::open(tmp.path(), PROJECT_FILE).unwrap();
        assert_eq!(project.name(), "renamed");
        assert!(project.requirements().is_empty());
    }

    #[test]
    fn test_open_requires_project_file() {
        let tmp = TempDir::new().unwrap();
        let err = Project::open(tmp.path(), PROJECT_FILE).unwrap_err();
        assert!(matches!(err, ProjectError::MissingConfig { .. }));
    }

    #[test]
    fn test_open_surfaces_requirements_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(PROJECT_FILE),
            "requirements:\n  - {a: '1', b: '2'}\n",
        )
        .unwrap();

        let err = Project::open(tmp.path(), PROJECT_FILE).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Requirements(RequirementsConfigError::NotSingleKey { .. })
        ));
    }

    #[test]
    fn test_custom_project_file_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("VEfile.dev"), "requirements: [nose]\n").unwrap();
        let nested = tmp.path().join("src");
        fs::create_dir_all(&nested).unwrap();

        let project = Project::discover_with(&nested, "VEfile.dev").unwrap();
        assert_eq!(project.requirements().to_pip_str(), "nose");
    }

    #[test]
    #[serial]
    fn test_load_walks_up_from_current_dir() {
        let tmp = TempDir::new().unwrap();
        let root = sample_project(&tmp);
        let previous = std::env::current_dir().unwrap();

        std::env::set_current_dir(root.join("lev1/lev2")).unwrap();
        let result = Project::load(&BaseOptions::default());
        std::env::set_current_dir(previous).unwrap();

        assert_eq!(result.unwrap().name(), "sample_project");
    }

    #[test]
    #[serial]
    fn test_discover_relative_start_walks_up() {
        let tmp = TempDir::new().unwrap();
        let root = sample_project(&tmp);
        let previous = std::env::current_dir().unwrap();

        std::env::set_current_dir(root.join("lev1/lev2")).unwrap();
        let result = Project::discover(Path::new("."));
        std::env::set_current_dir(previous).unwrap();

        let project = result.unwrap();
        assert_eq!(project.name(), "sample_project");
        assert_eq!(project.root(), fs::canonicalize(&root).unwrap());
    }

    #[test]
    fn test_discover_missing_start_dir() {
        let tmp = TempDir::new().unwrap();
        let err = Project::discover(&tmp.path().join("does-not-exist")).unwrap_err();
        assert!(matches!(err, ProjectError::Io { .. }));
    }

    #[test]
    fn test_load_with_project_dir() {
        let tmp = TempDir::new().unwrap();
        let root = sample_project(&tmp);
        let options = BaseOptions {
            project_dir: Some(root),
            ..BaseOptions::default()
        };

        let project = Project::load(&options).unwrap();
        assert_eq!(project.requirements().len(), 2);
    }
}
