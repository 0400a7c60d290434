//! # Virtstrap
//!
//! Virtstrap bootstraps a project's Python environment from a declarative
//! `VEfile` at the project root.
//!
//! ## Modules
//!
//! - [`requirements`] - Requirement decoding and requirements-file rendering
//! - [`config`] - Project file parsing
//! - [`project`] - Project discovery from the current directory
//! - [`command`] - Sub-command traits and exit status handling
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use virtstrap::project::Project;
//!
//! let project = Project::discover(Path::new(".")).expect("Failed to find project");
//! println!("{}", project.requirements().to_pip_str());
//! ```

pub mod command;
pub mod config;
pub mod project;
pub mod requirements;

/// Default file and directory names inside a project.
pub mod paths {
    /// Project file looked up from the current directory: `VEfile`
    pub const PROJECT_FILE: &str = "VEfile";
    /// Environment directory under the project root: `.vs.env`
    pub const ENV_DIR: &str = ".vs.env";
    /// Requirements file written into the environment directory
    pub const REQUIREMENTS_FILE: &str = "requirements.txt";
}
