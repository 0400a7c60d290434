//! Project file (`VEfile`) parsing.
//!
//! The project file is plain YAML:
//!
//! ```yaml
//! project_name: sample_project
//! requirements:
//!   - ipython
//!   - werkzeug: '==0.8'
//!   - jinja2:
//!     - git+https://github.com/mitsuhiko/jinja2.git
//!     - editable: true
//! ```

use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

use crate::project::ProjectError;
use crate::requirements::{RequirementSet, RequirementsConfigError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Overrides the project directory's name.
    #[serde(default)]
    pub project_name: Option<String>,
    /// Raw requirement entries; decoded by [`ProjectConfig::requirement_set`].
    /// `None` when the key is missing or left empty.
    #[serde(default)]
    pub requirements: Option<Vec<Value>>,
}

impl ProjectConfig {
    pub fn load_from(path: &Path) -> Result<Self, ProjectError> {
        let content = fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ProjectError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An empty document is a valid project with no settings.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn requirement_set(&self) -> Result<RequirementSet, RequirementsConfigError> {
        match &self.requirements {
            Some(raw) => RequirementSet::from_raw_data(raw),
            None => Ok(RequirementSet::new()),
        }
    }
}
