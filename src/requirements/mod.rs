//! Requirement declarations and their installer-line rendering.
//!
//! A project's `requirements` list is loosely typed YAML: bare package names,
//! `name: version` pairs, and `name: [url, {editable: true}]` source checkouts.
//! [`RequirementSet`] decodes that tree into strict [`RequirementEntry`] values
//! and renders them, in declaration order, as a requirements file body.
//!
//! ```
//! use virtstrap::requirements::RequirementSet;
//!
//! let raw: Vec<serde_yaml::Value> = serde_yaml::from_str(
//!     "- ipython\n- werkzeug: '==0.8'\n",
//! ).unwrap();
//! let set = RequirementSet::from_raw_data(&raw).unwrap();
//! assert_eq!(set.to_pip_str(), "ipython\nwerkzeug==0.8");
//! ```

use serde_yaml::Value;
use std::fmt;
use tracing::debug;

mod decode;
mod error;

pub use error::RequirementsConfigError;

/// Prefix that switches the installer into editable (development) mode.
const EDITABLE_PREFIX: &str = "-e ";
/// Separator between a source URL and the ref to check out.
const REF_SEPARATOR: char = '@';
/// URL fragment naming the package a source checkout provides.
const EGG_FRAGMENT: &str = "#egg=";

/// Anything that can be written as one line of a requirements file.
pub trait ToPipStr {
    fn to_pip_str(&self) -> String;
}

/// A registry package with an optional version constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    name: String,
    version: Option<String>,
}

impl Requirement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// The version expression carries its own operator (`==0.8`, `>=0.9,<1.5`)
    /// and is passed through untouched.
    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl ToPipStr for Requirement {
    fn to_pip_str(&self) -> String {
        match &self.version {
            Some(version) => format!("{}{}", self.name, version),
            None => self.name.clone(),
        }
    }
}

/// A package installed from a source-control checkout.
///
/// `url` already carries its VCS scheme (`git+https://...`). The name is only
/// used for the `#egg=` tag, never to look anything up in a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsRequirement {
    name: String,
    url: String,
    at: Option<String>,
    editable: bool,
}

impl VcsRequirement {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            at: None,
            editable: false,
        }
    }

    /// Pin the checkout to a tag, branch or commit.
    pub fn at(mut self, reference: impl Into<String>) -> Self {
        self.at = Some(reference.into());
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn reference(&self) -> Option<&str> {
        self.at.as_deref()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }
}

impl ToPipStr for VcsRequirement {
    /// Segments are positional: `[-e ]<url>[@<ref>]#egg=<name>`.
    fn to_pip_str(&self) -> String {
        let mut line = String::new();
        if self.editable {
            line.push_str(EDITABLE_PREFIX);
        }
        line.push_str(&self.url);
        if let Some(at) = &self.at {
            line.push(REF_SEPARATOR);
            line.push_str(at);
        }
        line.push_str(EGG_FRAGMENT);
        line.push_str(&self.name);
        line
    }
}

/// One decoded entry of a requirements list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementEntry {
    Package(Requirement),
    Vcs(VcsRequirement),
}

impl RequirementEntry {
    pub fn name(&self) -> &str {
        match self {
            RequirementEntry::Package(requirement) => requirement.name(),
            RequirementEntry::Vcs(requirement) => requirement.name(),
        }
    }
}

impl ToPipStr for RequirementEntry {
    fn to_pip_str(&self) -> String {
        match self {
            RequirementEntry::Package(requirement) => requirement.to_pip_str(),
            RequirementEntry::Vcs(requirement) => requirement.to_pip_str(),
        }
    }
}

impl From<Requirement> for RequirementEntry {
    fn from(requirement: Requirement) -> Self {
        RequirementEntry::Package(requirement)
    }
}

impl From<VcsRequirement> for RequirementEntry {
    fn from(requirement: VcsRequirement) -> Self {
        RequirementEntry::Vcs(requirement)
    }
}

impl fmt::Display for RequirementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pip_str())
    }
}

/// Ordered requirements of a project.
///
/// Order is declaration order and is preserved in the rendered output so that
/// generated files stay reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    requirements: Vec<RequirementEntry>,
}

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a raw, already-loaded requirements list.
    pub fn from_raw_data(raw: &[Value]) -> Result<Self, RequirementsConfigError> {
        let mut set = Self::new();
        set.set_requirements(raw)?;
        Ok(set)
    }

    /// Replace the whole sequence with the entries decoded from `raw`.
    ///
    /// Decoding stops at the first malformed entry. On error the previous
    /// contents are left in place, but callers should not render a set whose
    /// update failed.
    pub fn set_requirements(&mut self, raw: &[Value]) -> Result<(), RequirementsConfigError> {
        let requirements = raw
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                decode::decode_entry(entry).inspect_err(|err| {
                    debug!(index, error = %err, "rejected requirement entry");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = requirements.len(), "decoded requirements");
        self.requirements = requirements;
        Ok(())
    }

    /// Render every entry, one per line, with no trailing newline.
    pub fn to_pip_str(&self) -> String {
        self.requirements
            .iter()
            .map(ToPipStr::to_pip_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn requirements(&self) -> &[RequirementEntry] {
        &self.requirements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequirementEntry> {
        self.requirements.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(RequirementEntry::name)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl FromIterator<RequirementEntry> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = RequirementEntry>>(iter: I) -> Self {
        Self {
            requirements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a RequirementEntry;
    type IntoIter = std::slice::Iter<'a, RequirementEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.iter()
    }
}
