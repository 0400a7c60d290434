use thiserror::Error;

/// A requirements list entry that cannot be turned into a requirement.
///
/// Entries are echoed back in JSON flow form so the user can find them in
/// their project file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementsConfigError {
    #[error("requirement entry {entry} must map exactly one package name, found {keys} keys")]
    NotSingleKey { entry: String, keys: usize },

    #[error("requirement entry {entry} is neither a package name nor a single-key mapping")]
    UnsupportedEntry { entry: String },

    #[error("requirement entry has an empty package name")]
    EmptyName,

    #[error("requirement entry {entry} does not use a string as its package name")]
    InvalidName { entry: String },

    #[error(
        "requirement '{name}' has value {value}; expected a version string or a source URL list"
    )]
    InvalidValue { name: String, value: String },

    #[error("requirement '{name}' must start its source list with a non-empty URL")]
    MissingUrl { name: String },

    #[error(
        "requirement '{name}' has {count} source list elements; expected a URL and at most one options mapping"
    )]
    TooManyElements { name: String, count: usize },

    #[error("requirement '{name}' has invalid install option {option}: {reason}")]
    InvalidOption {
        name: String,
        option: String,
        reason: String,
    },
}
