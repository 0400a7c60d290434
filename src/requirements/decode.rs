//! Shape-directed decoding of raw requirement entries.

use serde_yaml::{Mapping, Value};

use super::{Requirement, RequirementEntry, RequirementsConfigError, VcsRequirement};

const EDITABLE_OPTION: &str = "editable";
const AT_OPTION: &str = "at";

pub(super) fn decode_entry(raw: &Value) -> Result<RequirementEntry, RequirementsConfigError> {
    match raw {
        Value::String(name) => {
            if name.trim().is_empty() {
                return Err(RequirementsConfigError::EmptyName);
            }
            Ok(Requirement::new(name.as_str()).into())
        }
        Value::Mapping(mapping) => decode_mapping(raw, mapping),
        _ => Err(RequirementsConfigError::UnsupportedEntry {
            entry: describe(raw),
        }),
    }
}

/// `name: value` entries. The mapping must hold exactly one pair.
fn decode_mapping(
    raw: &Value,
    mapping: &Mapping,
) -> Result<RequirementEntry, RequirementsConfigError> {
    let mut pairs = mapping.iter();
    let (key, value) = match (pairs.next(), pairs.next()) {
        (Some(pair), None) => pair,
        _ => {
            return Err(RequirementsConfigError::NotSingleKey {
                entry: describe(raw),
                keys: mapping.len(),
            })
        }
    };

    let name = match key.as_str() {
        Some(name) if name.trim().is_empty() => return Err(RequirementsConfigError::EmptyName),
        Some(name) => name,
        None => {
            return Err(RequirementsConfigError::InvalidName {
                entry: describe(raw),
            })
        }
    };

    match value {
        // `- ipython:` with nothing after the colon
        Value::Null => Ok(Requirement::new(name).into()),
        Value::String(version) if version.trim().is_empty() => Ok(Requirement::new(name).into()),
        Value::String(version) => Ok(Requirement::with_version(name, version.as_str()).into()),
        Value::Sequence(items) => decode_vcs(name, items),
        other => Err(RequirementsConfigError::InvalidValue {
            name: name.to_string(),
            value: describe(other),
        }),
    }
}

/// `name: [url, {editable: bool, at: ref}]`
fn decode_vcs(name: &str, items: &[Value]) -> Result<RequirementEntry, RequirementsConfigError> {
    let (url, options) = match items {
        [url] => (url, None),
        [url, options] => (url, Some(options)),
        [] => {
            return Err(RequirementsConfigError::MissingUrl {
                name: name.to_string(),
            })
        }
        _ => {
            return Err(RequirementsConfigError::TooManyElements {
                name: name.to_string(),
                count: items.len(),
            })
        }
    };

    let url = match url.as_str() {
        Some(url) if !url.trim().is_empty() => url,
        _ => {
            return Err(RequirementsConfigError::MissingUrl {
                name: name.to_string(),
            })
        }
    };

    let mut requirement = VcsRequirement::new(name, url);
    if let Some(options) = options {
        requirement = apply_options(requirement, options)?;
    }
    Ok(requirement.into())
}

fn apply_options(
    mut requirement: VcsRequirement,
    options: &Value,
) -> Result<VcsRequirement, RequirementsConfigError> {
    let invalid = |option: &Value, reason: &str| RequirementsConfigError::InvalidOption {
        name: requirement.name().to_string(),
        option: describe(option),
        reason: reason.to_string(),
    };

    let mapping = match options.as_mapping() {
        Some(mapping) if !mapping.is_empty() => mapping,
        _ => return Err(invalid(options, "expected a mapping such as {editable: true}")),
    };

    let mut editable = requirement.is_editable();
    let mut at = None;
    for (key, value) in mapping {
        match key.as_str() {
            Some(EDITABLE_OPTION) => match value.as_bool() {
                Some(flag) => editable = flag,
                None => return Err(invalid(options, "'editable' must be true or false")),
            },
            Some(AT_OPTION) => match value.as_str() {
                Some(reference) if !reference.trim().is_empty() => at = Some(reference.to_string()),
                _ => return Err(invalid(options, "'at' must be a tag, branch or commit")),
            },
            _ => return Err(invalid(options, "unknown option; expected 'editable' or 'at'")),
        }
    }

    requirement = requirement.editable(editable);
    if let Some(reference) = at {
        requirement = requirement.at(reference);
    }
    Ok(requirement)
}

/// Compact rendering of a raw entry for error messages.
fn describe(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}
