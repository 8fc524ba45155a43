//! Top-level schema checks
//!
//! Mirrors the top-level constraints `docker stack deploy` enforces: a fixed
//! set of sections plus `x-*` extensions, and a version 3 file format.

use serde_yaml_ng::{Mapping, Value};
use thiserror::Error;

const ALLOWED_SECTIONS: &[&str] = &[
    "version", "services", "networks", "volumes", "secrets", "configs",
];
const EXTENSION_PREFIX: &str = "x-";
const SUPPORTED_MAJOR: &str = "3";

/// Schema violations at the top level of a compose file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("additional property {key} is not allowed at the top level")]
    UnknownSection { key: String },

    #[error("top-level keys must be strings")]
    NonStringSection,

    #[error("unsupported compose file version {version:?} (only 3.x is supported)")]
    UnsupportedVersion { version: String },

    #[error("`version` must be a string")]
    InvalidVersion,
}

/// Validate the top-level keys and version of a compose root mapping
pub fn validate(root: &Mapping) -> Result<(), SchemaError> {
    for key in root.keys() {
        let key = key.as_str().ok_or(SchemaError::NonStringSection)?;
        if !ALLOWED_SECTIONS.contains(&key) && !key.starts_with(EXTENSION_PREFIX) {
            return Err(SchemaError::UnknownSection {
                key: key.to_string(),
            });
        }
    }

    if let Some(version) = root.get("version") {
        check_version(version)?;
    }

    Ok(())
}

fn check_version(version: &Value) -> Result<(), SchemaError> {
    let version = match version {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(SchemaError::InvalidVersion),
    };

    let major = version.split('.').next().unwrap_or_default();
    if major != SUPPORTED_MAJOR {
        return Err(SchemaError::UnsupportedVersion { version });
    }
    Ok(())
}
