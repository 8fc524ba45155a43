//! Compose file loader
//!
//! bytes → YAML value → merge keys resolved → schema checked → variables
//! interpolated → [`ComposeDocument`].

use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;
use thiserror::Error;

use super::interpolation::{interpolate_value, InterpolationError};
use super::schema::{self, SchemaError};
use crate::domain::entities::{ComposeDocument, DocumentError};
use crate::infrastructure::environment::Environment;

/// Errors loading a compose file
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("failed to read compose file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid compose file {}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("invalid compose file {}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("failed to interpolate variables in {}", .path.display())]
    Interpolation {
        path: PathBuf,
        #[source]
        source: InterpolationError,
    },
}

/// Loads compose files against an interpolation environment
#[derive(Debug, Clone, Copy)]
pub struct ComposeLoader<'a> {
    env: &'a Environment,
}

impl<'a> ComposeLoader<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Read and parse the compose file at `path`
    pub fn load_file(&self, path: &Path) -> Result<ComposeDocument, ComposeError> {
        let bytes = std::fs::read(path).map_err(|source| ComposeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bytes(&bytes, path)
    }

    /// Parse compose bytes. `origin` is only used in error messages.
    pub fn load_bytes(
        &self,
        bytes: &[u8],
        origin: &Path,
    ) -> Result<ComposeDocument, ComposeError> {
        let yaml_error = |source| ComposeError::Yaml {
            path: origin.to_path_buf(),
            source,
        };

        let mut value: Value = serde_yaml_ng::from_slice(bytes).map_err(yaml_error)?;
        value.apply_merge().map_err(yaml_error)?;

        if let Value::Mapping(root) = &value {
            schema::validate(root).map_err(|source| ComposeError::Schema {
                path: origin.to_path_buf(),
                source,
            })?;
        }

        let value =
            interpolate_value(value, self.env).map_err(|source| ComposeError::Interpolation {
                path: origin.to_path_buf(),
                source,
            })?;

        let doc = ComposeDocument::from_value(value).map_err(|source| ComposeError::Document {
            path: origin.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            path = %origin.display(),
            services = doc.services().len(),
            configs = doc.configs().len(),
            "loaded compose file"
        );

        Ok(doc)
    }
}
