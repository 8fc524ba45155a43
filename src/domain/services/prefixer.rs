//! Config prefixer
//!
//! Renames every top-level config of a compose document and rewires all
//! service references to the new names.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::entities::{ComposeDocument, ConfigEntry, ConfigReference, Service};
use crate::domain::value_objects::ConfigPrefix;

/// A service reference whose source is not a top-level config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub service: String,
    pub config: String,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "service '{}' -> config '{}'", self.service, self.config)
    }
}

/// Errors produced by [`rewrite`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// One or more references point at configs that are not defined
    #[error(
        "compose file references undefined configs: {}",
        join_references(.references)
    )]
    DanglingReferences { references: Vec<DanglingReference> },
}

fn join_references(references: &[DanglingReference]) -> String {
    references
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Old config name → new config name, for a single rewrite
#[derive(Debug, Default)]
pub struct RenameMap<'a> {
    names: HashMap<&'a str, String>,
}

impl<'a> RenameMap<'a> {
    /// Map every config of `doc` to its prefixed name
    pub fn build(doc: &'a ComposeDocument, prefix: &ConfigPrefix) -> Self {
        let names = doc
            .configs()
            .iter()
            .map(|entry| (entry.name(), prefix.apply(entry.name())))
            .collect();
        Self { names }
    }

    pub fn get(&self, old: &str) -> Option<&str> {
        self.names.get(old).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Produce a copy of `doc` with every config renamed to `prefix + name`.
///
/// Service and reference order are kept, and nothing outside config names and
/// reference sources changes. Every dangling reference is collected and
/// reported together instead of being rewritten to an empty name.
pub fn rewrite(
    doc: &ComposeDocument,
    prefix: &ConfigPrefix,
) -> Result<ComposeDocument, RewriteError> {
    let renames = RenameMap::build(doc, prefix);

    let configs: Vec<ConfigEntry> = doc
        .configs()
        .iter()
        .map(|entry| entry.renamed(prefix.apply(entry.name())))
        .collect();

    let mut dangling = Vec::new();
    let services: Vec<Service> = doc
        .services()
        .iter()
        .map(|service| {
            let references = service
                .configs()
                .iter()
                .filter_map(|reference| match renames.get(reference.source()) {
                    Some(renamed) => Some(reference.with_source(renamed)),
                    None => {
                        dangling.push(DanglingReference {
                            service: service.name().to_string(),
                            config: reference.source().to_string(),
                        });
                        None
                    }
                })
                .collect::<Vec<ConfigReference>>();
            service.with_configs(references)
        })
        .collect();

    if !dangling.is_empty() {
        return Err(RewriteError::DanglingReferences {
            references: dangling,
        });
    }

    tracing::debug!(
        configs = renames.len(),
        services = services.len(),
        %prefix,
        "rewrote config names"
    );

    Ok(doc.with_parts(configs, services))
}
