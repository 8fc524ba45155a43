//! Compose document entity
//!
//! A parsed Compose file split into the parts the config rotation cares about
//! (top-level `configs` and each service's config references) and everything
//! else, which is carried along verbatim.
//!
//! Key order of the original file is preserved on output: sections and fields
//! that are not rewritten keep their position, rewritten ones are replaced in
//! place.

use serde::{Serialize, Serializer};
use serde_yaml_ng::{Mapping, Value};
use thiserror::Error;

/// Top-level key holding service definitions
pub const SERVICES_KEY: &str = "services";
/// Top-level (and per-service) key holding config definitions/references
pub const CONFIGS_KEY: &str = "configs";

const SOURCE_KEY: &str = "source";

/// Structural problems found while splitting a compose value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("compose file must be a mapping at the top level")]
    NotAMapping,

    #[error("`{section}` must be a mapping")]
    SectionNotMapping { section: &'static str },

    #[error("`{section}` contains a non-string key: {key}")]
    NonStringKey { section: &'static str, key: String },

    #[error("service '{service}' must be a mapping")]
    ServiceNotMapping { service: String },

    #[error("service '{service}': `configs` must be a sequence")]
    ReferencesNotSequence { service: String },

    #[error(
        "service '{service}': config reference #{index} must be a name or a mapping with a string `source`"
    )]
    InvalidReference { service: String, index: usize },
}

/// A top-level config definition.
///
/// The definition itself (`file:`, `external:`, labels, ...) is opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    name: String,
    definition: Value,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, definition: Value) -> Self {
        Self {
            name: name.into(),
            definition,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// Same definition under a new name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: self.definition.clone(),
        }
    }
}

/// How a reference was written in the source file
#[derive(Debug, Clone, PartialEq)]
enum ReferenceForm {
    /// `- app_cfg`
    Short,
    /// `- source: app_cfg` plus target/uid/gid/mode, kept as written
    Long(Mapping),
}

/// A service's reference to a top-level config
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigReference {
    source: String,
    form: ReferenceForm,
}

impl ConfigReference {
    /// Reference written in short syntax
    pub fn short(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            form: ReferenceForm::Short,
        }
    }

    /// Name of the referenced config
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_short(&self) -> bool {
        matches!(self.form, ReferenceForm::Short)
    }

    /// Same reference (same syntax and extra fields) pointing at `source`
    pub fn with_source(&self, source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            form: self.form.clone(),
        }
    }

    fn from_value(value: &Value, service: &str, index: usize) -> Result<Self, DocumentError> {
        let invalid = || DocumentError::InvalidReference {
            service: service.to_string(),
            index,
        };
        match value {
            Value::String(source) => Ok(Self::short(source.clone())),
            Value::Mapping(fields) => {
                let source = fields
                    .get(SOURCE_KEY)
                    .and_then(Value::as_str)
                    .ok_or_else(invalid)?;
                Ok(Self {
                    source: source.to_string(),
                    form: ReferenceForm::Long(fields.clone()),
                })
            }
            _ => Err(invalid()),
        }
    }

    fn to_value(&self) -> Value {
        match &self.form {
            ReferenceForm::Short => Value::String(self.source.clone()),
            ReferenceForm::Long(fields) => {
                let mut fields = fields.clone();
                fields.insert(SOURCE_KEY.into(), Value::String(self.source.clone()));
                Value::Mapping(fields)
            }
        }
    }
}

/// A service definition
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    name: String,
    configs: Vec<ConfigReference>,
    /// Full original definition, including the original `configs` entry.
    /// `None` when the service was written as null (`web:`).
    body: Option<Mapping>,
}

impl Service {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn configs(&self) -> &[ConfigReference] {
        &self.configs
    }

    /// Same service with its config references replaced
    pub fn with_configs(&self, configs: Vec<ConfigReference>) -> Self {
        Self {
            name: self.name.clone(),
            configs,
            body: self.body.clone(),
        }
    }

    fn from_value(name: String, value: &Value) -> Result<Self, DocumentError> {
        let body = match value {
            Value::Mapping(body) => Some(body.clone()),
            Value::Null => None,
            _ => return Err(DocumentError::ServiceNotMapping { service: name }),
        };

        let configs = match body.as_ref().and_then(|body| body.get(CONFIGS_KEY)) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| ConfigReference::from_value(item, &name, index))
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(DocumentError::ReferencesNotSequence { service: name }),
        };

        Ok(Self {
            name,
            configs,
            body,
        })
    }

    fn to_value(&self) -> Value {
        // An empty reference list keeps whatever was written (`[]`, `~`, or nothing).
        if self.configs.is_empty() {
            return self.body.clone().map_or(Value::Null, Value::Mapping);
        }
        let mut body = self.body.clone().unwrap_or_default();
        let references = self.configs.iter().map(ConfigReference::to_value).collect();
        body.insert(CONFIGS_KEY.into(), Value::Sequence(references));
        Value::Mapping(body)
    }
}

/// A parsed Compose file
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeDocument {
    /// Original root mapping; `services`/`configs` are overwritten on output
    root: Mapping,
    services: Vec<Service>,
    configs: Vec<ConfigEntry>,
}

impl ComposeDocument {
    /// Split an (already interpolated) compose value into its parts
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let Value::Mapping(root) = value else {
            return Err(DocumentError::NotAMapping);
        };

        let services = section_entries(&root, SERVICES_KEY)?
            .into_iter()
            .map(|(name, value)| Service::from_value(name, value))
            .collect::<Result<Vec<_>, _>>()?;

        let configs = section_entries(&root, CONFIGS_KEY)?
            .into_iter()
            .map(|(name, definition)| ConfigEntry::new(name, definition.clone()))
            .collect();

        Ok(Self {
            root,
            services,
            configs,
        })
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn configs(&self) -> &[ConfigEntry] {
        &self.configs
    }

    /// Look up a top-level config by name
    pub fn config(&self, name: &str) -> Option<&ConfigEntry> {
        self.configs.iter().find(|entry| entry.name == name)
    }

    /// Same document with `configs` and `services` replaced.
    ///
    /// Everything else in the root mapping is shared with `self`.
    pub fn with_parts(&self, configs: Vec<ConfigEntry>, services: Vec<Service>) -> Self {
        Self {
            root: self.root.clone(),
            services,
            configs,
        }
    }

    /// Reassemble the full compose value
    pub fn to_value(&self) -> Value {
        let mut root = self.root.clone();

        if !self.services.is_empty() {
            let services = self
                .services
                .iter()
                .map(|service| (Value::String(service.name.clone()), service.to_value()))
                .collect();
            root.insert(SERVICES_KEY.into(), Value::Mapping(services));
        }

        if !self.configs.is_empty() {
            let configs = self
                .configs
                .iter()
                .map(|entry| (Value::String(entry.name.clone()), entry.definition.clone()))
                .collect();
            root.insert(CONFIGS_KEY.into(), Value::Mapping(configs));
        }

        Value::Mapping(root)
    }

    /// Render the document as Compose YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }
}

impl Serialize for ComposeDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// `(name, value)` pairs of a top-level name → mapping section
fn section_entries<'a>(
    root: &'a Mapping,
    section: &'static str,
) -> Result<Vec<(String, &'a Value)>, DocumentError> {
    let entries = match root.get(section) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Mapping(entries)) => entries,
        Some(_) => return Err(DocumentError::SectionNotMapping { section }),
    };

    entries
        .iter()
        .map(|(key, value)| match key {
            Value::String(name) => Ok((name.clone(), value)),
            other => Err(DocumentError::NonStringKey {
                section,
                key: describe_key(other),
            }),
        })
        .collect()
}

fn describe_key(key: &Value) -> String {
    match key {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => "<complex key>".to_string(),
    }
}
