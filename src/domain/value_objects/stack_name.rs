//! Stack name value object - the swarm stack being redeployed

use thiserror::Error;

/// Errors produced when validating a stack name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackNameError {
    /// Empty or whitespace-only name
    #[error("stack name must not be empty")]
    Empty,

    /// Name contains whitespace
    #[error("stack name '{0}' must not contain whitespace")]
    Whitespace(String),
}

/// Name of a deployed swarm stack.
///
/// Always non-empty and free of whitespace, so it can be used verbatim as the
/// last argument of `docker stack deploy` and as part of config names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackName(String);

impl StackName {
    /// Validate and wrap a stack name
    pub fn new(name: impl Into<String>) -> Result<Self, StackNameError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StackNameError::Empty);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(StackNameError::Whitespace(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StackName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StackName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
