//! Interpolation environment
//!
//! The full process environment is exposed to the compose file as `${VAR}`
//! variables. Entries must be `KEY=VALUE`; anything else aborts the run.

use std::collections::HashMap;
use std::ffi::OsString;

use thiserror::Error;

/// Malformed environment entries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    #[error("unexpected environment entry {0:?}: missing '=' separator")]
    MissingSeparator(String),

    #[error("environment entry {0:?} is not valid UTF-8")]
    NotUnicode(String),
}

/// Variables available for interpolation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Parse `KEY=VALUE` entries. An empty value is written `KEY=`.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, EnvironmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vars = HashMap::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| EnvironmentError::MissingSeparator(entry.to_string()))?;
            vars.insert(key.to_string(), value.to_string());
        }
        Ok(Self { vars })
    }

    /// Snapshot of the current process environment.
    ///
    /// `std::env::vars_os` already drops entries without a `=`, so only
    /// non-UTF-8 keys or values fail here. The separator check applies to
    /// explicit entry lists passed to [`Environment::from_entries`].
    pub fn from_process() -> Result<Self, EnvironmentError> {
        Self::from_os_pairs(std::env::vars_os())
    }

    fn from_os_pairs<I>(pairs: I) -> Result<Self, EnvironmentError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut vars = HashMap::new();
        for (key, value) in pairs {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                (Ok(key), Err(_)) => return Err(EnvironmentError::NotUnicode(key)),
                (Err(key), _) => {
                    return Err(EnvironmentError::NotUnicode(
                        key.to_string_lossy().into_owned(),
                    ));
                }
            }
        }
        Ok(Self { vars })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
