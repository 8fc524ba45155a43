//! Config prefix value object
//!
//! Every top-level config of a compose file is renamed to
//! `<stack>_<suffix>_<name>` so that a new deployment never collides with the
//! config objects still held by the running one.

use crate::domain::ports::Clock;
use crate::domain::value_objects::StackName;

/// Separator placed between the stack, the suffix and the original name
const SEPARATOR: char = '_';

/// Prefix prepended to config names for one deployment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPrefix(String);

impl ConfigPrefix {
    /// Wrap an arbitrary prefix.
    ///
    /// Any string is accepted, including the empty one. Use [`ConfigPrefix::compute`]
    /// for prefixes that are unique per deployment.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Compute the deployment prefix for `stack`.
    ///
    /// A non-empty `suffix` is used verbatim. Otherwise the current Unix
    /// timestamp (in seconds) is read from `clock`.
    pub fn compute(stack: &StackName, suffix: Option<&str>, clock: &dyn Clock) -> Self {
        let suffix = match suffix.filter(|s| !s.is_empty()) {
            Some(suffix) => suffix.to_string(),
            None => clock.unix_timestamp().to_string(),
        };
        Self(format!("{stack}{SEPARATOR}{suffix}{SEPARATOR}"))
    }

    /// Prefix a config name
    pub fn apply(&self, name: &str) -> String {
        format!("{}{}", self.0, name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Variant of the prefix that is safe to use inside a file name.
    ///
    /// Characters other than ASCII alphanumerics, `-`, `_` and `.` become `_`.
    pub fn file_name_hint(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl std::fmt::Display for ConfigPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
