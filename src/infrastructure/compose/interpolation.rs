//! Variable interpolation for compose values
//!
//! Supported forms, applied to string scalars only (never to keys):
//!
//! | Form               | Result                                             |
//! |--------------------|----------------------------------------------------|
//! | `$$`               | a literal `$`                                      |
//! | `$VAR`, `${VAR}`   | value of `VAR`, or empty (with a warning) if unset |
//! | `${VAR:-default}`  | `default` if `VAR` is unset or empty               |
//! | `${VAR-default}`   | `default` if `VAR` is unset                        |
//! | `${VAR:?message}`  | error if `VAR` is unset or empty                   |
//! | `${VAR?message}`   | error if `VAR` is unset                            |
//!
//! A string value that changed during substitution is read back as a YAML
//! scalar, so `replicas: ${REPLICAS}` becomes an integer and `external: ${EXT}`
//! a boolean. Anything that does not read as a number, boolean or null stays a
//! string.

use serde_yaml_ng::{Mapping, Value};
use thiserror::Error;

use crate::infrastructure::environment::Environment;

/// Errors raised while substituting variables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    #[error("invalid interpolation format in {template:?}")]
    InvalidFormat { template: String },

    #[error("required variable {variable} is missing a value: {message}")]
    MissingRequired { variable: String, message: String },
}

/// Substitute variables in a single string
pub fn interpolate(template: &str, env: &Environment) -> Result<String, InterpolationError> {
    let invalid = || InterpolationError::InvalidFormat {
        template: template.to_string(),
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];

        let consumed = if after.starts_with('$') {
            out.push('$');
            1
        } else if let Some(braced) = after.strip_prefix('{') {
            let end = braced.find('}').ok_or_else(invalid)?;
            let expanded = expand_braced(&braced[..end], env).ok_or_else(invalid)??;
            out.push_str(&expanded);
            end + 2
        } else {
            let len = name_len(after);
            if len == 0 {
                return Err(invalid());
            }
            out.push_str(lookup(&after[..len], env));
            len
        };

        rest = &after[consumed..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Substitute variables in every string scalar of `value`
pub fn interpolate_value(value: Value, env: &Environment) -> Result<Value, InterpolationError> {
    Ok(match value {
        Value::String(s) => {
            let expanded = interpolate(&s, env)?;
            if expanded == s {
                Value::String(s)
            } else {
                cast_scalar(expanded)
            }
        }
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| interpolate_value(item, env))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Mapping(entries) => {
            let mut out = Mapping::with_capacity(entries.len());
            for (key, item) in entries {
                out.insert(key, interpolate_value(item, env)?);
            }
            Value::Mapping(out)
        }
        Value::Tagged(mut tagged) => {
            tagged.value = interpolate_value(std::mem::take(&mut tagged.value), env)?;
            Value::Tagged(tagged)
        }
        other => other,
    })
}

/// Re-type a substituted string the way an unquoted scalar would be read
fn cast_scalar(expanded: String) -> Value {
    if expanded.trim().is_empty() {
        return Value::String(expanded);
    }
    match serde_yaml_ng::from_str::<Value>(&expanded) {
        Ok(typed @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => typed,
        _ => Value::String(expanded),
    }
}

/// Expand the body of `${...}`.
///
/// Returns `None` when the body is malformed.
fn expand_braced(body: &str, env: &Environment) -> Option<Result<String, InterpolationError>> {
    let len = name_len(body);
    if len == 0 {
        return None;
    }
    let (name, modifier) = body.split_at(len);
    let value = env.get(name);

    let expanded = if modifier.is_empty() {
        Ok(lookup(name, env).to_string())
    } else if let Some(default) = modifier.strip_prefix(":-") {
        Ok(value.filter(|v| !v.is_empty()).unwrap_or(default).to_string())
    } else if let Some(default) = modifier.strip_prefix('-') {
        Ok(value.unwrap_or(default).to_string())
    } else if let Some(message) = modifier.strip_prefix(":?") {
        required(name, value.filter(|v| !v.is_empty()), message)
    } else if let Some(message) = modifier.strip_prefix('?') {
        required(name, value, message)
    } else {
        return None;
    };
    Some(expanded)
}

fn required(
    name: &str,
    value: Option<&str>,
    message: &str,
) -> Result<String, InterpolationError> {
    value
        .map(str::to_string)
        .ok_or_else(|| InterpolationError::MissingRequired {
            variable: name.to_string(),
            message: message.to_string(),
        })
}

fn lookup<'a>(name: &str, env: &'a Environment) -> &'a str {
    env.get(name).unwrap_or_else(|| {
        tracing::warn!(
            variable = name,
            "variable is not set, substituting a blank string"
        );
        ""
    })
}

/// Length in bytes of the variable name at the start of `s`
fn name_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !(c == '_' || c.is_ascii_alphanumeric()))
        .map_or(s.len(), |(idx, _)| idx)
}
