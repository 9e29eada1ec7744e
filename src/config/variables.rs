//! Placeholder substitution for `metadata.variables`.
//!
//! Templates refer to persistence locations indirectly:
//!
//! ```json
//! "metadata": {"variables": {
//!     "ROOT_PATH": "./faq",
//!     "MODELS_PATH": "{ROOT_PATH}/models"
//! }}
//! ```
//!
//! Variables are resolved in declaration order, so a variable may use any
//! variable declared before it. Every string in the document is then
//! rewritten. Placeholders that name no variable are left as they are.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::config::get_path;
use crate::error::{AutofaqError, Result};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Return a copy of `config` with every `{VARIABLE}` placeholder substituted.
///
/// # Errors
///
/// Returns a configuration error when `metadata.variables` is not a mapping
/// or one of its values is not a string.
pub fn resolve(config: &Value) -> Result<Value> {
    let variables = collect_variables(config)?;
    let mut resolved = substitute(config, &variables);

    if let Some(declared) = resolved
        .get_mut("metadata")
        .and_then(|m| m.get_mut("variables"))
        .and_then(Value::as_object_mut)
    {
        for (name, value) in declared.iter_mut() {
            if let Some(expanded) = variables.get(name) {
                *value = expanded.clone();
            }
        }
    }

    Ok(resolved)
}

/// Resolve `metadata.variables` into a name → value map.
pub fn collect_variables(config: &Value) -> Result<Map<String, Value>> {
    let mut variables = Map::new();

    let Some(declared) = get_path(config, &["metadata", "variables"]) else {
        return Ok(variables);
    };
    let declared = declared
        .as_object()
        .ok_or_else(|| AutofaqError::config("metadata.variables is not a mapping"))?;

    for (name, value) in declared {
        let raw = value.as_str().ok_or_else(|| {
            AutofaqError::config(format!("metadata.variables.{name} is not a string"))
        })?;
        let expanded = expand_home(&format_placeholders(raw, &variables));
        variables.insert(name.clone(), Value::String(expanded));
    }

    Ok(variables)
}

fn substitute(value: &Value, variables: &Map<String, Value>) -> Value {
    match value {
        Value::String(s) => Value::String(format_placeholders(s, variables)),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute(v, variables)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute(v, variables)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn format_placeholders(text: &str, variables: &Map<String, Value>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            match variables.get(&caps[1]).and_then(Value::as_str) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };
    match std::env::var("HOME") {
        Ok(home) => format!("{home}{rest}"),
        Err(_) => path.to_string(),
    }
}
