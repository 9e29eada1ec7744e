//! Recursive merge of override documents into a model configuration.

use serde_json::Value;

use crate::error::{AutofaqError, Result};

/// Merge `overrides` into `base` in place.
///
/// For every key of `overrides`:
///
/// - if both sides hold mappings, they are merged recursively;
/// - otherwise the override value replaces the base value (or is inserted
///   when the base has no such key).
///
/// Keys of `base` that `overrides` does not mention are left untouched.
/// The override document is only read; values are cloned into `base`.
///
/// # Errors
///
/// Returns a configuration error when either root is not a mapping.
///
/// # Examples
///
/// ```
/// use autofaq::config::merge::update_recursive;
/// use serde_json::json;
///
/// let mut config = json!({"dataset_reader": {"x_col_name": "Q", "y_col_name": "A"}});
/// update_recursive(&mut config, &json!({"dataset_reader": {"max_proba": 0.5}})).unwrap();
///
/// assert_eq!(
///     config,
///     json!({"dataset_reader": {"x_col_name": "Q", "y_col_name": "A", "max_proba": 0.5}})
/// );
/// ```
pub fn update_recursive(base: &mut Value, overrides: &Value) -> Result<()> {
    let Some(overrides) = overrides.as_object() else {
        return Err(AutofaqError::config(format!(
            "override document must be a mapping, got {}",
            kind(overrides)
        )));
    };
    let Some(base) = base.as_object_mut() else {
        return Err(AutofaqError::config(format!(
            "configuration must be a mapping, got {}",
            kind(base)
        )));
    };

    for (key, value) in overrides {
        let nested = value.is_object() && base.get(key).is_some_and(Value::is_object);
        if let Some(existing) = base.get_mut(key).filter(|_| nested) {
            update_recursive(existing, value)?;
        } else {
            base.insert(key.clone(), value.clone());
        }
    }

    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override_replaces() {
        let mut config = json!({"dataset_reader": {"x_col_name": "Question"}});
        update_recursive(&mut config, &json!({"dataset_reader": {"x_col_name": "Q"}})).unwrap();
        assert_eq!(config["dataset_reader"]["x_col_name"], "Q");
    }

    #[test]
    fn test_absent_keys_preserved() {
        let mut config = json!({
            "dataset_reader": {"x_col_name": "Question", "y_col_name": "Answer"},
            "model": {"analyzer": "standard", "save_path": "{MODELS_PATH}/m.bin"}
        });
        update_recursive(&mut config, &json!({"model": {"analyzer": "simple"}})).unwrap();

        assert_eq!(config["dataset_reader"]["x_col_name"], "Question");
        assert_eq!(config["dataset_reader"]["y_col_name"], "Answer");
        assert_eq!(config["model"]["save_path"], "{MODELS_PATH}/m.bin");
        assert_eq!(config["model"]["analyzer"], "simple");
    }

    #[test]
    fn test_deep_nesting() {
        let mut config = json!({"a": {"b": {"c": 1, "d": 2}, "e": 3}});
        update_recursive(&mut config, &json!({"a": {"b": {"c": 10, "f": {"g": 4}}}})).unwrap();
        assert_eq!(
            config,
            json!({"a": {"b": {"c": 10, "d": 2, "f": {"g": 4}}, "e": 3}})
        );
    }

    #[test]
    fn test_new_nested_key_inserted() {
        let mut config = json!({"model": {}});
        update_recursive(&mut config, &json!({"train": {"epochs": 1}})).unwrap();
        assert_eq!(config["train"]["epochs"], 1);
    }

    #[test]
    fn test_mapping_replaces_scalar_and_scalar_replaces_mapping() {
        let mut config = json!({"a": 1, "b": {"c": 2}});
        update_recursive(&mut config, &json!({"a": {"x": 1}, "b": null})).unwrap();
        assert_eq!(config, json!({"a": {"x": 1}, "b": null}));
    }

    #[test]
    fn test_arrays_are_replaced() {
        let mut config = json!({"pipe": [1, 2, 3]});
        update_recursive(&mut config, &json!({"pipe": [4]})).unwrap();
        assert_eq!(config["pipe"], json!([4]));
    }

    #[test]
    fn test_override_is_not_aliased() {
        let overrides = json!({"model": {"analyzer": "simple"}});
        let mut config = json!({});
        update_recursive(&mut config, &overrides).unwrap();
        config["model"]["analyzer"] = json!("standard");
        assert_eq!(overrides["model"]["analyzer"], "simple");
    }

    #[test]
    fn test_non_mapping_override_rejected() {
        let mut config = json!({"a": 1});
        let err = update_recursive(&mut config, &json!(["a"])).unwrap_err();
        assert!(err.to_string().contains("got an array"));
        assert_eq!(config, json!({"a": 1}));
    }
}
