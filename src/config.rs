//! Model configuration documents.
//!
//! A model configuration is a nested JSON mapping describing where the
//! dataset lives, which columns hold questions and answers, and where the
//! trained model is persisted. It is kept as a [`serde_json::Value`] because
//! callers may override arbitrary keys the crate does not know about.
//!
//! - [`store`] resolves a template name to a document.
//! - [`merge`] applies sparse override documents.
//! - [`variables`] substitutes `{ROOT_PATH}`-style placeholders.

pub mod merge;
pub mod store;
pub mod variables;

use serde_json::{Map, Value};

use crate::error::{AutofaqError, Result};

pub use merge::update_recursive;
pub use store::{BundledConfigStore, ConfigStore, DirConfigStore, LayeredConfigStore};
pub use variables::resolve;

/// Name of the bundled TF-IDF FAQ template.
pub const TFIDF_AUTOFAQ: &str = "tfidf_autofaq";

/// Look up a nested value by key path.
pub fn get_path<'a>(config: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(config, |node, key| node.as_object()?.get(*key))
}

/// Set a nested value, creating intermediate mappings as needed.
///
/// Fails when an intermediate key already holds something other than a
/// mapping.
pub fn set_path(config: &mut Value, path: &[&str], value: Value) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        return Err(AutofaqError::config("empty configuration path"));
    };

    let mut node = config;
    for (depth, key) in parents.iter().enumerate() {
        let map = as_object_mut(node, &path[..depth])?;
        node = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    as_object_mut(node, parents)?.insert(last.to_string(), value);
    Ok(())
}

/// Remove a nested value, returning it if it was present.
pub fn remove_path(config: &mut Value, path: &[&str]) -> Option<Value> {
    let (last, parents) = path.split_last()?;
    let mut node = config;
    for key in parents {
        node = node.as_object_mut()?.get_mut(*key)?;
    }
    node.as_object_mut()?.shift_remove(*last)
}

fn as_object_mut<'a>(node: &'a mut Value, path: &[&str]) -> Result<&'a mut Map<String, Value>> {
    node.as_object_mut().ok_or_else(|| {
        let location = if path.is_empty() {
            "<root>".to_string()
        } else {
            path.join(".")
        };
        AutofaqError::config(format!("{location} is not a mapping"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_path() {
        let config = json!({"dataset_reader": {"x_col_name": "Question"}});
        assert_eq!(
            get_path(&config, &["dataset_reader", "x_col_name"]),
            Some(&json!("Question"))
        );
        assert_eq!(get_path(&config, &["dataset_reader", "data_url"]), None);
        assert_eq!(get_path(&config, &["dataset_reader", "x_col_name", "deeper"]), None);
    }

    #[test]
    fn test_set_path_creates_parents() {
        let mut config = json!({});
        set_path(&mut config, &["metadata", "variables", "ROOT_PATH"], json!("./faq")).unwrap();
        assert_eq!(config, json!({"metadata": {"variables": {"ROOT_PATH": "./faq"}}}));
    }

    #[test]
    fn test_set_path_through_scalar_fails() {
        let mut config = json!({"metadata": 3});
        let err = set_path(&mut config, &["metadata", "variables"], json!({})).unwrap_err();
        assert!(err.to_string().contains("metadata is not a mapping"));
    }

    #[test]
    fn test_remove_path() {
        let mut config = json!({"dataset_reader": {"data_url": "http://x", "y_col_name": "A"}});
        assert_eq!(
            remove_path(&mut config, &["dataset_reader", "data_url"]),
            Some(json!("http://x"))
        );
        assert_eq!(remove_path(&mut config, &["dataset_reader", "data_url"]), None);
        assert_eq!(config, json!({"dataset_reader": {"y_col_name": "A"}}));
    }
}
