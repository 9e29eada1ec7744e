use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use super::Lifecycle;
use crate::config::{self, ConfigStore, TFIDF_AUTOFAQ};
use crate::error::{AutofaqError, Result};

/// Persistence root used when the caller gives none.
pub const DEFAULT_SAVE_LOAD_PATH: &str = "./faq";

/// Construction options of an [`IntentMatchingSkill`](super::IntentMatchingSkill).
///
/// # Examples
///
/// ```
/// use autofaq::skill::{IntentMatchingOptions, Lifecycle};
///
/// let options = IntentMatchingOptions::new()
///     .data_path("/data/school_faq.csv")
///     .x_col_name("Question")
///     .y_col_name("Answer")
///     .save_load_path("/tmp/faq1")
///     .lifecycle(Lifecycle::Train);
///
/// assert_eq!(options.save_load_path_or_default().to_str(), Some("/tmp/faq1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentMatchingOptions {
    pub data_path: Option<String>,
    pub x_col_name: Option<String>,
    pub y_col_name: Option<String>,
    pub edit_dict: Option<Value>,
    pub save_load_path: Option<PathBuf>,
    pub lifecycle: Lifecycle,
}

impl IntentMatchingOptions {
    /// Options training on the bundled default dataset under `./faq`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the dataset from a local CSV file instead of the default URL.
    pub fn data_path<S: Into<String>>(mut self, data_path: S) -> Self {
        self.data_path = Some(data_path.into());
        self
    }

    /// Column holding question patterns.
    pub fn x_col_name<S: Into<String>>(mut self, name: S) -> Self {
        self.x_col_name = Some(name.into());
        self
    }

    /// Column holding answers.
    pub fn y_col_name<S: Into<String>>(mut self, name: S) -> Self {
        self.y_col_name = Some(name.into());
        self
    }

    /// Override document merged into the configuration last.
    pub fn edit_dict(mut self, edit_dict: Value) -> Self {
        self.edit_dict = Some(edit_dict);
        self
    }

    /// Root directory for the trained model.
    pub fn save_load_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.save_load_path = Some(path.into());
        self
    }

    pub fn lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// The persistence root, falling back to [`DEFAULT_SAVE_LOAD_PATH`].
    pub fn save_load_path_or_default(&self) -> &Path {
        self.save_load_path
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_SAVE_LOAD_PATH))
    }
}

/// Build the model configuration a skill hands to its engine.
///
/// Starts from the `tfidf_autofaq` template of `store` and applies, in this
/// order: the column names, `metadata.variables.ROOT_PATH`, the local data
/// path (which drops `dataset_reader.data_url`), and finally `edit_dict`.
pub fn build_model_config(
    store: &dyn ConfigStore,
    options: &IntentMatchingOptions,
) -> Result<Value> {
    let mut model_config = store.find(TFIDF_AUTOFAQ)?;
    if !model_config.is_object() {
        return Err(AutofaqError::config(format!(
            "template '{TFIDF_AUTOFAQ}' is not a mapping"
        )));
    }

    if let Some(x_col_name) = &options.x_col_name {
        config::set_path(
            &mut model_config,
            &["dataset_reader", "x_col_name"],
            Value::from(x_col_name.as_str()),
        )?;
    }
    if let Some(y_col_name) = &options.y_col_name {
        config::set_path(
            &mut model_config,
            &["dataset_reader", "y_col_name"],
            Value::from(y_col_name.as_str()),
        )?;
    }

    let root_path = options.save_load_path_or_default();
    config::set_path(
        &mut model_config,
        &["metadata", "variables", "ROOT_PATH"],
        Value::from(root_path.to_string_lossy().into_owned()),
    )?;

    if let Some(data_path) = &options.data_path {
        config::remove_path(&mut model_config, &["dataset_reader", "data_url"]);
        config::set_path(
            &mut model_config,
            &["dataset_reader", "data_path"],
            Value::from(data_path.as_str()),
        )?;
    }

    if let Some(edit_dict) = &options.edit_dict {
        config::update_recursive(&mut model_config, edit_dict)?;
    }

    debug!("Model configuration: {model_config}");
    Ok(model_config)
}
