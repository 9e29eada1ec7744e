//! The bundled TF-IDF classification engine.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::matcher::{Scoring, TfIdfMatcher};
use super::{ClassificationEngine, IntentModel};
use crate::analysis::analyzer::analyzer_by_name;
use crate::config::{get_path, variables};
use crate::dataset::FaqReader;
use crate::error::{AutofaqError, Result};

const CLASS_NAME: &str = "tfidf_matcher";

fn default_analyzer() -> String {
    "standard".to_string()
}

/// The `model` section of a model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfModelConfig {
    /// Must be `tfidf_matcher` when present.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Analyzer name, see [`analyzer_by_name`].
    #[serde(default = "default_analyzer")]
    pub analyzer: String,
    #[serde(default)]
    pub scoring: Scoring,
    /// Where `train` writes the model.
    pub save_path: PathBuf,
    /// Where `load` reads the model; defaults to `save_path`.
    #[serde(default)]
    pub load_path: Option<PathBuf>,
}

impl TfIdfModelConfig {
    /// Extract the `model` section from a resolved model configuration.
    pub fn from_model_config(config: &Value) -> Result<Self> {
        let section = get_path(config, &["model"])
            .cloned()
            .ok_or_else(|| AutofaqError::config("missing model section"))?;
        let model: Self = serde_json::from_value(section)
            .map_err(|e| AutofaqError::config(format!("invalid model section: {e}")))?;

        match model.class_name.as_deref() {
            None | Some(CLASS_NAME) => Ok(model),
            Some(other) => Err(AutofaqError::config(format!(
                "model class '{other}' is not supported by the TF-IDF engine"
            ))),
        }
    }

    /// Path the model is loaded from.
    pub fn load_path(&self) -> &Path {
        self.load_path.as_deref().unwrap_or(&self.save_path)
    }
}

/// Trains and loads [`TfIdfMatcher`] models.
///
/// Both entry points substitute `metadata.variables` before reading the
/// configuration, so paths such as `{MODELS_PATH}/faq/model.bin` follow the
/// configured `ROOT_PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfEngine;

impl TfIdfEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        TfIdfEngine
    }
}

impl ClassificationEngine for TfIdfEngine {
    fn train(&self, config: &Value) -> Result<Box<dyn IntentModel>> {
        let resolved = variables::resolve(config)?;
        let model_config = TfIdfModelConfig::from_model_config(&resolved)?;
        let pairs = FaqReader::from_model_config(&resolved)?.read()?;
        debug!(
            "Training {} on {} FAQ rows with the {} analyzer",
            CLASS_NAME,
            pairs.len(),
            model_config.analyzer
        );

        let analyzer = analyzer_by_name(&model_config.analyzer)?;
        let matcher = TfIdfMatcher::fit(&pairs, analyzer, model_config.scoring)?;
        matcher.save(&model_config.save_path)?;
        debug!("Model written to {}", model_config.save_path.display());

        Ok(Box::new(matcher))
    }

    fn load(&self, config: &Value) -> Result<Box<dyn IntentModel>> {
        let resolved = variables::resolve(config)?;
        let model_config = TfIdfModelConfig::from_model_config(&resolved)?;
        debug!("Loading {} from {}", CLASS_NAME, model_config.load_path().display());

        Ok(Box::new(TfIdfMatcher::load(model_config.load_path())?))
    }
}
