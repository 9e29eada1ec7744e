//! Classification engines and the model handles they produce.
//!
//! The skill never looks inside a trained model. It asks a
//! [`ClassificationEngine`] to either train or load one from a configuration
//! document and keeps the returned [`IntentModel`] for its whole lifetime.
//!
//! # Architecture
//!
//! - [`ClassificationEngine`]: `train` / `load` entry points
//! - [`IntentModel`]: batch-in, batch-out scoring
//! - [`TfIdfEngine`]: bundled engine backed by [`TfIdfMatcher`]
//! - [`TfIdfVectorizer`]: feature extraction for the bundled engine

mod matcher;
mod tfidf;
mod tfidf_engine;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub use matcher::{Scoring, TfIdfMatcher};
pub use tfidf::{TfIdfVectorizer, VectorizerState};
pub use tfidf_engine::{TfIdfEngine, TfIdfModelConfig};

/// The best-matching answer for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentMatch {
    /// Predefined answer of the matched intent.
    pub answer: String,
    /// Engine-defined match strength.
    pub confidence: f32,
}

impl IntentMatch {
    /// Create a new match.
    pub fn new<S: Into<String>>(answer: S, confidence: f32) -> Self {
        IntentMatch {
            answer: answer.into(),
            confidence,
        }
    }
}

/// An opaque trained or loaded model.
///
/// Implementations must return exactly one match per utterance, in input
/// order.
pub trait IntentModel: Send + Sync {
    /// Score a batch of utterances.
    fn infer(&self, utterances: &[String]) -> Result<Vec<IntentMatch>>;

    /// Get the name of this model for debugging and logging.
    fn name(&self) -> &str;
}

/// Trains or loads [`IntentModel`]s from configuration documents.
pub trait ClassificationEngine: Send + Sync {
    /// Train a model from the configured dataset and persist it.
    fn train(&self, config: &Value) -> Result<Box<dyn IntentModel>>;

    /// Load a previously persisted model.
    fn load(&self, config: &Value) -> Result<Box<dyn IntentModel>>;
}
