//! Conversational skills.
//!
//! A skill receives a batch of user utterances together with the dialogue
//! history and state of each one, and answers every utterance with a text and
//! a confidence. The dialogue orchestrator picks among skills by confidence.

mod intent_matching;
mod options;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub use intent_matching::IntentMatchingSkill;
pub use options::{DEFAULT_SAVE_LOAD_PATH, IntentMatchingOptions, build_model_config};

/// A component answering batches of utterances.
pub trait Skill: Send + Sync {
    /// Answer each utterance of the batch.
    ///
    /// `history_batch[i]` and `states_batch[i]` belong to
    /// `utterances_batch[i]`. The result vectors have the length of
    /// `utterances_batch`.
    fn respond(
        &self,
        utterances_batch: &[String],
        history_batch: &[Vec<String>],
        states_batch: Option<&[Value]>,
    ) -> Result<(Vec<String>, Vec<f32>)>;

    /// Get the name of this skill for debugging and logging.
    fn name(&self) -> &str;
}

/// Whether construction trains a new model or loads a persisted one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Fit a model on the dataset and persist it.
    #[default]
    Train,
    /// Restore a model persisted by an earlier `Train`.
    Load,
}

impl From<bool> for Lifecycle {
    fn from(train: bool) -> Self {
        if train {
            Lifecycle::Train
        } else {
            Lifecycle::Load
        }
    }
}
