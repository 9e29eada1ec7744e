use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use super::options::{IntentMatchingOptions, build_model_config};
use super::{Lifecycle, Skill};
use crate::config::ConfigStore;
use crate::config::store::default_store;
use crate::engine::{ClassificationEngine, IntentModel, TfIdfEngine};
use crate::error::{AutofaqError, Result};

/// Answers utterances with the closest predefined FAQ answer.
///
/// A value of this type always holds a ready model: construction either
/// trains or loads one, or fails.
///
/// # Examples
///
/// ```no_run
/// use autofaq::skill::{IntentMatchingOptions, IntentMatchingSkill, Lifecycle};
///
/// let skill = IntentMatchingSkill::new(
///     IntentMatchingOptions::new()
///         .save_load_path("/tmp/faq1")
///         .lifecycle(Lifecycle::Load),
/// )?;
///
/// let (answers, confidences) =
///     skill.respond(&["when do you open?".to_string()], &[vec![]], None)?;
/// println!("{} ({})", answers[0], confidences[0]);
/// # Ok::<(), autofaq::error::AutofaqError>(())
/// ```
pub struct IntentMatchingSkill {
    model: Box<dyn IntentModel>,
    saved_to: Option<PathBuf>,
}

impl IntentMatchingSkill {
    /// Build a skill with the default template store and the TF-IDF engine.
    pub fn new(options: IntentMatchingOptions) -> Result<Self> {
        Self::with_engine(options, &default_store(), &TfIdfEngine::new())
    }

    /// Build a skill with an explicit template store and engine.
    pub fn with_engine(
        options: IntentMatchingOptions,
        store: &dyn ConfigStore,
        engine: &dyn ClassificationEngine,
    ) -> Result<Self> {
        let model_config = build_model_config(store, &options)?;
        let save_load_path = options.save_load_path_or_default().to_path_buf();

        match options.lifecycle {
            Lifecycle::Train => {
                let model = engine.train(&model_config)?;
                info!("Your model was saved at: '{}'", save_load_path.display());
                Ok(IntentMatchingSkill {
                    model,
                    saved_to: Some(save_load_path),
                })
            }
            Lifecycle::Load => {
                let model = engine.load(&model_config)?;
                debug!("Model loaded from '{}'", save_load_path.display());
                Ok(IntentMatchingSkill {
                    model,
                    saved_to: None,
                })
            }
        }
    }

    /// Where construction saved the trained model, `None` after a load.
    pub fn saved_to(&self) -> Option<&Path> {
        self.saved_to.as_deref()
    }

    /// Answer each utterance with its best match and confidence.
    ///
    /// History and states are only checked for alignment with the
    /// utterances; matching looks at the utterance alone.
    ///
    /// # Errors
    ///
    /// [`AutofaqError::BatchMismatch`] when the batches differ in length, or
    /// the model's own error.
    pub fn respond(
        &self,
        utterances_batch: &[String],
        history_batch: &[Vec<String>],
        states_batch: Option<&[Value]>,
    ) -> Result<(Vec<String>, Vec<f32>)> {
        let utterances = utterances_batch.len();
        let states = states_batch.map(<[Value]>::len);
        if history_batch.len() != utterances || states.is_some_and(|len| len != utterances) {
            return Err(AutofaqError::BatchMismatch {
                utterances,
                history: history_batch.len(),
                states,
            });
        }

        if utterances_batch.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let matches = self.model.infer(utterances_batch)?;
        if matches.len() != utterances {
            return Err(AutofaqError::model(format!(
                "{} returned {} results for {} utterances",
                self.model.name(),
                matches.len(),
                utterances
            )));
        }

        Ok(matches
            .into_iter()
            .map(|m| (m.answer, m.confidence))
            .unzip())
    }
}

impl Skill for IntentMatchingSkill {
    fn respond(
        &self,
        utterances_batch: &[String],
        history_batch: &[Vec<String>],
        states_batch: Option<&[Value]>,
    ) -> Result<(Vec<String>, Vec<f32>)> {
        IntentMatchingSkill::respond(self, utterances_batch, history_batch, states_batch)
    }

    fn name(&self) -> &str {
        "intent_matching"
    }
}

impl fmt::Debug for IntentMatchingSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentMatchingSkill")
            .field("model", &self.model.name())
            .field("saved_to", &self.saved_to)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BundledConfigStore;
    use crate::engine::IntentMatch;

    struct EchoModel;

    impl IntentModel for EchoModel {
        fn infer(&self, utterances: &[String]) -> Result<Vec<IntentMatch>> {
            Ok(utterances
                .iter()
                .map(|u| IntentMatch::new(u.to_uppercase(), u.len() as f32))
                .collect())
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    struct ShortModel;

    impl IntentModel for ShortModel {
        fn infer(&self, _utterances: &[String]) -> Result<Vec<IntentMatch>> {
            Ok(vec![IntentMatch::new("only", 1.0)])
        }

        fn name(&self) -> &str {
            "short"
        }
    }

    struct FixedEngine<F: Fn() -> Box<dyn IntentModel> + Send + Sync>(F);

    impl<F: Fn() -> Box<dyn IntentModel> + Send + Sync> ClassificationEngine for FixedEngine<F> {
        fn train(&self, _config: &Value) -> Result<Box<dyn IntentModel>> {
            Ok((self.0)())
        }

        fn load(&self, _config: &Value) -> Result<Box<dyn IntentModel>> {
            Ok((self.0)())
        }
    }

    fn echo_skill(lifecycle: Lifecycle) -> IntentMatchingSkill {
        let engine = FixedEngine(|| Box::new(EchoModel) as Box<dyn IntentModel>);
        let options = IntentMatchingOptions::new()
            .save_load_path("/tmp/faq1")
            .lifecycle(lifecycle);
        IntentMatchingSkill::with_engine(options, &BundledConfigStore::new(), &engine).unwrap()
    }

    #[test]
    fn test_respond_splits_results() {
        let skill = echo_skill(Lifecycle::Load);
        let utterances = vec!["hi".to_string(), "hours?".to_string()];
        let (answers, confidences) = skill
            .respond(&utterances, &[vec![], vec!["hello".to_string()]], None)
            .unwrap();

        assert_eq!(answers, vec!["HI", "HOURS?"]);
        assert_eq!(confidences, vec![2.0, 6.0]);
    }

    #[test]
    fn test_saved_to_follows_lifecycle() {
        assert_eq!(
            echo_skill(Lifecycle::Train).saved_to(),
            Some(Path::new("/tmp/faq1"))
        );
        assert_eq!(echo_skill(Lifecycle::Load).saved_to(), None);
    }

    #[test]
    fn test_batch_mismatch() {
        let skill = echo_skill(Lifecycle::Load);
        let utterances = vec!["a".to_string(), "b".to_string()];

        let err = skill.respond(&utterances, &[vec![]], None).unwrap_err();
        assert!(matches!(
            err,
            AutofaqError::BatchMismatch {
                utterances: 2,
                history: 1,
                states: None
            }
        ));

        let states = vec![Value::Null];
        let err = skill
            .respond(&utterances, &[vec![], vec![]], Some(&states))
            .unwrap_err();
        assert!(matches!(
            err,
            AutofaqError::BatchMismatch {
                states: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn test_empty_batch_skips_model() {
        let engine = FixedEngine(|| Box::new(ShortModel) as Box<dyn IntentModel>);
        let skill = IntentMatchingSkill::with_engine(
            IntentMatchingOptions::new().lifecycle(Lifecycle::Load),
            &BundledConfigStore::new(),
            &engine,
        )
        .unwrap();

        let (answers, confidences) = skill.respond(&[], &[], None).unwrap();
        assert!(answers.is_empty());
        assert!(confidences.is_empty());
    }

    #[test]
    fn test_model_result_length_checked() {
        let engine = FixedEngine(|| Box::new(ShortModel) as Box<dyn IntentModel>);
        let skill = IntentMatchingSkill::with_engine(
            IntentMatchingOptions::new().lifecycle(Lifecycle::Load),
            &BundledConfigStore::new(),
            &engine,
        )
        .unwrap();

        let utterances = vec!["a".to_string(), "b".to_string()];
        let err = skill.respond(&utterances, &[vec![], vec![]], None).unwrap_err();
        assert!(matches!(err, AutofaqError::Model(_)));
    }

    #[test]
    fn test_skill_trait_object() {
        let skill: Box<dyn Skill> = Box::new(echo_skill(Lifecycle::Load));
        assert_eq!(skill.name(), "intent_matching");

        let (answers, _) = skill.respond(&["x".to_string()], &[vec![]], None).unwrap();
        assert_eq!(answers, vec!["X"]);
    }
}
