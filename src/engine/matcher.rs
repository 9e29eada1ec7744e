//! TF-IDF question matcher: the model handle of the bundled engine.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tfidf::{TfIdfVectorizer, VectorizerState, cosine_similarity};
use super::{IntentMatch, IntentModel};
use crate::analysis::analyzer::Analyzer;
use crate::dataset::FaqPair;
use crate::error::{AutofaqError, Result};

const STATE_VERSION: u32 = 1;

/// How an utterance is scored against the training questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scoring {
    /// Best cosine similarity to any single question.
    #[default]
    Nearest,
    /// Best average similarity over all questions sharing an answer.
    Prototype,
}

/// Matches utterances to the answers of the most similar FAQ questions.
#[derive(Debug)]
pub struct TfIdfMatcher {
    vectorizer: TfIdfVectorizer,
    /// Distinct answers in order of first appearance.
    answers: Vec<String>,
    /// One TF-IDF vector per training question.
    questions: Vec<Vec<f64>>,
    /// Index into `answers` for every row of `questions`.
    row_answers: Vec<usize>,
    scoring: Scoring,
}

#[derive(Serialize, Deserialize)]
struct MatcherState {
    version: u32,
    vectorizer: VectorizerState,
    answers: Vec<String>,
    questions: Vec<Vec<f64>>,
    row_answers: Vec<usize>,
    scoring: Scoring,
}

impl TfIdfMatcher {
    /// Fit a matcher on FAQ pairs.
    pub fn fit(pairs: &[FaqPair], analyzer: Arc<dyn Analyzer>, scoring: Scoring) -> Result<Self> {
        if pairs.is_empty() {
            return Err(AutofaqError::dataset("no training rows in FAQ dataset"));
        }

        let documents: Vec<String> = pairs.iter().map(|p| p.question.clone()).collect();
        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        vectorizer.fit(&documents)?;

        let mut answers: Vec<String> = Vec::new();
        let mut row_answers = Vec::with_capacity(pairs.len());
        let mut questions = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let idx = match answers.iter().position(|a| a == &pair.answer) {
                Some(idx) => idx,
                None => {
                    answers.push(pair.answer.clone());
                    answers.len() - 1
                }
            };
            row_answers.push(idx);
            questions.push(vectorizer.transform(&pair.question)?);
        }

        Ok(Self {
            vectorizer,
            answers,
            questions,
            row_answers,
            scoring,
        })
    }

    /// Score one utterance.
    ///
    /// An utterance sharing no term with the training questions scores `0.0`
    /// and gets the first answer.
    pub fn score(&self, utterance: &str) -> Result<IntentMatch> {
        let features = self.vectorizer.transform(utterance)?;
        let similarities = self
            .questions
            .iter()
            .map(|question| cosine_similarity(&features, question));

        let (answer, confidence) = match self.scoring {
            Scoring::Nearest => {
                let (row, best) = best_of(similarities);
                (self.row_answers[row], best)
            }
            Scoring::Prototype => {
                let mut totals = vec![(0.0, 0usize); self.answers.len()];
                for (row, similarity) in similarities.enumerate() {
                    let entry = &mut totals[self.row_answers[row]];
                    entry.0 += similarity;
                    entry.1 += 1;
                }
                best_of(totals.iter().map(|&(sum, n)| sum / n.max(1) as f64))
            }
        };

        Ok(IntentMatch::new(
            self.answers[answer].clone(),
            confidence as f32,
        ))
    }

    /// Number of training questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the matcher holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct answers the matcher can return.
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Scoring mode.
    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    /// Write the matcher to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AutofaqError::persistence(parent, e.to_string()))?;
        }

        let state = MatcherState {
            version: STATE_VERSION,
            vectorizer: self.vectorizer.to_state(),
            answers: self.answers.clone(),
            questions: self.questions.clone(),
            row_answers: self.row_answers.clone(),
            scoring: self.scoring,
        };
        let bytes = bincode::serialize(&state)
            .map_err(|e| AutofaqError::persistence(path, e.to_string()))?;
        fs::write(path, bytes).map_err(|e| AutofaqError::persistence(path, e.to_string()))
    }

    /// Read a matcher previously written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AutofaqError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path)?;
        let state: MatcherState = bincode::deserialize(&bytes)
            .map_err(|e| AutofaqError::persistence(path, e.to_string()))?;
        if state.version != STATE_VERSION {
            return Err(AutofaqError::persistence(
                path,
                format!("unsupported model version {}", state.version),
            ));
        }
        if state.questions.len() != state.row_answers.len()
            || state.row_answers.iter().any(|&idx| idx >= state.answers.len())
            || state.questions.is_empty()
        {
            return Err(AutofaqError::persistence(path, "inconsistent model state"));
        }

        let vectorizer = TfIdfVectorizer::from_state(state.vectorizer)
            .map_err(|e| AutofaqError::persistence(path, e.to_string()))?;
        if let Some(row) = state
            .questions
            .iter()
            .position(|q| q.len() != vectorizer.vocabulary_size())
        {
            return Err(AutofaqError::persistence(
                path,
                format!(
                    "question {row} has {} features, vocabulary has {} terms",
                    state.questions[row].len(),
                    vectorizer.vocabulary_size()
                ),
            ));
        }

        Ok(Self {
            vectorizer,
            answers: state.answers,
            questions: state.questions,
            row_answers: state.row_answers,
            scoring: state.scoring,
        })
    }
}

/// Index and value of the first maximum.
fn best_of<I: Iterator<Item = f64>>(scores: I) -> (usize, f64) {
    scores
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (idx, score)| {
            if score > best.1 { (idx, score) } else { best }
        })
}

impl IntentModel for TfIdfMatcher {
    fn infer(&self, utterances: &[String]) -> Result<Vec<IntentMatch>> {
        utterances
            .par_iter()
            .map(|utterance| self.score(utterance))
            .collect()
    }

    fn name(&self) -> &str {
        "tfidf_matcher"
    }
}
