//! TF-IDF vectorizer for text feature extraction.

use std::collections::HashSet;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, analyzer_by_name};
use crate::error::{AutofaqError, Result};

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Vocabulary: word -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each word.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

/// Serializable form of a fitted [`TfIdfVectorizer`].
///
/// The analyzer is stored by name and rebuilt on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerState {
    pub analyzer: String,
    /// Terms in index order.
    pub terms: Vec<String>,
    pub idf: Vec<f64>,
    pub n_documents: usize,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Terms are indexed in order of first appearance.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.n_documents = documents.len();
        let mut vocabulary = AHashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let tokens = self.tokenize(doc)?;
            let mut seen = HashSet::new();

            for token in tokens {
                if !seen.insert(token.clone()) {
                    continue;
                }
                let next = vocabulary.len();
                let idx = *vocabulary.entry(token).or_insert(next);
                if idx == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[idx] += 1;
            }
        }

        // IDF = ln((N + 1) / (df + 1)) + 1
        let n = self.n_documents as f64;
        self.idf = document_frequency
            .iter()
            .map(|&df| ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect();
        self.vocabulary = vocabulary;

        Ok(())
    }

    /// Transform a document into a TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let tokens = self.tokenize(document)?;
        let mut tf = vec![0.0; self.vocabulary.len()];

        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                tf[idx] += 1.0;
            }
        }

        // Normalize by document length
        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }

        for (count, idf) in tf.iter_mut().zip(&self.idf) {
            *count *= idf;
        }

        Ok(tf)
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyzer
            .analyze(text)?
            .filter(|token| !token.is_stopped() && !token.is_empty())
            .map(|token| token.text)
            .collect())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Capture the fitted state for persistence.
    pub fn to_state(&self) -> VectorizerState {
        let mut terms = vec![String::new(); self.vocabulary.len()];
        for (term, &idx) in self.vocabulary.iter() {
            terms[idx] = term.clone();
        }
        VectorizerState {
            analyzer: self.analyzer.name().to_string(),
            terms,
            idf: self.idf.clone(),
            n_documents: self.n_documents,
        }
    }

    /// Rebuild a fitted vectorizer from persisted state.
    pub fn from_state(state: VectorizerState) -> Result<Self> {
        if state.terms.len() != state.idf.len() {
            return Err(AutofaqError::model(format!(
                "vectorizer state has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            )));
        }
        let analyzer = analyzer_by_name(&state.analyzer)?;
        let vocabulary: AHashMap<String, usize> = state
            .terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
        if vocabulary.len() != state.idf.len() {
            return Err(AutofaqError::model(format!(
                "vectorizer state has {} distinct terms but {} idf weights",
                vocabulary.len(),
                state.idf.len()
            )));
        }

        Ok(Self {
            vocabulary,
            idf: state.idf,
            n_documents: state.n_documents,
            analyzer,
        })
    }
}

/// Calculate cosine similarity between two vectors.
pub(crate) fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        0.0
    } else {
        dot_product / (magnitude_a * magnitude_b)
    }
}
