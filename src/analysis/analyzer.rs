//! Analyzers combine a tokenizer with a chain of filters.
//!
//! The TF-IDF engine stores only the analyzer *name* in its persisted model,
//! so every analyzer it can use must be constructible from a name through
//! [`analyzer_by_name`].
//!
//! # Examples
//!
//! ```
//! use autofaq::analysis::analyzer::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("What are the opening hours?").unwrap().collect();
//!
//! // "are" and "the" are stop words
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "what");
//! ```

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::error::{AutofaqError, Result};

mod pipeline;
mod simple;
mod standard;

pub use pipeline::PipelineAnalyzer;
pub use simple::SimpleAnalyzer;
pub use standard::StandardAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so that a fitted vectorizer can score
/// utterance batches from several threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer.
    ///
    /// The name is persisted with trained models and fed back to
    /// [`analyzer_by_name`] on load.
    fn name(&self) -> &'static str;
}

/// Build an analyzer from its configuration name.
///
/// Known names are `standard`, `standard_no_stop`, `simple` and `whitespace`.
pub fn analyzer_by_name(name: &str) -> Result<Arc<dyn Analyzer>> {
    let analyzer: Arc<dyn Analyzer> = match name {
        "standard" => Arc::new(StandardAnalyzer::new()?),
        "standard_no_stop" => Arc::new(StandardAnalyzer::without_stop_words()?),
        "simple" => Arc::new(SimpleAnalyzer::regex()?),
        "whitespace" => Arc::new(SimpleAnalyzer::whitespace()),
        other => {
            return Err(AutofaqError::analysis(format!("Unknown analyzer: {other}")));
        }
    };
    Ok(analyzer)
}
