//! Simple analyzer that tokenizes without filtering.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer, WhitespaceTokenizer};
use crate::error::Result;

/// A simple analyzer that just tokenizes, preserving case and stop words.
#[derive(Clone)]
pub struct SimpleAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    name: &'static str,
}

impl SimpleAnalyzer {
    /// Create a simple analyzer over the `\w+` regex tokenizer.
    pub fn regex() -> Result<Self> {
        Ok(SimpleAnalyzer {
            tokenizer: Arc::new(RegexTokenizer::new()?),
            name: "simple",
        })
    }

    /// Create a simple analyzer that splits on whitespace only.
    pub fn whitespace() -> Self {
        SimpleAnalyzer {
            tokenizer: Arc::new(WhitespaceTokenizer::new()),
            name: "whitespace",
        }
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for SimpleAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}
