//! Text analysis for the TF-IDF vectorizer.
//!
//! Questions and utterances pass through the same analyzer so that their
//! terms land in the same vocabulary:
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Terms
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
