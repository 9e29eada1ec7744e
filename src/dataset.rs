//! FAQ dataset reading.
//!
//! A FAQ dataset is a CSV table with a header row. One column holds question
//! patterns, another the answer to return when an utterance matches that
//! question:
//!
//! ```csv
//! Question,Answer
//! What are your opening hours?,We are open 9am to 5pm.
//! ```

pub mod download;
pub mod reader;

use serde::{Deserialize, Serialize};

pub use reader::{FaqReader, FaqReaderConfig};

/// A single (question pattern, answer) row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPair {
    /// Question pattern an utterance is matched against.
    pub question: String,
    /// Answer returned for the pattern.
    pub answer: String,
}

impl FaqPair {
    /// Create a new pair.
    pub fn new<Q: Into<String>, A: Into<String>>(question: Q, answer: A) -> Self {
        FaqPair {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
