//! Error types for the autofaq library.
//!
//! All fallible operations return [`AutofaqError`] through the crate-wide
//! [`Result`] alias. Construction of a skill surfaces every collaborator
//! failure (template lookup, dataset access, persistence) through this type
//! unchanged.
//!
//! # Examples
//!
//! ```
//! use autofaq::error::{AutofaqError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AutofaqError::config("dataset_reader must be a mapping"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for autofaq operations.
#[derive(Error, Debug)]
pub enum AutofaqError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration document errors (bad shape, bad override)
    #[error("Configuration error: {0}")]
    Config(String),

    /// No configuration template with this name could be resolved
    #[error("Configuration template not found: {name}")]
    TemplateNotFound { name: String },

    /// Dataset could not be read or is unusable
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Remote dataset could not be fetched
    #[error("Download error: {0}")]
    Download(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model training or inference errors
    #[error("Model error: {0}")]
    Model(String),

    /// Persisted model artifact is missing
    #[error("Model artifact not found: {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    /// Model artifact could not be written or decoded
    #[error("Persistence error at {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    /// Input batches passed to a skill are not aligned
    #[error(
        "Batch length mismatch: {utterances} utterances, {history} histories, {states:?} states"
    )]
    BatchMismatch {
        utterances: usize,
        history: usize,
        states: Option<usize>,
    },
}

/// Result type alias for operations that may fail with AutofaqError.
pub type Result<T> = std::result::Result<T, AutofaqError>;

impl AutofaqError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AutofaqError::Config(msg.into())
    }

    /// Create a new template-not-found error.
    pub fn template_not_found<S: Into<String>>(name: S) -> Self {
        AutofaqError::TemplateNotFound { name: name.into() }
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        AutofaqError::Dataset(msg.into())
    }

    /// Create a new download error.
    pub fn download<S: Into<String>>(msg: S) -> Self {
        AutofaqError::Download(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        AutofaqError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        AutofaqError::Model(msg.into())
    }

    /// Create a new persistence error.
    pub fn persistence<P: Into<PathBuf>, S: Into<String>>(path: P, msg: S) -> Self {
        AutofaqError::Persistence {
            path: path.into(),
            message: msg.into(),
        }
    }
}
