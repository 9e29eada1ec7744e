//! # autofaq
//!
//! An intent matching skill for FAQ-style dialogue bots.
//!
//! ## Features
//!
//! - Builds a model configuration from a named template plus caller overrides
//! - Trains a TF-IDF question matcher from a two-column CSV, or loads one
//! - Batched `respond` returning one answer and confidence per utterance
//! - Pluggable template stores and classification engines
//!
//! ```no_run
//! use autofaq::prelude::*;
//!
//! let skill = IntentMatchingSkill::new(
//!     IntentMatchingOptions::new()
//!         .data_path("school_faq.csv")
//!         .save_load_path("/tmp/faq1"),
//! )?;
//! let (answers, confidences) = skill.respond(&["hi".to_string()], &[vec![]], None)?;
//! # Ok::<(), autofaq::error::AutofaqError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod skill;

pub mod prelude {
    pub use crate::config::{ConfigStore, update_recursive};
    pub use crate::engine::{ClassificationEngine, IntentMatch, IntentModel, TfIdfEngine};
    pub use crate::error::{AutofaqError, Result};
    pub use crate::skill::{IntentMatchingOptions, IntentMatchingSkill, Lifecycle, Skill};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
