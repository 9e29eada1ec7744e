//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::args::{AutofaqArgs, OutputFormat};
use crate::error::Result;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub saved_to: String,
    pub duration_ms: u64,
}

/// One answered utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub utterance: String,
    pub answer: String,
    pub confidence: f32,
}

/// Result structure for `ask`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResults {
    pub answers: Vec<AnswerResult>,
    pub duration_ms: u64,
}

impl AskResults {
    /// Zip utterances with the skill's answers and confidences.
    pub fn new(
        utterances: &[String],
        answers: Vec<String>,
        confidences: Vec<f32>,
        duration_ms: u64,
    ) -> Self {
        let answers = utterances
            .iter()
            .zip(answers)
            .zip(confidences)
            .map(|((utterance, answer), confidence)| AnswerResult {
                utterance: utterance.clone(),
                answer,
                confidence,
            })
            .collect();
        AskResults {
            answers,
            duration_ms,
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &AutofaqArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            output_generic_human(&serde_json::to_value(result)?);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output answers, one block per utterance in human format.
pub fn output_answers(results: &AskResults, args: &AutofaqArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            for (i, result) in results.answers.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                if args.verbosity() > 0 {
                    println!("Q: {}", result.utterance);
                }
                println!("A: {}", result.answer);
                if args.verbosity() > 0 {
                    println!("   (confidence: {:.3})", result.confidence);
                }
            }
            if args.verbosity() > 1 {
                println!();
                println!("Answered in {}ms", results.duration_ms);
            }
            Ok(())
        }
        OutputFormat::Json => output_json(results, args),
    }
}

/// Output a configuration document.
///
/// The human format is always pretty-printed JSON.
pub fn output_document(document: &Value, args: &AutofaqArgs) -> Result<()> {
    let json = if args.pretty || args.output_format == OutputFormat::Human {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };

    println!("{json}");
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &AutofaqArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn output_generic_human(value: &Value) {
    match value {
        Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
}

/// Format a JSON value for human display.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
