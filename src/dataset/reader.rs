//! CSV reader for FAQ datasets.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::get_path;
use crate::dataset::FaqPair;
use crate::dataset::download::download_to;
use crate::error::{AutofaqError, Result};

fn default_x_col_name() -> String {
    "Question".to_string()
}

fn default_y_col_name() -> String {
    "Answer".to_string()
}

fn default_delimiter() -> char {
    ','
}

/// The `dataset_reader` section of a model configuration.
///
/// Keys this reader does not know about are ignored, so override documents
/// may carry extra settings for other components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqReaderConfig {
    /// Column holding question patterns.
    #[serde(default = "default_x_col_name")]
    pub x_col_name: String,
    /// Column holding answers.
    #[serde(default = "default_y_col_name")]
    pub y_col_name: String,
    /// Local CSV file. Takes precedence over `data_url`.
    #[serde(default)]
    pub data_path: Option<String>,
    /// Remote CSV file, downloaded on first use.
    #[serde(default)]
    pub data_url: Option<String>,
    /// Field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for FaqReaderConfig {
    fn default() -> Self {
        FaqReaderConfig {
            x_col_name: default_x_col_name(),
            y_col_name: default_y_col_name(),
            data_path: None,
            data_url: None,
            delimiter: default_delimiter(),
        }
    }
}

/// Reads (question, answer) pairs from a CSV source.
#[derive(Debug, Clone)]
pub struct FaqReader {
    config: FaqReaderConfig,
    downloads_dir: PathBuf,
}

impl FaqReader {
    /// Create a reader; remote files are cached under `downloads_dir`.
    pub fn new<P: Into<PathBuf>>(config: FaqReaderConfig, downloads_dir: P) -> Self {
        FaqReader {
            config,
            downloads_dir: downloads_dir.into(),
        }
    }

    /// Build a reader from a model configuration whose variables are resolved.
    ///
    /// Downloads go to `metadata.variables.DOWNLOADS_PATH`, falling back to
    /// `{ROOT_PATH}/downloads` and then to the system temp directory.
    pub fn from_model_config(config: &Value) -> Result<Self> {
        let section = get_path(config, &["dataset_reader"])
            .cloned()
            .ok_or_else(|| AutofaqError::config("missing dataset_reader section"))?;
        let reader_config: FaqReaderConfig = serde_json::from_value(section)
            .map_err(|e| AutofaqError::config(format!("invalid dataset_reader section: {e}")))?;

        let variable = |name: &str| {
            get_path(config, &["metadata", "variables", name])
                .and_then(Value::as_str)
                .map(PathBuf::from)
        };
        let downloads_dir = variable("DOWNLOADS_PATH")
            .or_else(|| variable("ROOT_PATH").map(|root| root.join("downloads")))
            .unwrap_or_else(|| std::env::temp_dir().join("autofaq"));

        Ok(Self::new(reader_config, downloads_dir))
    }

    /// The reader configuration.
    pub fn config(&self) -> &FaqReaderConfig {
        &self.config
    }

    /// Resolve the local file to read, downloading it if necessary.
    pub fn source_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config.data_path {
            return Ok(PathBuf::from(path));
        }
        if let Some(url) = &self.config.data_url {
            return download_to(url, &self.downloads_dir);
        }
        Err(AutofaqError::dataset(
            "dataset_reader needs either data_path or data_url",
        ))
    }

    /// Read every (question, answer) pair of the dataset.
    pub fn read(&self) -> Result<Vec<FaqPair>> {
        let path = self.source_path()?;
        debug!("Reading FAQ dataset from {}", path.display());
        let file = File::open(&path).map_err(|e| unreadable(&path, e))?;
        self.parse(file)
    }

    /// Parse CSV content from any reader.
    pub fn parse<R: Read>(&self, input: R) -> Result<Vec<FaqPair>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter_byte()?)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| AutofaqError::dataset(format!("Failed to read CSV headers: {e}")))?
            .clone();
        let x_index = column_index(&headers, &self.config.x_col_name)?;
        let y_index = column_index(&headers, &self.config.y_col_name)?;

        let mut pairs = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let question = record.get(x_index).unwrap_or_default();
            if question.is_empty() {
                warn!("Skipping row {} with an empty question", row + 2);
                continue;
            }
            let answer = record.get(y_index).unwrap_or_default();
            pairs.push(FaqPair::new(question, answer));
        }

        Ok(pairs)
    }

    fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                AutofaqError::config(format!(
                    "CSV delimiter must be an ASCII character, got {:?}",
                    self.config.delimiter
                ))
            })
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        AutofaqError::dataset(format!(
            "column '{name}' not found, available columns: {}",
            headers.iter().collect::<Vec<_>>().join(", ")
        ))
    })
}

fn unreadable(path: &Path, error: std::io::Error) -> AutofaqError {
    AutofaqError::dataset(format!("cannot read {}: {error}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn reader(x: &str, y: &str) -> FaqReader {
        let config = FaqReaderConfig {
            x_col_name: x.to_string(),
            y_col_name: y.to_string(),
            ..FaqReaderConfig::default()
        };
        FaqReader::new(config, std::env::temp_dir())
    }

    #[test]
    fn test_parse_selects_columns() {
        let csv = "Id,Q,A\n1,What is the fee?,Ten dollars.\n2,\"Where, exactly?\",Room 4";
        let pairs = reader("Q", "A").parse(csv.as_bytes()).unwrap();

        assert_eq!(
            pairs,
            vec![
                FaqPair::new("What is the fee?", "Ten dollars."),
                FaqPair::new("Where, exactly?", "Room 4"),
            ]
        );
    }

    #[test]
    fn test_parse_skips_empty_questions() {
        let csv = "Question,Answer\n,orphan answer\nHi,Hello";
        let pairs = reader("Question", "Answer").parse(csv.as_bytes()).unwrap();
        assert_eq!(pairs, vec![FaqPair::new("Hi", "Hello")]);
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "Question,Reply\nHi,Hello";
        let err = reader("Question", "Answer").parse(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("column 'Answer' not found"));
        assert!(err.to_string().contains("Question, Reply"));
    }

    #[test]
    fn test_custom_delimiter() {
        let config = FaqReaderConfig {
            delimiter: ';',
            ..FaqReaderConfig::default()
        };
        let pairs = FaqReader::new(config, std::env::temp_dir())
            .parse("Question;Answer\nHi;Hello".as_bytes())
            .unwrap();
        assert_eq!(pairs, vec![FaqPair::new("Hi", "Hello")]);
    }

    #[test]
    fn test_from_model_config() {
        let config = json!({
            "dataset_reader": {
                "x_col_name": "Q",
                "data_path": "faq.csv",
                "max_proba": 0.5
            },
            "metadata": {"variables": {"ROOT_PATH": "/tmp/faq1"}}
        });

        let reader = FaqReader::from_model_config(&config).unwrap();
        assert_eq!(reader.config().x_col_name, "Q");
        assert_eq!(reader.config().y_col_name, "Answer");
        assert_eq!(reader.source_path().unwrap(), PathBuf::from("faq.csv"));
    }

    #[test]
    fn test_missing_source() {
        let reader = FaqReader::from_model_config(&json!({"dataset_reader": {}})).unwrap();
        assert!(matches!(reader.read(), Err(AutofaqError::Dataset(_))));
    }

    #[test]
    fn test_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("faq.csv");
        std::fs::write(&path, "Question,Answer\nHi,Hello\n").unwrap();

        let config = FaqReaderConfig {
            data_path: Some(path.to_string_lossy().into_owned()),
            ..FaqReaderConfig::default()
        };
        let pairs = FaqReader::new(config, temp_dir.path()).read().unwrap();
        assert_eq!(pairs.len(), 1);

        let config = FaqReaderConfig {
            data_path: Some(temp_dir.path().join("absent.csv").to_string_lossy().into_owned()),
            ..FaqReaderConfig::default()
        };
        let err = FaqReader::new(config, temp_dir.path()).read().unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
    }
}
