//! Fetching remote datasets.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{AutofaqError, Result};

/// File name a URL is cached under.
///
/// The last non-empty path segment is used, without query or fragment.
pub fn file_name_for(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .rsplit('/')
        .find(|segment| !segment.is_empty() && !segment.contains(':'))
        .unwrap_or("dataset.csv")
        .to_string()
}

/// Download `url` into `dir` unless a file with the same name is present.
///
/// Returns the local path of the file.
pub fn download_to(url: &str, dir: &Path) -> Result<PathBuf> {
    let target = dir.join(file_name_for(url));
    if target.is_file() {
        debug!("Using cached dataset {}", target.display());
        return Ok(target);
    }

    fs::create_dir_all(dir)?;
    info!("Downloading {} to {}", url, target.display());

    let response = reqwest::blocking::get(url)
        .map_err(|e| AutofaqError::download(format!("{url}: {e}")))?;
    if !response.status().is_success() {
        return Err(AutofaqError::download(format!(
            "{url}: HTTP status {}",
            response.status()
        )));
    }
    let body = response
        .bytes()
        .map_err(|e| AutofaqError::download(format!("{url}: {e}")))?;

    write_complete(&target, &body)?;
    Ok(target)
}

/// Write `contents` next to `target` and move it into place.
///
/// `target` only ever holds a complete file; the `.part` file is removed
/// when either step fails.
fn write_complete(target: &Path, contents: &[u8]) -> Result<()> {
    let partial = target.with_extension("part");
    let written = fs::write(&partial, contents).and_then(|()| fs::rename(&partial, target));
    if let Err(e) = written {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_for() {
        assert_eq!(
            file_name_for("http://files.deeppavlov.ai/faq/school/faq_school_en.csv"),
            "faq_school_en.csv"
        );
        assert_eq!(file_name_for("https://example.com/data.csv?x=1#top"), "data.csv");
        assert_eq!(file_name_for("https://example.com/faq/"), "faq");
        assert_eq!(file_name_for("https://"), "dataset.csv");
    }

    #[test]
    fn test_cached_file_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        let cached = temp_dir.path().join("faq.csv");
        fs::write(&cached, "Question,Answer\n").unwrap();

        // No network access happens when the file is already there.
        let path = download_to("http://unreachable.invalid/faq.csv", temp_dir.path()).unwrap();
        assert_eq!(path, cached);
    }

    #[test]
    fn test_failed_write_leaves_no_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        // a non-empty directory in the way makes the final rename fail
        let target = temp_dir.path().join("faq.csv");
        fs::create_dir_all(target.join("occupied")).unwrap();

        assert!(write_complete(&target, b"Question,Answer\n").is_err());
        assert!(!temp_dir.path().join("faq.part").exists());
    }

    #[test]
    fn test_write_complete() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("faq.csv");

        write_complete(&target, b"Question,Answer\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "Question,Answer\n");
        assert!(!temp_dir.path().join("faq.part").exists());
    }
}
