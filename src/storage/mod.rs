// src/storage/mod.rs
use crate::extractors::models::AnalysisResult;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
}

/// Turns a drug name into a file-name stem: lowercase, non-alphanumeric runs
/// collapsed to a single underscore.
pub fn file_stem_for(drug_name: &str) -> String {
    let mut stem = String::with_capacity(drug_name.len());
    for c in drug_name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            stem.push(c);
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_end_matches('_');
    if stem.is_empty() {
        "unnamed".to_string()
    } else {
        stem.to_string()
    }
}

/// Serializes a report as JSON, pretty or compact. Non-ASCII text is kept verbatim.
pub fn render_report(report: &AnalysisResult, pretty: bool) -> Result<String, StorageError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    rendered.map_err(|e| StorageError::SerializationError(e.to_string()))
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn report_path(&self, report: &AnalysisResult) -> PathBuf {
        self.base_dir.join(format!("{}_analysis.json", file_stem_for(&report.drug_name)))
    }

    /// Writes the report to `<base_dir>/<drug>_analysis.json`, replacing any earlier run.
    pub fn save_report(&self, report: &AnalysisResult, pretty: bool) -> Result<PathBuf, StorageError> {
        let file_path = self.report_path(report);
        let body = render_report(report, pretty)?;

        fs::write(&file_path, body).map_err(StorageError::IoError)?;

        tracing::info!("Saved analysis to {}", file_path.display());

        Ok(file_path)
    }
}
