use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::generic_types::Document;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read the dataset: {0}")]
    ReadError(std::io::Error),

    #[error("Failed to parse the dataset cache: {0}")]
    CacheError(serde_json::Error),
}

/// Load the dataset, preferring the JSON cache sitting next to the TSV
/// source: the first run parses `<stem>.tsv` and writes `<stem>.json`,
/// later runs read the cache directly. A cache that cannot be written
/// is only worth a warning.
pub fn read_input(stem: &str) -> Result<Vec<Document>, DatasetError> {
    let json_path = PathBuf::from(format!("{stem}.json"));
    let tsv_path = PathBuf::from(format!("{stem}.tsv"));

    if json_path.exists() {
        let raw = std::fs::read_to_string(&json_path).map_err(DatasetError::ReadError)?;
        let docs = serde_json::from_str(&raw).map_err(DatasetError::CacheError)?;
        info!("Loaded dataset from cache {}", json_path.display());
        return Ok(docs);
    }

    let docs = read_tsv(&tsv_path)?;
    match serde_json::to_string(&docs) {
        Ok(serialized) => {
            if let Err(e) = std::fs::write(&json_path, serialized) {
                warn!("Could not write dataset cache: {}", e);
            }
        }
        Err(e) => warn!("Could not serialize dataset cache: {}", e),
    }
    info!("Loaded dataset from {} and cached it", tsv_path.display());
    Ok(docs)
}

/// One headline per line: `headline<TAB>category`. An empty or missing
/// category marks the row as unlabeled; rows without a headline are
/// skipped.
pub fn read_tsv(path: &Path) -> Result<Vec<Document>, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(DatasetError::ReadError)?;

    let mut docs = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(2, '\t');
        let headline = parts.next().unwrap_or_default().trim();
        let category = parts.next().map(str::trim).filter(|c| !c.is_empty());
        if headline.is_empty() {
            warn!("Skipping a row with no headline");
            continue;
        }

        docs.push(Document {
            headline: headline.to_string(),
            category: category.map(str::to_string),
        });
    }
    Ok(docs)
}

/// Drop excluded categories, then separate labeled rows from the ones
/// the classifier has to label itself.
pub fn partition(docs: Vec<Document>, excluded: &[String]) -> (Vec<Document>, Vec<Document>) {
    let mut labeled = Vec::new();
    let mut unlabeled = Vec::new();
    for doc in docs {
        match &doc.category {
            Some(category) if excluded.contains(category) => {}
            Some(_) => labeled.push(doc),
            None => unlabeled.push(doc),
        }
    }
    (labeled, unlabeled)
}

/// Distinct categories in first-seen order.
pub fn extract_categories(docs: &[Document]) -> Vec<String> {
    let mut categories = Vec::new();
    for doc in docs {
        if let Some(category) = &doc.category {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
    }
    categories
}

/// Aligned text/label columns out of labeled documents.
pub fn split_x_y(docs: &[Document]) -> (Vec<String>, Vec<String>) {
    let texts = docs.iter().map(|doc| doc.headline.clone()).collect();
    let labels = docs
        .iter()
        .map(|doc| doc.category.clone().unwrap_or_default())
        .collect();
    (texts, labels)
}
