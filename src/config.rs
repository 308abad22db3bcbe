//! File-based settings for both engines

use docscope_anomaly::AnomalyConfig;
use docscope_core::{Document, Result};
use docscope_retrieval::RagConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level settings; every key is optional in the JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub anomaly: AnomalyConfig,
    pub rag: RagConfig,
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.anomaly.validate()?;
        self.rag.validate()
    }
}

/// Read a JSON array of documents, filling in missing ids and filenames
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)?;
    let mut docs: Vec<Document> = serde_json::from_str(&raw)?;
    Document::assign_default_ids(&mut docs);
    Ok(docs)
}
