use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Opaque per-document metadata, passed through to results untouched
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A free-text document handed to the engines by an upstream ingestion step.
///
/// Documents are never mutated or retained by the engines beyond the call
/// they are passed to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique within a corpus
    #[serde(default)]
    pub id: String,
    /// Display only
    #[serde(default)]
    pub filename: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Build a document from raw bytes, rejecting anything that is not UTF-8 text
    pub fn from_bytes(
        id: impl Into<String>,
        filename: impl Into<String>,
        bytes: &[u8],
    ) -> Result<Self> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| Error::InvalidInput(format!("content is not UTF-8: {}", e)))?;
        let doc = Self::new(id, filename, content);
        doc.validate()?;
        Ok(doc)
    }

    /// Check that the content looks like text.
    ///
    /// NUL characters only appear when binary data was decoded as text.
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.content.find('\0') {
            return Err(Error::InvalidInput(format!(
                "document '{}' contains binary data (NUL at byte {})",
                self.id, pos
            )));
        }
        Ok(())
    }

    /// Fill in missing ids and filenames from the position in a corpus
    pub fn assign_default_ids(docs: &mut [Document]) {
        for (i, doc) in docs.iter_mut().enumerate() {
            if doc.id.is_empty() {
                doc.id = format!("doc_{}", i);
            }
            if doc.filename.is_empty() {
                doc.filename = format!("document_{}", i);
            }
        }
    }
}
