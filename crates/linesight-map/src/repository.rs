//! Draft store for in-progress mapping reviews.
//!
//! A failed confirmation must never lose the user's edits, including across
//! process restarts. Drafts are stored one JSON file per raw import under a
//! base directory, and deleted only after a confirmation succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linesight_model::{FieldVocabulary, RawImportId};

use crate::state::{MappingEditSession, MappingRow};

/// A persisted snapshot of an edit session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingDraft {
    pub raw_import_id: RawImportId,
    /// Name of the uploaded file, for listings.
    pub filename: String,
    pub rows: Vec<MappingRow>,
    /// Time column chosen so far, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_column: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl MappingDraft {
    /// Snapshot a session's rows into a draft.
    pub fn from_session(
        raw_import_id: RawImportId,
        filename: impl Into<String>,
        session: &MappingEditSession,
        time_column: Option<String>,
    ) -> Self {
        Self {
            raw_import_id,
            filename: filename.into(),
            rows: session.rows().to_vec(),
            time_column,
            saved_at: Utc::now(),
        }
    }

    /// Reopen an edit session from this draft.
    ///
    /// Suggested targets are preserved, so correction tracking keeps working
    /// across restarts.
    pub fn into_session(self, vocabulary: FieldVocabulary) -> MappingEditSession {
        MappingEditSession::resume(self.rows, vocabulary)
    }
}

/// Short listing entry for a stored draft.
#[derive(Debug, Clone)]
pub struct DraftMetadata {
    pub raw_import_id: RawImportId,
    pub filename: String,
    pub row_count: usize,
    pub saved_at: DateTime<Utc>,
    pub file_path: PathBuf,
}

/// File-system store holding one draft per raw import.
#[derive(Debug, Clone)]
pub struct DraftRepository {
    base_dir: PathBuf,
}

impl DraftRepository {
    /// Open (creating if needed) a repository at the given directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("Failed to create draft repository: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write a draft, replacing any previous one for the same import.
    pub fn save(&self, draft: &MappingDraft) -> Result<PathBuf> {
        let path = self.draft_path(&draft.raw_import_id);
        let json = serde_json::to_string_pretty(draft).with_context(|| {
            format!("Failed to serialize draft for {}", draft.raw_import_id)
        })?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write draft to {}", path.display()))?;
        Ok(path)
    }

    /// Load the draft for a raw import. Returns `None` if no draft exists.
    pub fn load(&self, raw_import_id: &RawImportId) -> Result<Option<MappingDraft>> {
        let path = self.draft_path(raw_import_id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read draft from {}", path.display()))?;
        let draft: MappingDraft = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse draft from {}", path.display()))?;
        Ok(Some(draft))
    }

    /// List all stored drafts, newest first.
    pub fn list(&self) -> Result<Vec<DraftMetadata>> {
        let mut metadata = Vec::new();
        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("Failed to read repository: {}", self.base_dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            if let Ok(draft) = serde_json::from_str::<MappingDraft>(&contents) {
                metadata.push(DraftMetadata {
                    raw_import_id: draft.raw_import_id,
                    filename: draft.filename,
                    row_count: draft.rows.len(),
                    saved_at: draft.saved_at,
                    file_path: path,
                });
            }
        }
        metadata.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(metadata)
    }

    /// Delete a draft. Returns false when none existed.
    pub fn delete(&self, raw_import_id: &RawImportId) -> Result<bool> {
        let path = self.draft_path(raw_import_id);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete draft: {}", path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn exists(&self, raw_import_id: &RawImportId) -> bool {
        self.draft_path(raw_import_id).exists()
    }

    fn draft_path(&self, raw_import_id: &RawImportId) -> PathBuf {
        self.base_dir
            .join(format!("{}.json", normalize_id(raw_import_id.as_str())))
    }
}

/// Normalize an ID for use in filenames.
fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_awkward_ids() {
        assert_eq!(normalize_id("imp/2026:05"), "imp_2026_05");
        assert_eq!(normalize_id("  imp-1 "), "imp_1");
    }
}
