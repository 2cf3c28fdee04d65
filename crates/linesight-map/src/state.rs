//! Edit-session state for reviewing a suggested column mapping.
//!
//! This is the state behind the mapping review step: an ordered list of
//! editable rows derived once from the suggested mapping, mutated only
//! through explicit edits, and submitted as a whole. Edits survive a failed
//! save; the session only closes after a successful one.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use linesight_model::{
    ConfirmMappingRequest, DataSourceId, FactoryId, FieldVocabulary, MappingEntry,
    ProductionLineId, RawImportId,
};

use crate::error::MappingError;

/// How long a session lingers after a successful save before closing.
pub const CLOSE_DELAY: Duration = Duration::from_millis(1500);

/// One editable row: a source column and its chosen target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    /// Column name from the uploaded file. Fixed for the session's lifetime.
    pub source: String,
    /// Chosen target field; empty means "not selected yet".
    pub target: String,
    /// The backend's original suggestion, kept to detect user corrections.
    pub suggested: String,
    /// Whether this column is excluded from ingestion.
    pub ignored: bool,
}

impl MappingRow {
    /// True when the user changed this row away from the suggestion.
    pub fn user_corrected(&self) -> bool {
        self.target != self.suggested
    }
}

/// Save lifecycle of a session.
///
/// Only one save is in flight at a time; the trigger is refused while
/// `Saving` rather than cancelling the prior request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    /// Save succeeded; the session closes after [`CLOSE_DELAY`].
    Saved,
    /// Save failed; the session stays open with all edits intact.
    Failed(String),
}

/// Optional context for building a confirmation request.
#[derive(Debug, Clone, Default)]
pub struct ConfirmOptions {
    pub time_format: Option<String>,
    pub data_source_id: Option<DataSourceId>,
    pub factory_id: Option<FactoryId>,
    pub production_line_id: Option<ProductionLineId>,
    pub learn_corrections: Option<bool>,
}

/// Interactive edit session over a suggested column mapping.
#[derive(Debug, Clone)]
pub struct MappingEditSession {
    rows: Vec<MappingRow>,
    vocabulary: FieldVocabulary,
    save_state: SaveState,
}

impl MappingEditSession {
    /// Open a session from `(source column, suggested target)` pairs.
    ///
    /// Rows keep the iteration order of the input; N pairs produce exactly N
    /// rows. Suggested targets are mirrored as-is, including empty ones.
    pub fn open(
        initial_mapping: impl IntoIterator<Item = (String, String)>,
        vocabulary: FieldVocabulary,
    ) -> Self {
        let rows = initial_mapping
            .into_iter()
            .map(|(source, target)| MappingRow {
                suggested: target.clone(),
                source,
                target,
                ignored: false,
            })
            .collect();
        Self {
            rows,
            vocabulary,
            save_state: SaveState::Idle,
        }
    }

    /// Rebuild a session from previously saved rows.
    pub fn resume(rows: Vec<MappingRow>, vocabulary: FieldVocabulary) -> Self {
        Self {
            rows,
            vocabulary,
            save_state: SaveState::Idle,
        }
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary(&self) -> &FieldVocabulary {
        &self.vocabulary
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save_state
    }

    /// Set row `index`'s target field.
    ///
    /// The target must come from the vocabulary: this is a closed selection,
    /// so invalid field names never reach the backend.
    pub fn set_target(&mut self, index: usize, field: &str) -> Result<(), MappingError> {
        self.ensure_editable()?;
        if !self.vocabulary.contains(field) {
            return Err(MappingError::UnknownField(field.to_string()));
        }
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(MappingError::RowOutOfRange { index, len })?;
        row.target = field.to_string();
        Ok(())
    }

    /// Set a row's target field, addressing the row by source column name.
    pub fn set_target_by_source(&mut self, source: &str, field: &str) -> Result<(), MappingError> {
        let index = self
            .rows
            .iter()
            .position(|r| r.source == source)
            .ok_or_else(|| MappingError::ColumnNotFound(source.to_string()))?;
        self.set_target(index, field)
    }

    /// Reset row `index` to "not selected".
    pub fn clear_target(&mut self, index: usize) -> Result<(), MappingError> {
        self.ensure_editable()?;
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(MappingError::RowOutOfRange { index, len })?;
        row.target.clear();
        Ok(())
    }

    /// Include or exclude a column, addressing the row by source name.
    pub fn set_ignored_by_source(
        &mut self,
        source: &str,
        ignored: bool,
    ) -> Result<(), MappingError> {
        self.ensure_editable()?;
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.source == source)
            .ok_or_else(|| MappingError::ColumnNotFound(source.to_string()))?;
        row.ignored = ignored;
        Ok(())
    }

    /// Source columns that still need a target before submission.
    pub fn unmapped_columns(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| !r.ignored && r.target.is_empty())
            .map(|r| r.source.as_str())
            .collect()
    }

    /// Whether the submit action is enabled.
    ///
    /// False with zero rows, or while any non-ignored row has no target.
    pub fn can_submit(&self) -> bool {
        !self.rows.is_empty() && self.unmapped_columns().is_empty()
    }

    /// Why submission is currently refused, if it is.
    pub fn submit_blocker(&self) -> Option<MappingError> {
        if self.rows.is_empty() {
            return Some(MappingError::NoRows);
        }
        let unmapped = self.unmapped_columns();
        if unmapped.is_empty() {
            None
        } else {
            Some(MappingError::UnmappedColumns(
                unmapped.into_iter().map(str::to_string).collect(),
            ))
        }
    }

    /// The entries a submission would carry right now.
    pub fn entries(&self) -> Vec<MappingEntry> {
        self.rows
            .iter()
            .map(|row| MappingEntry {
                source_column: row.source.clone(),
                target_field: if row.target.is_empty() {
                    None
                } else {
                    Some(row.target.clone())
                },
                ignored: row.ignored,
                user_corrected: row.user_corrected(),
            })
            .collect()
    }

    /// Build the confirmation request for this session.
    ///
    /// Validation failures (no time column, unmapped rows) are caught here,
    /// before any network call is made.
    pub fn to_request(
        &self,
        raw_import_id: RawImportId,
        time_column: &str,
        options: ConfirmOptions,
    ) -> Result<ConfirmMappingRequest, MappingError> {
        if time_column.trim().is_empty() {
            return Err(MappingError::MissingTimeColumn);
        }
        if let Some(blocker) = self.submit_blocker() {
            return Err(blocker);
        }
        Ok(ConfirmMappingRequest {
            raw_import_id,
            mappings: self.entries(),
            time_column: time_column.to_string(),
            time_format: options.time_format,
            data_source_id: options.data_source_id,
            factory_id: options.factory_id,
            production_line_id: options.production_line_id,
            learn_corrections: options.learn_corrections,
        })
    }

    /// Mark the save as started. Refused while another save is in flight or
    /// while the mapping is not submittable.
    pub fn begin_save(&mut self) -> Result<(), MappingError> {
        if self.save_state == SaveState::Saving {
            return Err(MappingError::SaveInFlight);
        }
        if let Some(blocker) = self.submit_blocker() {
            return Err(blocker);
        }
        self.save_state = SaveState::Saving;
        Ok(())
    }

    /// Record a failed save. The session stays open and every edit is kept.
    ///
    /// Returns false when no save was in flight.
    pub fn save_failed(&mut self, message: impl Into<String>) -> bool {
        if self.save_state != SaveState::Saving {
            return false;
        }
        self.save_state = SaveState::Failed(message.into());
        true
    }

    /// Record a successful save. Returns false when no save was in flight.
    pub fn save_succeeded(&mut self) -> bool {
        if self.save_state != SaveState::Saving {
            return false;
        }
        self.save_state = SaveState::Saved;
        true
    }

    /// After a successful save, how long until the session closes.
    pub fn close_after(&self) -> Option<Duration> {
        match self.save_state {
            SaveState::Saved => Some(CLOSE_DELAY),
            _ => None,
        }
    }

    fn ensure_editable(&self) -> Result<(), MappingError> {
        if self.save_state == SaveState::Saving {
            return Err(MappingError::SaveInFlight);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> FieldVocabulary {
        FieldVocabulary::standard()
    }

    fn two_row_session() -> MappingEditSession {
        MappingEditSession::open(
            vec![
                ("Col A".to_string(), "line_id".to_string()),
                ("Col B".to_string(), String::new()),
            ],
            vocab(),
        )
    }

    #[test]
    fn open_produces_one_row_per_entry() {
        let session = two_row_session();
        assert_eq!(session.len(), 2);
        assert_eq!(session.rows()[0].source, "Col A");
        assert_eq!(session.rows()[0].target, "line_id");
        assert_eq!(session.rows()[1].target, "");
    }

    #[test]
    fn submit_disabled_until_all_rows_mapped() {
        let mut session = two_row_session();
        assert!(!session.can_submit());
        assert!(matches!(
            session.submit_blocker(),
            Some(MappingError::UnmappedColumns(_))
        ));

        session.set_target(1, "style_id").unwrap();
        assert!(session.can_submit());
        assert!(session.submit_blocker().is_none());
    }

    #[test]
    fn submit_disabled_with_no_rows() {
        let session = MappingEditSession::open(Vec::new(), vocab());
        assert!(!session.can_submit());
        assert!(matches!(session.submit_blocker(), Some(MappingError::NoRows)));
    }

    #[test]
    fn edits_are_closed_over_the_vocabulary() {
        let mut session = two_row_session();
        let err = session.set_target(0, "definitely_not_a_field").unwrap_err();
        assert_eq!(
            err,
            MappingError::UnknownField("definitely_not_a_field".to_string())
        );
        // The failed edit left the row untouched.
        assert_eq!(session.rows()[0].target, "line_id");
    }

    #[test]
    fn ignored_rows_do_not_block_submission() {
        let mut session = two_row_session();
        session.set_ignored_by_source("Col B", true).unwrap();
        assert!(session.can_submit());

        let entries = session.entries();
        assert!(entries[1].ignored);
        assert_eq!(entries[1].target_field, None);
    }

    #[test]
    fn user_corrected_tracks_divergence_from_suggestion() {
        let mut session = two_row_session();
        session.set_target(0, "machine_id").unwrap();
        session.set_target(1, "style_id").unwrap();

        let entries = session.entries();
        assert!(entries[0].user_corrected);
        assert!(entries[1].user_corrected);

        // Restoring the suggestion clears the correction flag.
        session.set_target(0, "line_id").unwrap();
        assert!(!session.entries()[0].user_corrected);
    }

    #[test]
    fn only_one_save_in_flight() {
        let mut session = two_row_session();
        session.set_target(1, "style_id").unwrap();
        session.begin_save().unwrap();
        assert_eq!(session.begin_save().unwrap_err(), MappingError::SaveInFlight);
        assert_eq!(
            session.set_target(0, "shift").unwrap_err(),
            MappingError::SaveInFlight
        );
    }

    #[test]
    fn failed_save_keeps_edits_and_allows_retry() {
        let mut session = two_row_session();
        session.set_target(1, "style_id").unwrap();
        session.begin_save().unwrap();
        assert!(session.save_failed("500 from backend"));

        assert_eq!(
            session.save_state(),
            &SaveState::Failed("500 from backend".to_string())
        );
        assert_eq!(session.rows()[1].target, "style_id");
        assert!(session.close_after().is_none());

        // Recovery is user-initiated: saving again just works.
        session.begin_save().unwrap();
        assert!(session.save_succeeded());
        assert_eq!(session.close_after(), Some(CLOSE_DELAY));
    }

    #[test]
    fn save_transitions_require_a_save_in_flight() {
        let mut session = two_row_session();
        assert!(!session.save_failed("nope"));
        assert!(!session.save_succeeded());
    }

    #[test]
    fn to_request_requires_time_column() {
        let mut session = two_row_session();
        session.set_target(1, "style_id").unwrap();
        let id = RawImportId::new("imp-1").unwrap();

        let err = session
            .to_request(id.clone(), "  ", ConfirmOptions::default())
            .unwrap_err();
        assert_eq!(err, MappingError::MissingTimeColumn);

        let request = session
            .to_request(id, "Timestamp", ConfirmOptions::default())
            .unwrap();
        assert_eq!(request.time_column, "Timestamp");
        assert_eq!(request.mappings.len(), 2);
    }
}
