//! Ingestion lifecycle resources.
//!
//! A raw import is created when a file is uploaded and stays `incomplete`
//! until a data source and schema mapping are confirmed. A production line's
//! `data_source` is null until that confirmation completes; "not yet
//! configured" is a valid state, not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::column_map::ColumnMap;
use crate::ids::{DataSourceId, ProductionLineId, RawImportId, SchemaMappingId};

/// Lifecycle status of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStatus {
    /// Uploaded and matched, but no mapping confirmed yet.
    Incomplete,
    /// A data source and schema mapping exist for this import.
    Complete,
}

/// An uploaded file awaiting (or past) mapping confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImport {
    pub id: RawImportId,
    pub filename: String,
    pub ingestion_status: IngestionStatus,
}

/// One immutable, versioned record of confirmed column mappings.
///
/// Confirmed mappings never change in place; a new upload cycle produces a
/// new version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaMapping {
    pub id: SchemaMappingId,
    pub version: u32,
    pub column_map: ColumnMap,
    pub created_at: DateTime<Utc>,
}

/// A confirmed ingestion target tied to a production line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub id: DataSourceId,
    pub name: String,
    /// Which source column carries the record timestamp.
    pub time_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The active schema version, if one has been confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_schema: Option<SchemaMapping>,
}

/// The only fields an existing data source accepts edits to.
///
/// The column map is deliberately absent: changing a confirmed schema
/// requires a new upload cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSourcePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DataSourcePatch {
    pub fn is_empty(&self) -> bool {
        self.time_column.is_none() && self.description.is_none()
    }
}

/// A production line, possibly not yet configured for ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionLine {
    pub id: ProductionLineId,
    pub name: String,
    /// Null until a mapping confirmation creates a data source.
    #[serde(default)]
    pub data_source: Option<DataSource>,
}
