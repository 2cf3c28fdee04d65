pub mod column_map;
pub mod error;
pub mod fields;
pub mod ids;
pub mod ingestion;
pub mod mapping;
pub mod match_result;

pub use column_map::ColumnMap;
pub use error::{ModelError, Result};
pub use fields::{FieldDef, FieldType, FieldVocabulary};
pub use ids::{DataSourceId, FactoryId, ProductionLineId, RawImportId, SchemaMappingId};
pub use ingestion::{
    DataSource, DataSourcePatch, IngestionStatus, ProductionLine, RawImport, SchemaMapping,
};
pub use mapping::{ConfirmMappingRequest, ConfirmMappingResponse, MappingEntry};
pub use match_result::{ColumnMatchResult, MatchStatus, MatchTier};
