//! Mapping confirmation payloads.

use serde::{Deserialize, Serialize};

use crate::ids::{DataSourceId, FactoryId, ProductionLineId, RawImportId, SchemaMappingId};

/// One row of a confirmed mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub source_column: String,
    pub target_field: Option<String>,
    pub ignored: bool,
    /// True when the user overrode the backend suggestion.
    pub user_corrected: bool,
}

/// Final mapping submitted back to the backend after review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmMappingRequest {
    pub raw_import_id: RawImportId,
    pub mappings: Vec<MappingEntry>,
    /// Required: which source column carries the record timestamp.
    pub time_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source_id: Option<DataSourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_id: Option<FactoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_line_id: Option<ProductionLineId>,
    /// Ask the backend to learn user corrections as aliases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn_corrections: Option<bool>,
}

/// Backend acknowledgement of a confirmed mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmMappingResponse {
    pub schema_mapping_id: SchemaMappingId,
    pub data_source_id: DataSourceId,
    /// Column aliases the backend learned from this confirmation.
    #[serde(default)]
    pub learned_aliases: Vec<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_optionals() {
        let request = ConfirmMappingRequest {
            raw_import_id: RawImportId::new("imp-1").unwrap(),
            mappings: vec![],
            time_column: "Timestamp".to_string(),
            time_format: None,
            data_source_id: None,
            factory_id: None,
            production_line_id: None,
            learn_corrections: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("time_column"));
        assert!(!object.contains_key("time_format"));
        assert!(!object.contains_key("learn_corrections"));
    }

    #[test]
    fn response_tolerates_missing_aliases() {
        let json = r#"{
            "schema_mapping_id": "sm-1",
            "data_source_id": "ds-1",
            "message": "Mapping confirmed"
        }"#;
        let response: ConfirmMappingResponse = serde_json::from_str(json).unwrap();
        assert!(response.learned_aliases.is_empty());
    }
}
