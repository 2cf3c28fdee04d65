//! Target field vocabulary.
//!
//! The set of system fields a source column may map to. The mapping editor
//! offers a closed selection over this vocabulary so invalid target names
//! never reach the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type of a target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Timestamp,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One valid target field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Canonical field name (e.g., "units_produced").
    pub field: String,
    /// Human-readable label for review UIs.
    pub label: String,
    /// Expected data type.
    pub data_type: FieldType,
    /// Whether a confirmed mapping must include this field.
    pub required: bool,
}

impl FieldDef {
    pub fn new(
        field: impl Into<String>,
        label: impl Into<String>,
        data_type: FieldType,
        required: bool,
    ) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            data_type,
            required,
        }
    }
}

/// Closed vocabulary of valid target fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldVocabulary {
    fields: Vec<FieldDef>,
}

impl FieldVocabulary {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    /// The built-in LineSight production-data vocabulary.
    pub fn standard() -> Self {
        Self::new(vec![
            FieldDef::new("timestamp", "Record timestamp", FieldType::Timestamp, true),
            FieldDef::new("line_id", "Production line", FieldType::Text, true),
            FieldDef::new("style_id", "Style / product code", FieldType::Text, false),
            FieldDef::new("machine_id", "Machine", FieldType::Text, false),
            FieldDef::new("operator_id", "Operator", FieldType::Text, false),
            FieldDef::new("shift", "Shift", FieldType::Text, false),
            FieldDef::new("units_produced", "Units produced", FieldType::Number, false),
            FieldDef::new("defect_count", "Defects", FieldType::Number, false),
            FieldDef::new("rework_count", "Rework", FieldType::Number, false),
            FieldDef::new("efficiency", "Efficiency (%)", FieldType::Number, false),
            FieldDef::new(
                "downtime_minutes",
                "Downtime (min)",
                FieldType::Number,
                false,
            ),
            FieldDef::new("target_output", "Target output", FieldType::Number, false),
        ])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields a confirmed mapping must cover.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_vocabulary_is_closed() {
        let vocab = FieldVocabulary::standard();
        assert!(vocab.contains("units_produced"));
        assert!(!vocab.contains("not_a_field"));
        assert!(vocab.required_fields().any(|f| f.field == "timestamp"));
    }
}
