use std::fmt;

use crate::error::ModelError;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::InvalidId {
                        kind: $kind,
                        value,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier assigned by the backend when a file is uploaded.
    ///
    /// Every match/confirm round trip for one uploaded file carries the same
    /// raw import id.
    RawImportId,
    "raw import id"
);

string_id!(
    /// Identifier of a confirmed, persisted ingestion target.
    DataSourceId,
    "data source id"
);

string_id!(
    /// Identifier of one immutable schema mapping version.
    SchemaMappingId,
    "schema mapping id"
);

string_id!(FactoryId, "factory id");

string_id!(ProductionLineId, "production line id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert!(RawImportId::new("").is_err());
        assert!(DataSourceId::new("   ").is_err());
    }

    #[test]
    fn trims_and_displays() {
        let id = RawImportId::new("  imp-7 ").unwrap();
        assert_eq!(id.as_str(), "imp-7");
        assert_eq!(id.to_string(), "imp-7");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = SchemaMappingId::new("sm-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sm-1\"");
    }
}
