use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};
use crate::model::{LearnedMapping, MappingGroup, SourceItem};

pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    pub version: u32,
    #[serde(default)]
    pub items: Vec<SourceItem>,
    #[serde(default)]
    pub groups: Vec<MappingGroup>,
    #[serde(default)]
    pub learned: Vec<LearnedMapping>,
}

impl MappingDocument {
    pub fn new(
        items: Vec<SourceItem>,
        groups: Vec<MappingGroup>,
        learned: Vec<LearnedMapping>,
    ) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            items,
            groups,
            learned,
        }
    }
}

pub fn export_document(doc: &MappingDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn import_document(json: &str) -> Result<MappingDocument> {
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    let doc: MappingDocument = serde_json::from_str(json)?;
    if doc.version != DOCUMENT_VERSION {
        return Err(MappingError::UnsupportedVersion(doc.version));
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MappingKind;

    #[test]
    fn t_io_001_import_minimal_document() {
        let json = r#"{
            "version": 1,
            "items": [
                {"id": "v-1", "name": "Base Pay", "kind": "variable", "survey": "MGMA"}
            ]
        }"#;
        let doc = import_document(json).expect("import");
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].kind, MappingKind::Variable);
        assert_eq!(doc.items[0].occurrences, 0);
        assert!(doc.learned.is_empty());
    }

    #[test]
    fn t_io_002_rejects_unknown_version() {
        let err = import_document(r#"{"version": 7}"#).expect_err("version");
        assert!(matches!(err, MappingError::UnsupportedVersion(7)));
    }

    #[test]
    fn t_io_003_rejects_malformed_json() {
        let err = import_document("{ not json").expect_err("json");
        assert!(matches!(err, MappingError::Json(_)));
    }

    #[test]
    fn t_io_004_export_is_importable_with_bom() {
        let doc = MappingDocument::new(
            Vec::new(),
            Vec::new(),
            vec![LearnedMapping {
                kind: MappingKind::Region,
                source_name: "NE".to_string(),
                canonical: "Northeast".to_string(),
            }],
        );
        let text = format!("\u{feff}{}", export_document(&doc).expect("export"));
        assert_eq!(import_document(&text).expect("import"), doc);
    }
}
