use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingKind {
    Specialty,
    Variable,
    Region,
    ProviderType,
}

impl MappingKind {
    pub fn all() -> [MappingKind; 4] {
        [
            MappingKind::Specialty,
            MappingKind::Variable,
            MappingKind::Region,
            MappingKind::ProviderType,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MappingKind::Specialty => "Specialty",
            MappingKind::Variable => "Variable",
            MappingKind::Region => "Region",
            MappingKind::ProviderType => "Provider type",
        }
    }
}

/// A raw name as it appeared in an uploaded survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub id: String,
    pub name: String,
    pub kind: MappingKind,
    pub survey: String,
    #[serde(default)]
    pub occurrences: u32,
}

/// Source items grouped under one standardized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingGroup {
    pub canonical: String,
    pub kind: MappingKind,
    pub members: Vec<SourceItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LearnedMapping {
    pub kind: MappingKind,
    pub source_name: String,
    pub canonical: String,
}

/// Lowercases, trims and collapses inner whitespace so cosmetic variants of a
/// survey label compare equal.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_model_001_normalize_collapses_case_and_spacing() {
        assert_eq!(normalize_name("  Family   Medicine "), "family medicine");
        assert_eq!(normalize_name("OB/GYN"), "ob/gyn");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn t_model_002_kind_serializes_snake_case() {
        let json = serde_json::to_string(&MappingKind::ProviderType).expect("serialize");
        assert_eq!(json, "\"provider_type\"");
    }
}
