use std::collections::BTreeMap;

use crate::model::{normalize_name, LearnedMapping, MappingGroup, MappingKind, SourceItem};

/// Source name → canonical name pairs remembered from earlier mapping
/// sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearnedMappings {
    pairs: BTreeMap<(MappingKind, String), LearnedMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub item_id: String,
    pub canonical: String,
}

impl LearnedMappings {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn from_mappings(mappings: impl IntoIterator<Item = LearnedMapping>) -> Self {
        let mut out = Self::default();
        for mapping in mappings {
            out.insert(mapping);
        }
        out
    }

    pub fn insert(&mut self, mapping: LearnedMapping) -> Option<LearnedMapping> {
        let key = (mapping.kind, normalize_name(&mapping.source_name));
        self.pairs.insert(key, mapping)
    }

    /// Remembers every member of `group`. Returns the number of new or changed
    /// pairs.
    pub fn record_group(&mut self, group: &MappingGroup) -> usize {
        let mut changed = 0;
        for member in &group.members {
            let previous = self.insert(LearnedMapping {
                kind: group.kind,
                source_name: member.name.clone(),
                canonical: group.canonical.clone(),
            });
            if previous.map_or(true, |prev| prev.canonical != group.canonical) {
                changed += 1;
            }
        }
        changed
    }

    pub fn lookup(&self, kind: MappingKind, source_name: &str) -> Option<&LearnedMapping> {
        self.pairs.get(&(kind, normalize_name(source_name)))
    }

    pub fn remove(&mut self, kind: MappingKind, source_name: &str) -> Option<LearnedMapping> {
        self.pairs.remove(&(kind, normalize_name(source_name)))
    }

    /// All pairs, ordered by kind then normalized source name.
    pub fn iter(&self) -> impl Iterator<Item = &LearnedMapping> {
        self.pairs.values()
    }

    pub fn of_kind(&self, kind: MappingKind) -> Vec<&LearnedMapping> {
        self.pairs
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, mapping)| mapping)
            .collect()
    }

    /// Exact (normalized) matches for unmapped items.
    pub fn suggest(&self, items: &[SourceItem]) -> Vec<Suggestion> {
        items
            .iter()
            .filter_map(|item| {
                self.lookup(item.kind, &item.name).map(|mapping| Suggestion {
                    item_id: item.id.clone(),
                    canonical: mapping.canonical.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, name: &str, kind: MappingKind) -> SourceItem {
        SourceItem {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            survey: "AMGA".to_string(),
            occurrences: 3,
        }
    }

    #[test]
    fn t_learn_001_record_group_and_lookup() {
        let group = MappingGroup {
            canonical: "Cardiology".to_string(),
            kind: MappingKind::Specialty,
            members: vec![
                source("1", "Cardiology - General", MappingKind::Specialty),
                source("2", "CARDIOLOGY", MappingKind::Specialty),
            ],
        };
        let mut learned = LearnedMappings::default();
        assert_eq!(learned.record_group(&group), 2);
        assert_eq!(learned.record_group(&group), 0);

        let hit = learned
            .lookup(MappingKind::Specialty, "  cardiology ")
            .expect("hit");
        assert_eq!(hit.canonical, "Cardiology");
        assert!(learned.lookup(MappingKind::Region, "cardiology").is_none());
    }

    #[test]
    fn t_learn_002_suggest_matches_only_known_names() {
        let learned = LearnedMappings::from_mappings(vec![LearnedMapping {
            kind: MappingKind::Region,
            source_name: "North East".to_string(),
            canonical: "Northeast".to_string(),
        }]);
        let items = vec![
            source("r1", "north  east", MappingKind::Region),
            source("r2", "Midwest", MappingKind::Region),
            source("s1", "North East", MappingKind::Specialty),
        ];
        let suggestions = learned.suggest(&items);
        assert_eq!(
            suggestions,
            vec![Suggestion {
                item_id: "r1".to_string(),
                canonical: "Northeast".to_string(),
            }]
        );
    }

    #[test]
    fn t_learn_003_remove_and_filter_by_kind() {
        let mut learned = LearnedMappings::from_mappings(vec![
            LearnedMapping {
                kind: MappingKind::Variable,
                source_name: "Base Pay".to_string(),
                canonical: "Base Salary".to_string(),
            },
            LearnedMapping {
                kind: MappingKind::Region,
                source_name: "NE".to_string(),
                canonical: "Northeast".to_string(),
            },
        ]);
        assert_eq!(learned.of_kind(MappingKind::Variable).len(), 1);
        assert!(learned.remove(MappingKind::Variable, "base pay").is_some());
        assert_eq!(learned.len(), 1);
        assert!(learned.of_kind(MappingKind::Variable).is_empty());
    }
}
