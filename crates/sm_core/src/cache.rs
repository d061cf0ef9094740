use std::collections::HashMap;

use crate::model::{normalize_name, LearnedMapping, MappingKind};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f32,
    pub estimated_bytes: usize,
}

/// Read-only view used by the list and the inspector tab.
pub trait CacheStatsSource {
    fn cache_stats(&self) -> CacheStats;
    fn cached_keys(&self) -> Vec<String>;
}

/// Client-side memo of resolved canonical names.
#[derive(Debug, Clone, Default)]
pub struct MappingCache {
    entries: HashMap<(MappingKind, String), LearnedMapping>,
    hits: u64,
    misses: u64,
}

impl MappingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, kind: MappingKind, source_name: &str) -> Option<&LearnedMapping> {
        let found = self.entries.get(&(kind, normalize_name(source_name)));
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    pub fn insert(&mut self, mapping: LearnedMapping) {
        let key = (mapping.kind, normalize_name(&mapping.source_name));
        self.entries.insert(key, mapping);
    }

    pub fn invalidate(&mut self, kind: MappingKind, source_name: &str) -> bool {
        self.entries
            .remove(&(kind, normalize_name(source_name)))
            .is_some()
    }

    pub fn invalidate_kind(&mut self, kind: MappingKind) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(k, _), _| *k != kind);
        before - self.entries.len()
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn estimated_bytes(&self) -> usize {
        self.entries
            .values()
            .map(|mapping| serde_json::to_vec(mapping).map_or(0, |bytes| bytes.len()))
            .sum()
    }
}

impl CacheStatsSource for MappingCache {
    fn cache_stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            self.hits as f32 / lookups as f32
        };
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate,
            estimated_bytes: self.estimated_bytes(),
        }
    }

    fn cached_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .keys()
            .map(|(kind, name)| format!("{}:{name}", kind.label()))
            .collect();
        keys.sort();
        keys
    }
}
