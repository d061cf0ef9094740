use std::collections::BTreeSet;

use crate::error::{MappingError, Result};
use crate::model::{MappingGroup, MappingKind, SourceItem};
use crate::search::{search_items, SearchField};

/// Working state of the mapping screen: unmapped items, the search filter,
/// the bulk selection and the groups built so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingBoard {
    unmapped: Vec<SourceItem>,
    groups: Vec<MappingGroup>,
    selected: BTreeSet<String>,
    query: String,
    filtered: Vec<usize>,
}

impl Default for MappingBoard {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MappingBoard {
    pub fn new(items: Vec<SourceItem>) -> Self {
        let mut board = Self {
            unmapped: items,
            groups: Vec::new(),
            selected: BTreeSet::new(),
            query: String::new(),
            filtered: Vec::new(),
        };
        board.refilter();
        board
    }

    pub fn unmapped(&self) -> &[SourceItem] {
        &self.unmapped
    }

    pub fn groups(&self) -> &[MappingGroup] {
        &self.groups
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query.clear();
        self.query.push_str(query);
        self.refilter();
    }

    /// Swaps in a new item set. Selections that no longer exist are dropped;
    /// groups are kept.
    pub fn set_items(&mut self, items: Vec<SourceItem>) {
        self.unmapped = items;
        let unmapped = &self.unmapped;
        self.selected
            .retain(|id| unmapped.iter().any(|item| &item.id == id));
        self.refilter();
    }

    pub fn set_groups(&mut self, groups: Vec<MappingGroup>) {
        self.groups = groups;
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered_item(&self, idx: usize) -> Option<&SourceItem> {
        let item_idx = *self.filtered.get(idx)?;
        self.unmapped.get(item_idx)
    }

    /// Positions in `unmapped()` that match the query, in display order.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Flips selection of one unmapped item. Returns the new state, or an
    /// error for ids that are not on the board.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        if !self.unmapped.iter().any(|item| item.id == id) {
            return Err(MappingError::UnknownItem(id.to_string()));
        }
        if self.selected.remove(id) {
            Ok(false)
        } else {
            self.selected.insert(id.to_string());
            Ok(true)
        }
    }

    /// Selects every item matching the current query. Returns how many were
    /// newly selected.
    pub fn select_all_filtered(&mut self) -> usize {
        let before = self.selected.len();
        for &idx in &self.filtered {
            if let Some(item) = self.unmapped.get(idx) {
                self.selected.insert(item.id.clone());
            }
        }
        self.selected.len() - before
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Moves the selected items into groups named `canonical`, one group per
    /// kind. Returns the number of items moved.
    pub fn group_selected(&mut self, canonical: &str) -> Result<usize> {
        let canonical = canonical.trim();
        if canonical.is_empty() {
            return Err(MappingError::EmptyCanonical);
        }
        if self.selected.is_empty() {
            return Err(MappingError::EmptySelection);
        }

        let (picked, rest): (Vec<SourceItem>, Vec<SourceItem>) = std::mem::take(&mut self.unmapped)
            .into_iter()
            .partition(|item| self.selected.contains(&item.id));
        self.unmapped = rest;
        self.selected.clear();

        let moved = picked.len();
        for item in picked {
            let group = self.group_entry(canonical, item.kind);
            group.members.push(item);
        }
        self.refilter();
        tracing::debug!(canonical, moved, "grouped selection");
        Ok(moved)
    }

    /// Dissolves a group and returns its members to the end of the unmapped
    /// list.
    pub fn ungroup(&mut self, canonical: &str, kind: MappingKind) -> Result<usize> {
        let Some(pos) = self
            .groups
            .iter()
            .position(|group| group.canonical == canonical && group.kind == kind)
        else {
            return Err(MappingError::UnknownGroup(canonical.to_string()));
        };
        let group = self.groups.remove(pos);
        let count = group.members.len();
        self.unmapped.extend(group.members);
        self.refilter();
        Ok(count)
    }

    pub fn group(&self, canonical: &str, kind: MappingKind) -> Option<&MappingGroup> {
        self.groups
            .iter()
            .find(|group| group.canonical == canonical && group.kind == kind)
    }

    fn group_entry(&mut self, canonical: &str, kind: MappingKind) -> &mut MappingGroup {
        let pos = match self
            .groups
            .iter()
            .position(|group| group.canonical == canonical && group.kind == kind)
        {
            Some(pos) => pos,
            None => {
                self.groups.push(MappingGroup {
                    canonical: canonical.to_string(),
                    kind,
                    members: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos]
    }

    fn refilter(&mut self) {
        self.filtered = search_items(&self.unmapped, &self.query, SearchField::Either);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, kind: MappingKind) -> SourceItem {
        SourceItem {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            survey: "MGMA".to_string(),
            occurrences: 1,
        }
    }

    fn sample() -> Vec<SourceItem> {
        vec![
            item("1", "Cardiology", MappingKind::Specialty),
            item("2", "Cardiology, General", MappingKind::Specialty),
            item("3", "Northeast", MappingKind::Region),
            item("4", "Pediatrics", MappingKind::Specialty),
        ]
    }

    #[test]
    fn t_board_001_query_filters_in_display_order() {
        let mut board = MappingBoard::new(sample());
        assert_eq!(board.filtered_len(), 4);
        board.set_query("cardio");
        let names: Vec<&str> = board
            .filtered_indices()
            .iter()
            .map(|&idx| board.unmapped()[idx].name.as_str())
            .collect();
        assert_eq!(names, vec!["Cardiology", "Cardiology, General"]);
        assert_eq!(board.filtered_item(1).map(|item| item.id.as_str()), Some("2"));
        assert!(board.filtered_item(2).is_none());
    }

    #[test]
    fn t_board_002_toggle_and_select_all() {
        let mut board = MappingBoard::new(sample());
        assert!(board.toggle("3").expect("toggle"));
        assert!(!board.toggle("3").expect("toggle back"));
        assert!(board.toggle("missing").is_err());

        board.set_query("cardio");
        assert_eq!(board.select_all_filtered(), 2);
        assert_eq!(board.select_all_filtered(), 0);
        assert!(board.is_selected("1") && board.is_selected("2"));
        board.clear_selection();
        assert_eq!(board.selection_len(), 0);
    }

    #[test]
    fn t_board_003_group_selected_moves_items() {
        let mut board = MappingBoard::new(sample());
        board.toggle("1").expect("toggle");
        board.toggle("2").expect("toggle");
        let moved = board.group_selected("Cardiology").expect("group");
        assert_eq!(moved, 2);
        assert_eq!(board.unmapped().len(), 2);
        assert_eq!(board.selection_len(), 0);
        let group = board
            .group("Cardiology", MappingKind::Specialty)
            .expect("group exists");
        assert_eq!(group.members.len(), 2);
    }

    #[test]
    fn t_board_004_group_rejects_empty_input() {
        let mut board = MappingBoard::new(sample());
        assert!(matches!(
            board.group_selected("Anything"),
            Err(MappingError::EmptySelection)
        ));
        board.toggle("4").expect("toggle");
        assert!(matches!(
            board.group_selected("   "),
            Err(MappingError::EmptyCanonical)
        ));
        assert!(board.is_selected("4"));
    }

    #[test]
    fn t_board_005_mixed_kinds_split_into_groups() {
        let mut board = MappingBoard::new(sample());
        board.toggle("1").expect("toggle");
        board.toggle("3").expect("toggle");
        board.group_selected("Misc").expect("group");
        assert_eq!(board.groups().len(), 2);
        assert!(board.group("Misc", MappingKind::Region).is_some());
    }

    #[test]
    fn t_board_006_ungroup_restores_items() {
        let mut board = MappingBoard::new(sample());
        board.toggle("4").expect("toggle");
        board.group_selected("Pediatrics").expect("group");
        assert_eq!(
            board.ungroup("Pediatrics", MappingKind::Specialty).expect("ungroup"),
            1
        );
        assert_eq!(board.unmapped().len(), 4);
        assert!(board.groups().is_empty());
        assert!(board.ungroup("Pediatrics", MappingKind::Specialty).is_err());
    }

    #[test]
    fn t_board_007_set_items_prunes_missing_selection() {
        let mut board = MappingBoard::new(sample());
        board.toggle("1").expect("toggle");
        board.toggle("4").expect("toggle");
        board.set_items(vec![item("4", "Pediatrics", MappingKind::Specialty)]);
        assert_eq!(board.selection_len(), 1);
        assert!(board.is_selected("4"));
    }
}
