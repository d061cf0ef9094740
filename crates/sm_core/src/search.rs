use crate::model::SourceItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    Name,
    Survey,
    #[default]
    Either,
}

/// Indices of matching items, in display order. Matching is a
/// case-insensitive substring test; an empty query matches everything.
pub fn search_items(items: &[SourceItem], query: &str, field: SearchField) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..items.len()).collect();
    }

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| match field {
            SearchField::Name => contains_folded(&item.name, &needle),
            SearchField::Survey => contains_folded(&item.survey, &needle),
            SearchField::Either => {
                contains_folded(&item.name, &needle) || contains_folded(&item.survey, &needle)
            }
        })
        .map(|(index, _)| index)
        .collect()
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
