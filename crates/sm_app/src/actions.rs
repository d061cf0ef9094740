use std::path::PathBuf;
use std::time::Instant;

use sm_core::error::MappingError;
use sm_core::import_export::{export_document, import_document, MappingDocument};
use sm_core::learned::LearnedMappings;
use sm_core::model::{MappingKind, SourceItem};

use crate::prefs::{ListPrefs, PrefsError};
use crate::state::{AppState, Tab};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Prefs(#[from] PrefsError),

    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    SetQuery(String),
    ToggleSelect(String),
    SelectAllFiltered,
    ClearSelection,
    SetCanonicalInput(String),
    GroupSelected,
    Ungroup { canonical: String, kind: MappingKind },
    ApplySuggestions,
    ForgetLearned { kind: MappingKind, source_name: String },
    InvalidateCache(Option<MappingKind>),
    SetDocumentPath(String),
    LoadDocument(PathBuf),
    SaveDocument(PathBuf),
    ImportDocumentText(String),
    ReplaceItems(Vec<SourceItem>),
    Scroll(f32),
    SetLoading(bool),
    SetActiveTab(Tab),
    ApplyPrefs(ListPrefs),
}

pub fn dispatch(state: &mut AppState, action: AppAction) -> Result<(), AppError> {
    match action {
        AppAction::SetQuery(query) => {
            state.set_query(&query);
        }
        AppAction::ToggleSelect(id) => {
            state.board.toggle(&id)?;
        }
        AppAction::SelectAllFiltered => {
            let added = state.board.select_all_filtered();
            state.status = format!("Selected {added} more item(s)");
        }
        AppAction::ClearSelection => {
            state.board.clear_selection();
        }
        AppAction::SetCanonicalInput(value) => {
            state.canonical_input = value;
        }
        AppAction::GroupSelected => {
            let canonical = state.canonical_input.trim().to_string();
            let moved = state.board.group_selected(&canonical)?;
            learn_groups_named(state, &canonical);
            state.canonical_input.clear();
            state.status = format!("Mapped {moved} item(s) to \"{canonical}\"");
        }
        AppAction::Ungroup { canonical, kind } => {
            let restored = state.board.ungroup(&canonical, kind)?;
            state.status = format!("Returned {restored} item(s) from \"{canonical}\"");
        }
        AppAction::ApplySuggestions => {
            let applied = apply_suggestions(state)?;
            state.status = format!("Applied {applied} learned mapping(s)");
        }
        AppAction::ForgetLearned { kind, source_name } => {
            if state.forget(kind, &source_name).is_some() {
                state.status = format!("Forgot \"{source_name}\"");
            }
        }
        AppAction::InvalidateCache(kind) => {
            match kind {
                Some(kind) => {
                    let dropped = state.cache.invalidate_kind(kind);
                    state.status = format!("Dropped {dropped} cached {} mapping(s)", kind.label());
                }
                None => {
                    state.cache.clear();
                    state.status = "Cache cleared".to_string();
                }
            }
        }
        AppAction::SetDocumentPath(path) => {
            state.document_path = path;
        }
        AppAction::LoadDocument(path) => {
            let contents = std::fs::read_to_string(&path).map_err(|source| AppError::Io {
                action: "read",
                path: path.clone(),
                source,
            })?;
            load_document_text(state, &contents)?;
            state.document_path = path.display().to_string();
            state.status = format!("Loaded {}", path.display());
        }
        AppAction::SaveDocument(path) => {
            let doc = MappingDocument::new(
                state.board.unmapped().to_vec(),
                state.board.groups().to_vec(),
                state.learned.iter().cloned().collect(),
            );
            let text = export_document(&doc)?;
            std::fs::write(&path, text).map_err(|source| AppError::Io {
                action: "write",
                path: path.clone(),
                source,
            })?;
            state.status = format!("Saved {}", path.display());
        }
        AppAction::ImportDocumentText(text) => {
            load_document_text(state, &text)?;
            state.status = "Imported mapping document".to_string();
        }
        AppAction::ReplaceItems(items) => {
            state.set_items(items);
        }
        AppAction::Scroll(offset) => {
            state.list.on_scroll(offset, Instant::now());
        }
        AppAction::SetLoading(loading) => {
            state.is_loading = loading;
        }
        AppAction::SetActiveTab(tab) => {
            state.active_tab = tab;
        }
        AppAction::ApplyPrefs(prefs) => {
            state.apply_prefs(prefs)?;
        }
    }
    Ok(())
}

fn load_document_text(state: &mut AppState, text: &str) -> Result<(), AppError> {
    let doc = import_document(text)?;
    tracing::debug!(
        items = doc.items.len(),
        groups = doc.groups.len(),
        learned = doc.learned.len(),
        "document imported"
    );
    state.set_items(doc.items);
    state.board.set_groups(doc.groups);
    state.learned = LearnedMappings::from_mappings(doc.learned);
    state.cache.clear();
    state.list.reset_scroll();
    state.scroll_to_top = true;
    Ok(())
}

/// Records every group called `canonical` as learned and drops stale cache
/// entries for its members.
fn learn_groups_named(state: &mut AppState, canonical: &str) {
    let groups: Vec<_> = state
        .board
        .groups()
        .iter()
        .filter(|group| group.canonical == canonical)
        .cloned()
        .collect();
    for group in &groups {
        state.learned.record_group(group);
        for member in &group.members {
            state.cache.invalidate(group.kind, &member.name);
        }
    }
}

/// Groups every unmapped item that has a learned canonical name. Returns the
/// number of items mapped. Learned names that are blank are skipped. The
/// user's own selection survives, also when grouping fails.
fn apply_suggestions(state: &mut AppState) -> Result<usize, AppError> {
    let unmapped = state.board.unmapped().to_vec();
    let mut by_canonical: Vec<(String, Vec<String>)> = Vec::new();
    for item in &unmapped {
        let Some(canonical) = state.resolve(item.kind, &item.name) else {
            continue;
        };
        if canonical.trim().is_empty() {
            tracing::warn!(source_name = %item.name, "skipping blank learned mapping");
            continue;
        }
        match by_canonical.iter_mut().find(|(name, _)| *name == canonical) {
            Some((_, ids)) => ids.push(item.id.clone()),
            None => by_canonical.push((canonical, vec![item.id.clone()])),
        }
    }

    let previous = state.board.selected_ids().map(str::to_string).collect::<Vec<_>>();
    state.board.clear_selection();
    let outcome = group_each(state, by_canonical);
    state.board.clear_selection();
    for id in previous {
        if state.board.unmapped().iter().any(|item| item.id == id) {
            state.board.toggle(&id)?;
        }
    }
    outcome
}

fn group_each(
    state: &mut AppState,
    by_canonical: Vec<(String, Vec<String>)>,
) -> Result<usize, AppError> {
    let mut applied = 0;
    for (canonical, ids) in by_canonical {
        for id in &ids {
            state.board.toggle(id)?;
        }
        applied += state.board.group_selected(&canonical)?;
    }
    Ok(applied)
}
