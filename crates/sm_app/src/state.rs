use std::cell::Cell;
use std::rc::Rc;

use sm_core::board::MappingBoard;
use sm_core::cache::{CacheStats, CacheStatsSource, MappingCache};
use sm_core::instrument::TracingSink;
use sm_core::learned::LearnedMappings;
use sm_core::model::{LearnedMapping, MappingKind, SourceItem};
use sm_core::VirtualList;

use crate::prefs::{load_list_prefs, ListPrefs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Unmapped,
    Mapped,
    Learned,
    Cache,
}

impl Tab {
    pub fn all() -> [(Tab, &'static str); 4] {
        [
            (Tab::Unmapped, "Unmapped"),
            (Tab::Mapped, "Mapped"),
            (Tab::Learned, "Learned"),
            (Tab::Cache, "Cache"),
        ]
    }
}

pub type RenderedWindow = Rc<Cell<Option<(usize, usize)>>>;

pub struct AppState {
    pub board: MappingBoard,
    pub learned: LearnedMappings,
    pub cache: MappingCache,
    pub list: VirtualList,
    pub prefs: ListPrefs,

    pub active_tab: Tab,
    pub is_loading: bool,
    pub canonical_input: String,
    pub document_path: String,
    pub status: String,

    /// Set when the list should jump back to the top on the next frame.
    pub scroll_to_top: bool,
    rendered_window: RenderedWindow,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let prefs = load_list_prefs().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring list prefs");
            ListPrefs::default()
        });
        Self::with_prefs(prefs)
    }

    pub fn with_prefs(prefs: ListPrefs) -> Self {
        let mut state = Self {
            board: MappingBoard::default(),
            learned: LearnedMappings::default(),
            cache: MappingCache::new(),
            list: VirtualList::default(),
            prefs: ListPrefs::default(),
            active_tab: Tab::Unmapped,
            is_loading: false,
            canonical_input: String::new(),
            document_path: String::new(),
            status: String::new(),
            scroll_to_top: false,
            rendered_window: Rc::new(Cell::new(None)),
        };
        let window = Rc::clone(&state.rendered_window);
        state
            .list
            .set_on_items_rendered(Some(Box::new(move |start, end| {
                window.set(Some((start, end)));
            })));
        if let Err(err) = state.apply_prefs(prefs) {
            tracing::warn!(error = %err, "list prefs rejected, keeping defaults");
        }
        state
    }

    pub fn apply_prefs(&mut self, prefs: ListPrefs) -> Result<(), crate::prefs::PrefsError> {
        let mut options = prefs.to_options()?;
        options.search_term = self.board.query().to_string();
        self.list.reconfigure(options);
        let sink: Option<Box<dyn sm_core::instrument::RenderSink>> = if prefs.instrumentation {
            Some(Box::new(TracingSink))
        } else {
            None
        };
        self.list.set_render_sink(sink);
        self.prefs = prefs;
        Ok(())
    }

    /// Last range reported by the list, if any rows have been rendered.
    pub fn rendered_window(&self) -> Option<(usize, usize)> {
        self.rendered_window.get()
    }

    pub fn set_query(&mut self, query: &str) {
        self.board.set_query(query);
        self.list.set_search_term(query);
        self.list.reset_scroll();
        self.scroll_to_top = true;
    }

    pub fn set_items(&mut self, items: Vec<SourceItem>) {
        self.board.set_items(items);
    }

    /// Resolves a learned canonical name, going through the cache first.
    pub fn resolve(&mut self, kind: MappingKind, source_name: &str) -> Option<String> {
        if let Some(hit) = self.cache.get(kind, source_name) {
            return Some(hit.canonical.clone());
        }
        let learned = self.learned.lookup(kind, source_name)?.clone();
        let canonical = learned.canonical.clone();
        self.cache.insert(learned);
        Some(canonical)
    }

    pub fn forget(&mut self, kind: MappingKind, source_name: &str) -> Option<LearnedMapping> {
        self.cache.invalidate(kind, source_name);
        self.learned.remove(kind, source_name)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.cache_stats()
    }

    pub fn mapped_count(&self) -> usize {
        self.board
            .groups()
            .iter()
            .map(|group| group.members.len())
            .sum()
    }
}
