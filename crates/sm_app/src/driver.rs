use std::time::Instant;

use sm_core::ListFrame;

use crate::actions::{dispatch, AppAction, AppError};
use crate::prefs::ListPrefs;
use crate::state::{AppState, Tab};

/// Headless front end: runs actions and render passes without a window.
pub struct AppDriver {
    state: AppState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppSnapshot {
    pub unmapped_items: usize,
    pub filtered_items: usize,
    pub mapped_items: usize,
    pub groups: usize,
    pub learned: usize,
    pub selected: usize,
    pub rendered_window: Option<(usize, usize)>,
    pub is_scrolling: bool,
    pub status: String,
    pub active_tab: Tab,
}

/// What one headless render of the unmapped list produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderedList {
    Loading(String),
    Empty(String),
    Rows(Vec<String>),
}

impl Default for AppDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AppDriver {
    pub fn new() -> Self {
        Self::with_prefs(ListPrefs::default())
    }

    pub fn with_prefs(prefs: ListPrefs) -> Self {
        Self {
            state: AppState::with_prefs(prefs),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn dispatch(&mut self, action: AppAction) -> Result<(), AppError> {
        dispatch(&mut self.state, action)
    }

    pub fn scroll_at(&mut self, offset: f32, now: Instant) {
        self.state.list.on_scroll(offset, now);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.list.tick(now)
    }

    /// Renders the filtered unmapped list; rows come back as `index:name`.
    pub fn render(&mut self) -> RenderedList {
        let unmapped = self.state.board.unmapped();
        let frame = self.state.list.render(
            self.state.board.filtered_indices(),
            self.state.is_loading,
            |index, &item_idx, _| match unmapped.get(item_idx) {
                Some(item) => format!("{index}:{}", item.name),
                None => format!("{index}:"),
            },
        );
        match frame {
            ListFrame::Loading { message } => RenderedList::Loading(message),
            ListFrame::Empty { message } => RenderedList::Empty(message),
            ListFrame::Rows { rows, .. } => {
                RenderedList::Rows(rows.into_iter().map(|row| row.content).collect())
            }
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            unmapped_items: self.state.board.unmapped().len(),
            filtered_items: self.state.board.filtered_len(),
            mapped_items: self.state.mapped_count(),
            groups: self.state.board.groups().len(),
            learned: self.state.learned.len(),
            selected: self.state.board.selection_len(),
            rendered_window: self.state.rendered_window(),
            is_scrolling: self.state.list.is_scrolling(),
            status: self.state.status.clone(),
            active_tab: self.state.active_tab,
        }
    }
}
