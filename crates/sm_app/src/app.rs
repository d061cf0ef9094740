use std::path::PathBuf;

use eframe::egui::{
    self, Align, CentralPanel, Color32, Layout, RichText, ScrollArea, Sense, TextEdit,
    TopBottomPanel,
};
use sm_core::cache::CacheStatsSource;
use sm_core::model::{MappingKind, SourceItem};

use crate::actions::{dispatch, AppAction};
use crate::list_view::{show_virtual_list, RowCtx};
use crate::state::{AppState, Tab};
use crate::theme;

pub fn launch(state: AppState) -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Survey Mapper",
        options,
        Box::new(move |cc| {
            theme::install_theme(&cc.egui_ctx);
            Box::new(SurveyMapperApp::new(state))
        }),
    )
}

pub struct SurveyMapperApp {
    state: AppState,
    pending: Vec<AppAction>,
}

impl SurveyMapperApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            pending: Vec::new(),
        }
    }

    fn run_action(&mut self, action: AppAction) {
        if let Err(err) = dispatch(&mut self.state, action) {
            tracing::warn!(error = %err, "action failed");
            self.state.status = err.to_string();
        }
    }

    fn flush_pending(&mut self) {
        for action in std::mem::take(&mut self.pending) {
            self.run_action(action);
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Document");
            let mut path = self.state.document_path.clone();
            if ui
                .add(
                    TextEdit::singleline(&mut path)
                        .hint_text("mappings.json")
                        .desired_width(280.0),
                )
                .changed()
            {
                self.pending.push(AppAction::SetDocumentPath(path));
            }
            let has_path = !self.state.document_path.trim().is_empty();
            if ui.add_enabled(has_path, egui::Button::new("Load")).clicked() {
                let path = PathBuf::from(self.state.document_path.trim());
                self.pending.push(AppAction::LoadDocument(path));
            }
            if ui.add_enabled(has_path, egui::Button::new("Save")).clicked() {
                let path = PathBuf::from(self.state.document_path.trim());
                self.pending.push(AppAction::SaveDocument(path));
            }
        });
        ui.horizontal_wrapped(|ui| {
            for (tab, label) in Tab::all() {
                let selected = self.state.active_tab == tab;
                if ui.selectable_label(selected, label).clicked() {
                    self.pending.push(AppAction::SetActiveTab(tab));
                }
            }
        });
    }

    fn draw_unmapped_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Search");
            let mut query = self.state.board.query().to_string();
            if ui
                .add(
                    TextEdit::singleline(&mut query)
                        .hint_text("source name or survey")
                        .desired_width(220.0),
                )
                .changed()
            {
                self.pending.push(AppAction::SetQuery(query));
            }
            ui.weak(format!(
                "{} of {}",
                self.state.board.filtered_len(),
                self.state.board.unmapped().len()
            ));
        });

        let selected = self.state.board.selection_len();
        ui.horizontal(|ui| {
            if ui.button("Select all").clicked() {
                self.pending.push(AppAction::SelectAllFiltered);
            }
            if ui
                .add_enabled(selected > 0, egui::Button::new("Clear"))
                .clicked()
            {
                self.pending.push(AppAction::ClearSelection);
            }
            ui.separator();
            let mut canonical = self.state.canonical_input.clone();
            if ui
                .add(
                    TextEdit::singleline(&mut canonical)
                        .hint_text("canonical name")
                        .desired_width(200.0),
                )
                .changed()
            {
                self.pending.push(AppAction::SetCanonicalInput(canonical));
            }
            let can_group = selected > 0 && !self.state.canonical_input.trim().is_empty();
            if ui
                .add_enabled(can_group, egui::Button::new(format!("Map {selected} selected")))
                .clicked()
            {
                self.pending.push(AppAction::GroupSelected);
            }
            ui.separator();
            if ui.button("Apply learned").clicked() {
                self.pending.push(AppAction::ApplySuggestions);
            }
        });
        ui.separator();

        let jump_to = std::mem::take(&mut self.state.scroll_to_top).then_some(0.0);
        let board = &self.state.board;
        let pending = &mut self.pending;
        show_virtual_list(
            ui,
            "unmapped_items",
            &mut self.state.list,
            board.filtered_indices(),
            self.state.is_loading,
            jump_to,
            |ui, row, &item_idx| {
                if let Some(item) = board.unmapped().get(item_idx) {
                    paint_item_row(ui, row, item, board.is_selected(&item.id), pending);
                }
            },
        );
    }

    fn draw_mapped_tab(&mut self, ui: &mut egui::Ui) {
        if self.state.board.groups().is_empty() {
            ui.weak("No mappings yet");
            return;
        }
        ScrollArea::vertical()
            .id_source("mapped_groups")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for group in self.state.board.groups() {
                    ui.horizontal(|ui| {
                        ui.collapsing(
                            format!(
                                "{} ({}, {} item(s))",
                                group.canonical,
                                group.kind.label(),
                                group.members.len()
                            ),
                            |ui| {
                                for member in &group.members {
                                    ui.label(format!("{}  ·  {}", member.name, member.survey));
                                }
                            },
                        );
                        if ui.small_button("Unmap").clicked() {
                            self.pending.push(AppAction::Ungroup {
                                canonical: group.canonical.clone(),
                                kind: group.kind,
                            });
                        }
                    });
                }
            });
    }

    fn draw_learned_tab(&mut self, ui: &mut egui::Ui) {
        if self.state.learned.is_empty() {
            ui.weak("Nothing learned yet");
            return;
        }
        ScrollArea::vertical()
            .id_source("learned_mappings")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                egui::Grid::new("learned_grid")
                    .striped(true)
                    .num_columns(4)
                    .show(ui, |ui| {
                        ui.strong("Kind");
                        ui.strong("Source");
                        ui.strong("Canonical");
                        ui.end_row();
                        for mapping in self.state.learned.iter() {
                            ui.label(mapping.kind.label());
                            ui.label(&mapping.source_name);
                            ui.label(&mapping.canonical);
                            if ui.small_button("Forget").clicked() {
                                self.pending.push(AppAction::ForgetLearned {
                                    kind: mapping.kind,
                                    source_name: mapping.source_name.clone(),
                                });
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_cache_tab(&mut self, ui: &mut egui::Ui) {
        let stats = self.state.cache.cache_stats();
        egui::Grid::new("cache_stats").num_columns(2).show(ui, |ui| {
            ui.label("Entries");
            ui.label(stats.entries.to_string());
            ui.end_row();
            ui.label("Hits / misses");
            ui.label(format!("{} / {}", stats.hits, stats.misses));
            ui.end_row();
            ui.label("Hit rate");
            ui.label(
                RichText::new(format!("{:.1}%", stats.hit_rate * 100.0))
                    .color(theme::success_color()),
            );
            ui.end_row();
            ui.label("Estimated size");
            ui.label(format!("{} bytes", stats.estimated_bytes));
            ui.end_row();
        });
        ui.separator();
        ui.horizontal_wrapped(|ui| {
            for kind in MappingKind::all() {
                if ui.button(format!("Invalidate {}", kind.label())).clicked() {
                    self.pending.push(AppAction::InvalidateCache(Some(kind)));
                }
            }
            if ui.button("Clear all").clicked() {
                self.pending.push(AppAction::InvalidateCache(None));
            }
        });
        ui.separator();
        let keys = self.state.cache.cached_keys();
        ScrollArea::vertical()
            .id_source("cache_keys")
            .auto_shrink([false; 2])
            .show_rows(ui, 18.0, keys.len(), |ui, rows| {
                for key in &keys[rows] {
                    ui.monospace(key);
                }
            });
    }

    fn draw_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.state.status);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let mut loading = self.state.is_loading;
                if ui.checkbox(&mut loading, "Loading").changed() {
                    self.pending.push(AppAction::SetLoading(loading));
                }
                if self.state.list.is_scrolling() {
                    ui.weak("scrolling");
                }
                if let Some((start, end)) = self.state.rendered_window() {
                    ui.weak(format!("rows {start}–{end}"));
                }
                ui.weak(format!(
                    "{} mapped · {} selected",
                    self.state.mapped_count(),
                    self.state.board.selection_len()
                ));
            });
        });
    }
}

fn paint_item_row(
    ui: &mut egui::Ui,
    row: RowCtx,
    item: &SourceItem,
    selected: bool,
    pending: &mut Vec<AppAction>,
) {
    let response = ui.interact(row.rect, ui.id().with(("row", row.index)), Sense::click());
    let fill = if selected {
        theme::ROW_SELECTED
    } else if !row.scrolling && response.hovered() {
        theme::ROW_HOVER
    } else if row.index % 2 == 1 {
        theme::ROW_STRIPE
    } else {
        Color32::TRANSPARENT
    };
    ui.painter().rect_filled(row.rect, 0.0, fill);

    ui.horizontal_centered(|ui| {
        let mut checked = selected;
        if ui.checkbox(&mut checked, "").changed() {
            pending.push(AppAction::ToggleSelect(item.id.clone()));
        }
        ui.label(RichText::new(&item.name).strong());
        ui.weak(item.kind.label());
        ui.weak(&item.survey);
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.weak(format!("×{}", item.occurrences));
        });
    });
    if response.clicked() {
        pending.push(AppAction::ToggleSelect(item.id.clone()));
    }
}

impl eframe::App for SurveyMapperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("toolbar").show(ctx, |ui| self.draw_toolbar(ui));
        TopBottomPanel::bottom("status").show(ctx, |ui| self.draw_status_bar(ui));
        CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::Unmapped => self.draw_unmapped_tab(ui),
            Tab::Mapped => self.draw_mapped_tab(ui),
            Tab::Learned => self.draw_learned_tab(ui),
            Tab::Cache => self.draw_cache_tab(ui),
        });
        self.flush_pending();
    }
}
