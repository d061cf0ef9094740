use std::time::Instant;

use egui::{pos2, vec2, Rect, ScrollArea, Ui};
use sm_core::{ListFrame, VirtualList, VisibleRange};

/// Per-row context handed to the row painter.
#[derive(Debug, Clone, Copy)]
pub struct RowCtx {
    pub index: usize,
    pub rect: Rect,
    /// True while the user is actively scrolling; painters skip hover effects.
    pub scrolling: bool,
}

/// Draws `items` through `list`, materializing only the visible window.
///
/// `jump_to` forces the scroll area to an offset (used after the list was
/// reset programmatically). Returns the materialized range, if any rows were
/// drawn.
pub fn show_virtual_list<T, F>(
    ui: &mut Ui,
    id_source: &str,
    list: &mut VirtualList,
    items: &[T],
    is_loading: bool,
    jump_to: Option<f32>,
    mut paint_row: F,
) -> Option<VisibleRange>
where
    F: FnMut(&mut Ui, RowCtx, &T),
{
    let now = Instant::now();
    list.tick(now);

    if is_loading || items.is_empty() {
        match list.render(items, is_loading, |_, _, _| ()) {
            ListFrame::Loading { message } => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(message);
                });
            }
            ListFrame::Empty { message } => {
                ui.weak(message);
            }
            ListFrame::Rows { .. } => {}
        }
        return None;
    }

    let options = list.options().clone();
    let width = options.width.resolve(ui.available_width());
    let scrolling = list.is_scrolling();

    let mut area = ScrollArea::vertical()
        .id_source(id_source)
        .max_height(options.height)
        .auto_shrink([false; 2]);
    if let Some(offset) = jump_to {
        area = area.vertical_scroll_offset(offset);
    }

    let output = area.show_viewport(ui, |ui, viewport| {
        let offset = viewport.min.y;
        if (offset - list.offset()).abs() > f32::EPSILON {
            list.on_scroll(offset, now);
        }
        ui.set_height(list.content_extent(items.len()));
        ui.set_width(width);

        let origin = ui.min_rect().min;
        let frame = list.render(items, false, |index, item, style| {
            let rect = Rect::from_min_size(
                pos2(origin.x, origin.y + style.top),
                vec2(width, style.height),
            );
            let layout = *ui.layout();
            let mut row_ui = ui.child_ui(rect, layout);
            paint_row(&mut row_ui, RowCtx { index, rect, scrolling }, item);
        });
        frame.range()
    });

    if let Some(wait) = list.tracker().time_until_settle(now) {
        ui.ctx().request_repaint_after(wait);
    }
    output.inner
}
