use egui::epaint::Shadow;
use egui::{Color32, FontFamily, FontId, Id, Margin, Rounding, Style, TextStyle, Vec2, Visuals};

const LINE: Color32 = Color32::from_rgb(0xc9, 0xd1, 0xdb);
const BG: Color32 = Color32::from_rgb(0xf3, 0xf5, 0xf8);
const PANEL: Color32 = Color32::from_rgb(0xfb, 0xfc, 0xfd);
const TEXT: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);
const PRIMARY: Color32 = Color32::from_rgb(0x1e, 0x5e, 0xb8);
const DANGER: Color32 = Color32::from_rgb(0xb4, 0x23, 0x18);
const WARN: Color32 = Color32::from_rgb(0xb5, 0x6a, 0x00);
const HOVER: Color32 = Color32::from_rgb(0xe3, 0xee, 0xfb);
const SUCCESS: Color32 = Color32::from_rgb(0x1a, 0x7f, 0x37);

pub const ROW_STRIPE: Color32 = Color32::from_rgb(0xf6, 0xf8, 0xfa);
pub const ROW_SELECTED: Color32 = Color32::from_rgb(0xd6, 0xe6, 0xfa);
pub const ROW_HOVER: Color32 = HOVER;

fn installed_flag() -> Id {
    Id::new("survey_mapper_theme_installed")
}

pub fn base_style() -> Style {
    let mut style = Style::default();
    style.spacing.item_spacing = Vec2::new(8.0, 6.0);
    style.spacing.button_padding = Vec2::new(10.0, 5.0);
    style.spacing.window_margin = Margin::same(8.0);
    style.spacing.menu_margin = Margin::same(6.0);
    style.spacing.interact_size = Vec2::new(24.0, 24.0);
    style.visuals = base_visuals();
    style.text_styles = [
        (TextStyle::Heading, FontId::new(17.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
    ]
    .into();
    style
}

pub fn base_visuals() -> Visuals {
    let mut visuals = Visuals::light();
    visuals.override_text_color = Some(TEXT);
    visuals.window_fill = BG;
    visuals.panel_fill = PANEL;
    visuals.faint_bg_color = ROW_STRIPE;
    visuals.widgets.noninteractive.bg_stroke.color = LINE;
    visuals.widgets.inactive.bg_stroke.color = LINE;
    visuals.widgets.hovered.bg_fill = HOVER;
    visuals.widgets.hovered.bg_stroke.color = PRIMARY;
    visuals.selection.bg_fill = PRIMARY;
    visuals.selection.stroke.color = Color32::WHITE;
    visuals.window_stroke.color = LINE;
    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;
    visuals.window_rounding = Rounding::same(4.0);
    visuals.error_fg_color = DANGER;
    visuals.warn_fg_color = WARN;
    visuals
}

pub fn success_color() -> Color32 {
    SUCCESS
}

/// Installs the shared style on `ctx` once. Later calls are no-ops, so every
/// startup path can call it without stacking duplicate state.
pub fn install_theme(ctx: &egui::Context) -> bool {
    let id = installed_flag();
    let already = ctx.data(|data| data.get_temp::<bool>(id).unwrap_or(false));
    if already {
        return false;
    }
    ctx.set_style(base_style());
    ctx.data_mut(|data| data.insert_temp(id, true));
    tracing::debug!("theme installed");
    true
}
