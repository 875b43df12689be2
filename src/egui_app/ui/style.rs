use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::egui_app::state::StatusTone;

/// Colour roles shared by the panels, tables and charts.
#[derive(Clone, Copy)]
pub struct Palette {
    pub surface: Color32,
    pub panel: Color32,
    pub control: Color32,
    pub outline: Color32,
    pub grid_major: Color32,
    pub grid_minor: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub heading: Color32,
    pub action: Color32,
    pub train_line: Color32,
    pub val_line: Color32,
    pub ok: Color32,
    pub caution: Color32,
    pub failure: Color32,
}

pub fn palette() -> Palette {
    Palette {
        surface: Color32::from_rgb(14, 16, 20),
        panel: Color32::from_rgb(24, 27, 33),
        control: Color32::from_rgb(38, 43, 52),
        outline: Color32::from_rgb(48, 54, 64),
        grid_major: Color32::from_rgb(70, 76, 88),
        grid_minor: Color32::from_rgb(34, 38, 46),
        text: Color32::from_rgb(200, 206, 214),
        text_dim: Color32::from_rgb(128, 136, 148),
        heading: Color32::from_rgb(150, 200, 240),
        action: Color32::from_rgb(110, 220, 180),
        train_line: Color32::from_rgb(86, 156, 232),
        val_line: Color32::from_rgb(240, 150, 80),
        ok: Color32::from_rgb(96, 180, 120),
        caution: Color32::from_rgb(220, 180, 90),
        failure: Color32::from_rgb(214, 96, 96),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.surface;
    visuals.panel_fill = palette.panel;
    visuals.extreme_bg_color = palette.surface;
    visuals.faint_bg_color = palette.grid_minor;
    visuals.override_text_color = Some(palette.text);
    visuals.warn_fg_color = palette.caution;
    visuals.error_fg_color = palette.failure;
    visuals.selection.bg_fill = palette.control;
    visuals.selection.stroke = Stroke::new(1.0, palette.heading);
    visuals.widgets.noninteractive.bg_fill = palette.panel;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.outline);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        flatten_widget(widget, palette);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.heading);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
}

fn flatten_widget(widget: &mut WidgetVisuals, palette: Palette) {
    widget.corner_radius = CornerRadius::ZERO;
    widget.bg_fill = palette.control;
    widget.weak_bg_fill = palette.control;
    widget.bg_stroke = Stroke::new(1.0, palette.outline);
    widget.fg_stroke = Stroke::new(1.0, palette.text);
}

/// Border around a model block or metric column.
pub fn block_border() -> Stroke {
    Stroke::new(1.0, palette().outline)
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Idle => palette.text_dim,
        StatusTone::Info => palette.ok,
        StatusTone::Warning => palette.caution,
        StatusTone::Error => palette.failure,
    }
}

/// Train series colour, then validation series colour.
pub fn series_colors() -> [Color32; 2] {
    let palette = palette();
    [palette.train_line, palette.val_line]
}
